// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-input/single-output stream transformations.

use std::sync::Arc;

use rivus_core::{Cancelable, Subscriber};

use crate::observable::ObservableSource;

/// A `Subscriber -> Subscriber` transformation.
///
/// Given a downstream that accepts `Out` elements, `apply` produces the
/// upstream-facing subscriber that accepts `In` elements, carrying the
/// downstream's scheduler and owning any per-subscription state. `apply` is
/// called once per subscription; state created inside it is never shared
/// between subscriptions.
///
/// Returning `None` signals that the subscription failed during operator
/// setup: the operator has already delivered `on_error` downstream and the
/// source must not be subscribed (the fold-left seed producer is the one
/// place in this crate that takes this path).
pub trait Operator<In, Out>: Send + Sync
where
    In: Send + 'static,
    Out: Send + 'static,
{
    /// Wrap the downstream subscriber for one subscription.
    fn apply(&self, downstream: Subscriber<Out>) -> Option<Subscriber<In>>;
}

/// An observable obtained by sitting an operator between a source and every
/// subscriber handed to it.
pub(crate) struct Lifted<In, Out>
where
    In: Send + 'static,
    Out: Send + 'static,
{
    pub(crate) source: Arc<dyn ObservableSource<Item = In>>,
    pub(crate) operator: Arc<dyn Operator<In, Out>>,
}

impl<In, Out> ObservableSource for Lifted<In, Out>
where
    In: Send + 'static,
    Out: Send + 'static,
{
    type Item = Out;

    fn unsafe_subscribe(&self, subscriber: Subscriber<Out>) -> Cancelable {
        match self.operator.apply(subscriber) {
            Some(upstream) => self.source.unsafe_subscribe(upstream),
            // Setup already failed the subscription; hand back an inert handle
            None => Cancelable::new(),
        }
    }
}
