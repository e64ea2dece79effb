// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trivial sources: the degenerate observables every pipeline test reaches
//! for and every operator must survive.

use core::marker::PhantomData;

use rivus_core::{Ack, Cancelable, Observer, RivusError, Subscriber};

use crate::observable::ObservableSource;

/// Completes immediately without emitting.
pub(crate) struct EmptySource<A> {
    pub(crate) _marker: PhantomData<fn() -> A>,
}

impl<A: Send + 'static> ObservableSource for EmptySource<A> {
    type Item = A;

    fn unsafe_subscribe(&self, mut subscriber: Subscriber<A>) -> Cancelable {
        subscriber.on_complete();
        Cancelable::new()
    }
}

/// Never emits and never terminates.
pub(crate) struct NeverSource<A> {
    pub(crate) _marker: PhantomData<fn() -> A>,
}

impl<A: Send + 'static> ObservableSource for NeverSource<A> {
    type Item = A;

    fn unsafe_subscribe(&self, subscriber: Subscriber<A>) -> Cancelable {
        drop(subscriber);
        Cancelable::new()
    }
}

/// Emits one element, then completes.
///
/// The element and the completion are delivered back-to-back in the
/// subscribing context; the element's acknowledgement is only consulted for
/// `Stop` (nothing follows the terminal anyway).
pub(crate) struct JustSource<A> {
    pub(crate) value: A,
}

impl<A> ObservableSource for JustSource<A>
where
    A: Clone + Send + Sync + 'static,
{
    type Item = A;

    fn unsafe_subscribe(&self, mut subscriber: Subscriber<A>) -> Cancelable {
        match subscriber.on_next(self.value.clone()) {
            Ok(Ack::Stop) => {}
            Ok(_) => subscriber.on_complete(),
            Err(error) => subscriber.on_error(error),
        }
        Cancelable::new()
    }
}

/// Fails immediately with a copy of the stored error.
pub(crate) struct RaiseErrorSource<A> {
    pub(crate) error: RivusError,
    pub(crate) _marker: PhantomData<fn() -> A>,
}

impl<A: Send + 'static> ObservableSource for RaiseErrorSource<A> {
    type Item = A;

    fn unsafe_subscribe(&self, mut subscriber: Subscriber<A>) -> Cancelable {
        subscriber.on_error(self.error.clone());
        Cancelable::new()
    }
}
