// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! An observer bound to the scheduler its continuations run on.

use crate::{Ack, Observer, Result, RivusError, SchedulerRef};

/// An [`Observer`] paired with the [`SchedulerRef`] of the context any work
/// needed to resolve its deferred acknowledgements runs on.
///
/// Operators wrap a downstream `Subscriber` and hand an upstream-facing one
/// back, carrying the same scheduler through the whole chain. `Subscriber`
/// itself implements [`Observer`] by delegation, so wrappers nest uniformly.
pub struct Subscriber<A> {
    observer: Box<dyn Observer<Item = A>>,
    scheduler: SchedulerRef,
}

impl<A: Send + 'static> Subscriber<A> {
    /// Bind an observer to a scheduler.
    pub fn new<O>(observer: O, scheduler: SchedulerRef) -> Self
    where
        O: Observer<Item = A> + 'static,
    {
        Self {
            observer: Box::new(observer),
            scheduler,
        }
    }

    /// The scheduling context of this subscription.
    #[must_use]
    pub fn scheduler(&self) -> &SchedulerRef {
        &self.scheduler
    }
}

impl<A: Send + 'static> Observer for Subscriber<A> {
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        self.observer.on_next(item)
    }

    fn on_complete(&mut self) {
        self.observer.on_complete();
    }

    fn on_error(&mut self, error: RivusError) {
        self.observer.on_error(error);
    }
}
