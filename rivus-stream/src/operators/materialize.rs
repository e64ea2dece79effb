// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reifies stream events into [`Notification`] elements.

use core::marker::PhantomData;

use rivus_core::{Ack, Notification, Observer, Result, RivusError, Scheduler, Subscriber};

use crate::operator::Operator;
use crate::operators::deliver;

/// Turns `on_next(a)` into `on_next(OnNext(a))` and either terminal into a
/// final `OnError`/`OnComplete` element followed by `on_complete`. The
/// resulting stream always completes successfully; the error, if any,
/// travels as data.
pub struct MaterializeOperator<A> {
    _marker: PhantomData<fn(A)>,
}

impl<A> MaterializeOperator<A> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<A> Default for MaterializeOperator<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Operator<A, Notification<A>> for MaterializeOperator<A>
where
    A: Send + 'static,
{
    fn apply(&self, downstream: Subscriber<Notification<A>>) -> Option<Subscriber<A>> {
        let scheduler = downstream.scheduler().clone();
        Some(Subscriber::new(
            MaterializeObserver {
                downstream,
                terminated: false,
            },
            scheduler,
        ))
    }
}

struct MaterializeObserver<A: Send + 'static> {
    downstream: Subscriber<Notification<A>>,
    terminated: bool,
}

impl<A: Send + 'static> MaterializeObserver<A> {
    /// Deliver the reified terminal element, then complete unless the
    /// downstream refused it.
    fn finish(&mut self, notification: Notification<A>) {
        match self.downstream.on_next(notification) {
            Ok(Ack::Stop) => {}
            Ok(_) => self.downstream.on_complete(),
            Err(error) => self.downstream.scheduler().report_failure(error),
        }
    }
}

impl<A: Send + 'static> Observer for MaterializeObserver<A> {
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        if self.terminated {
            return Ok(Ack::Stop);
        }
        Ok(deliver(
            &mut self.downstream,
            &mut self.terminated,
            Notification::OnNext(item),
        ))
    }

    fn on_complete(&mut self) {
        if !self.terminated {
            self.terminated = true;
            self.finish(Notification::OnComplete);
        }
    }

    fn on_error(&mut self, error: RivusError) {
        if !self.terminated {
            self.terminated = true;
            self.finish(Notification::OnError(error));
        }
    }
}
