// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Contract enforcement between a producer and an untrusted consumer.

use rivus_core::{Ack, Observer, Result, RivusError, Scheduler, Subscriber};

/// Wraps the final consumer so producers upstream see a well-behaved
/// subscriber regardless of what the consumer does.
///
/// Enforced rules:
///
/// - **Grammar**: events arriving after a terminal are ignored.
/// - **Failure isolation**: an `Err` from the consumer's `on_next` is
///   converted into `on_error` on that same consumer, and the producer is
///   answered with a plain [`Ack::Stop`].
/// - **Late failures**: an error surfacing after the pipeline terminated
///   can no longer enter it and is reported to the scheduler's failure
///   channel instead.
///
/// Applied automatically by the safe `subscribe` path;
/// `unsafe_subscribe` bypasses it and is reserved for trusted internals.
pub struct SafeObserver<A: Send + 'static> {
    downstream: Subscriber<A>,
    terminated: bool,
}

impl<A: Send + 'static> SafeObserver<A> {
    pub fn new(downstream: Subscriber<A>) -> Self {
        Self {
            downstream,
            terminated: false,
        }
    }
}

impl<A: Send + 'static> Observer for SafeObserver<A> {
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        if self.terminated {
            return Ok(Ack::Stop);
        }
        match self.downstream.on_next(item) {
            Ok(Ack::Stop) => {
                self.terminated = true;
                Ok(Ack::Stop)
            }
            Ok(ack) => Ok(ack),
            Err(error) => {
                self.terminated = true;
                self.downstream.on_error(error);
                Ok(Ack::Stop)
            }
        }
    }

    fn on_complete(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        self.downstream.on_complete();
    }

    fn on_error(&mut self, error: RivusError) {
        if self.terminated {
            self.downstream.scheduler().report_failure(error);
            return;
        }
        self.terminated = true;
        self.downstream.on_error(error);
    }
}
