// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Take operator that limits a stream to its first n elements.

use rivus_core::{Ack, Observer, Result, RivusError, Scheduler, Subscriber};

use crate::operator::Operator;

/// Emits the first `n` elements, then completes the downstream and answers
/// `Stop` upstream.
///
/// The nth element's acknowledgement is not awaited: the terminal follows
/// it immediately, since nothing can be emitted afterwards anyway.
/// `take(0)` completes lazily at the first upstream event rather than at
/// subscription time.
pub struct TakeOperator {
    n: usize,
}

impl TakeOperator {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl<A> Operator<A, A> for TakeOperator
where
    A: Send + 'static,
{
    fn apply(&self, downstream: Subscriber<A>) -> Option<Subscriber<A>> {
        let scheduler = downstream.scheduler().clone();
        Some(Subscriber::new(
            TakeObserver {
                downstream,
                remaining: self.n,
                terminated: false,
            },
            scheduler,
        ))
    }
}

struct TakeObserver<A: Send + 'static> {
    downstream: Subscriber<A>,
    remaining: usize,
    terminated: bool,
}

impl<A: Send + 'static> Observer for TakeObserver<A> {
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        if self.terminated {
            return Ok(Ack::Stop);
        }
        if self.remaining == 0 {
            self.terminated = true;
            self.downstream.on_complete();
            return Ok(Ack::Stop);
        }
        self.remaining -= 1;
        let is_last = self.remaining == 0;
        match self.downstream.on_next(item) {
            Err(error) => {
                self.terminated = true;
                self.downstream.scheduler().report_failure(error);
                Ok(Ack::Stop)
            }
            Ok(Ack::Stop) => {
                self.terminated = true;
                Ok(Ack::Stop)
            }
            Ok(ack) => {
                if is_last {
                    self.terminated = true;
                    self.downstream.on_complete();
                    Ok(Ack::Stop)
                } else {
                    Ok(ack)
                }
            }
        }
    }

    fn on_complete(&mut self) {
        if !self.terminated {
            self.terminated = true;
            self.downstream.on_complete();
        }
    }

    fn on_error(&mut self, error: RivusError) {
        if !self.terminated {
            self.terminated = true;
            self.downstream.on_error(error);
        }
    }
}
