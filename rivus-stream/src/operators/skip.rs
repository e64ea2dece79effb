// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Skip operator that discards the first n elements of a stream.

use rivus_core::{Ack, Observer, Result, RivusError, Subscriber};

use crate::operator::Operator;
use crate::operators::deliver;

/// Drops the first `n` elements, acking `Continue` for each without a
/// downstream call; everything after the window passes through unchanged,
/// including the downstream's acknowledgement.
pub struct SkipOperator {
    n: usize,
}

impl SkipOperator {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl<A> Operator<A, A> for SkipOperator
where
    A: Send + 'static,
{
    fn apply(&self, downstream: Subscriber<A>) -> Option<Subscriber<A>> {
        let scheduler = downstream.scheduler().clone();
        Some(Subscriber::new(
            SkipObserver {
                downstream,
                remaining: self.n,
                terminated: false,
            },
            scheduler,
        ))
    }
}

struct SkipObserver<A: Send + 'static> {
    downstream: Subscriber<A>,
    remaining: usize,
    terminated: bool,
}

impl<A: Send + 'static> Observer for SkipObserver<A> {
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        if self.terminated {
            return Ok(Ack::Stop);
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            return Ok(Ack::Continue);
        }
        Ok(deliver(&mut self.downstream, &mut self.terminated, item))
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
