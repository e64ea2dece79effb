// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Left fold without an identity element.

use std::sync::Arc;

use rivus_core::{Ack, Observer, Result, RivusError, Scheduler, Subscriber};

use crate::operator::Operator;

/// Combines all elements with a binary function and emits the single result
/// when the source completes, provided the combiner ran at least once.
///
/// With no identity to fall back on, one element is not enough to observe
/// an application of the combiner: both the empty source and the
/// single-element source complete without emitting. This is deliberate and
/// load-bearing; use a fold with a seed when the single-element case should
/// produce that element.
pub struct ReduceOperator<A, F> {
    f: Arc<F>,
    _marker: core::marker::PhantomData<fn(A)>,
}

impl<A, F> ReduceOperator<A, F> {
    pub fn new(f: F) -> Self {
        Self {
            f: Arc::new(f),
            _marker: core::marker::PhantomData,
        }
    }
}

impl<A, F> Operator<A, A> for ReduceOperator<A, F>
where
    A: Send + 'static,
    F: Fn(A, A) -> Result<A> + Send + Sync + 'static,
{
    fn apply(&self, downstream: Subscriber<A>) -> Option<Subscriber<A>> {
        let scheduler = downstream.scheduler().clone();
        Some(Subscriber::new(
            ReduceObserver {
                downstream,
                f: Arc::clone(&self.f),
                state: None,
                applied: false,
                terminated: false,
            },
            scheduler,
        ))
    }
}

struct ReduceObserver<A: Send + 'static, F> {
    downstream: Subscriber<A>,
    f: Arc<F>,
    state: Option<A>,
    /// True once the combiner has been invoked at least once.
    applied: bool,
    terminated: bool,
}

impl<A, F> Observer for ReduceObserver<A, F>
where
    A: Send + 'static,
    F: Fn(A, A) -> Result<A> + Send + Sync + 'static,
{
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        if self.terminated {
            return Ok(Ack::Stop);
        }
        match self.state.take() {
            None => {
                self.state = Some(item);
                Ok(Ack::Continue)
            }
            Some(acc) => match (self.f)(acc, item) {
                Ok(next) => {
                    self.state = Some(next);
                    self.applied = true;
                    Ok(Ack::Continue)
                }
                Err(error) => {
                    self.terminated = true;
                    self.downstream.on_error(error);
                    Ok(Ack::Stop)
                }
            },
        }
    }

    fn on_complete(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        if self.applied {
            if let Some(result) = self.state.take() {
                // Nothing follows but the terminal, so the emission's
                // acknowledgement only matters when it refuses
                match self.downstream.on_next(result) {
                    Ok(Ack::Stop) => return,
                    Ok(_) => {}
                    Err(error) => {
                        self.downstream.scheduler().report_failure(error);
                        return;
                    }
                }
            }
        }
        self.downstream.on_complete();
    }

    fn on_error(&mut self, error: RivusError) {
        if !self.terminated {
            self.terminated = true;
            self.downstream.on_error(error);
        }
    }
}
