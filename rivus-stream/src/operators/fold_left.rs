// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Left fold with an identity element.

use core::marker::PhantomData;
use std::sync::Arc;

use rivus_core::{Ack, Observer, Result, RivusError, Scheduler, Subscriber};

use crate::operator::Operator;

/// Folds all elements into a state seeded per subscription, emitting the
/// single final state when the source completes. An empty source emits the
/// seed itself.
///
/// The seed producer runs at subscription time. When it fails, the
/// subscription fails with `on_error` before the source is ever touched,
/// and `apply` answers `None` so the lifted observable hands back an inert
/// cancelable.
pub struct FoldLeftOperator<In, S, Seed, F> {
    seed: Arc<Seed>,
    f: Arc<F>,
    _marker: PhantomData<fn(In) -> S>,
}

impl<In, S, Seed, F> FoldLeftOperator<In, S, Seed, F> {
    pub fn new(seed: Seed, f: F) -> Self {
        Self {
            seed: Arc::new(seed),
            f: Arc::new(f),
            _marker: PhantomData,
        }
    }
}

impl<In, S, Seed, F> Operator<In, S> for FoldLeftOperator<In, S, Seed, F>
where
    In: Send + 'static,
    S: Send + 'static,
    Seed: Fn() -> Result<S> + Send + Sync + 'static,
    F: Fn(S, In) -> Result<S> + Send + Sync + 'static,
{
    fn apply(&self, mut downstream: Subscriber<S>) -> Option<Subscriber<In>> {
        let state = match (self.seed)() {
            Ok(state) => state,
            Err(error) => {
                downstream.on_error(error);
                return None;
            }
        };
        let scheduler = downstream.scheduler().clone();
        Some(Subscriber::new(
            FoldLeftObserver {
                downstream,
                f: Arc::clone(&self.f),
                state: Some(state),
                terminated: false,
                _marker: PhantomData,
            },
            scheduler,
        ))
    }
}

struct FoldLeftObserver<In, S: Send + 'static, F> {
    downstream: Subscriber<S>,
    f: Arc<F>,
    state: Option<S>,
    terminated: bool,
    _marker: PhantomData<fn(In)>,
}

impl<In, S, F> Observer for FoldLeftObserver<In, S, F>
where
    In: Send + 'static,
    S: Send + 'static,
    F: Fn(S, In) -> Result<S> + Send + Sync + 'static,
{
    type Item = In;

    fn on_next(&mut self, item: In) -> Result<Ack> {
        if self.terminated {
            return Ok(Ack::Stop);
        }
        let Some(state) = self.state.take() else {
            return Ok(Ack::Stop);
        };
        match (self.f)(state, item) {
            Ok(next) => {
                self.state = Some(next);
                Ok(Ack::Continue)
            }
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
        if let Some(result) = self.state.take() {
            match self.downstream.on_next(result) {
                Ok(Ack::Stop) => return,
                Ok(_) => {}
                Err(error) => {
                    self.downstream.scheduler().report_failure(error);
                    return;
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
