// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stateful accumulation emitting every intermediate state.

use core::marker::PhantomData;
use std::sync::Arc;

use rivus_core::{Ack, Observer, Result, RivusError, Subscriber};

use crate::operator::Operator;
use crate::operators::deliver;

/// Like a fold, but every updated state is emitted as it happens.
///
/// The seed is produced per subscription; a failing seed fails the
/// subscription before the source is touched, like the fold.
pub struct ScanOperator<In, S, Seed, F> {
    seed: Arc<Seed>,
    f: Arc<F>,
    _marker: PhantomData<fn(In) -> S>,
}

impl<In, S, Seed, F> ScanOperator<In, S, Seed, F> {
    pub fn new(seed: Seed, f: F) -> Self {
        Self {
            seed: Arc::new(seed),
            f: Arc::new(f),
            _marker: PhantomData,
        }
    }
}

impl<In, S, Seed, F> Operator<In, S> for ScanOperator<In, S, Seed, F>
where
    In: Send + 'static,
    S: Clone + Send + 'static,
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
            ScanObserver {
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

struct ScanObserver<In, S: Send + 'static, F> {
    downstream: Subscriber<S>,
    f: Arc<F>,
    state: Option<S>,
    terminated: bool,
    _marker: PhantomData<fn(In)>,
}

impl<In, S, F> Observer for ScanObserver<In, S, F>
where
    In: Send + 'static,
    S: Clone + Send + 'static,
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
                self.state = Some(next.clone());
                Ok(deliver(&mut self.downstream, &mut self.terminated, next))
            }
            Err(error) => {
                self.terminated = true;
                self.downstream.on_error(error);
                Ok(Ack::Stop)
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
