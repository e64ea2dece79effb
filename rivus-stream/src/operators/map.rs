// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Element-wise transformation.

use core::marker::PhantomData;
use std::sync::Arc;

use rivus_core::{Ack, Observer, Result, RivusError, Subscriber};

use crate::operator::Operator;
use crate::operators::deliver;

/// Applies a fallible selector to every element.
pub struct MapOperator<In, Out, F> {
    f: Arc<F>,
    _marker: PhantomData<fn(In) -> Out>,
}

impl<In, Out, F> MapOperator<In, Out, F> {
    pub fn new(f: F) -> Self {
        Self {
            f: Arc::new(f),
            _marker: PhantomData,
        }
    }
}

impl<In, Out, F> Operator<In, Out> for MapOperator<In, Out, F>
where
    In: Send + 'static,
    Out: Send + 'static,
    F: Fn(In) -> Result<Out> + Send + Sync + 'static,
{
    fn apply(&self, downstream: Subscriber<Out>) -> Option<Subscriber<In>> {
        let scheduler = downstream.scheduler().clone();
        Some(Subscriber::new(
            MapObserver {
                downstream,
                f: Arc::clone(&self.f),
                terminated: false,
                _marker: PhantomData,
            },
            scheduler,
        ))
    }
}

struct MapObserver<In, Out: Send + 'static, F> {
    downstream: Subscriber<Out>,
    f: Arc<F>,
    terminated: bool,
    _marker: PhantomData<fn(In)>,
}

impl<In, Out, F> Observer for MapObserver<In, Out, F>
where
    In: Send + 'static,
    Out: Send + 'static,
    F: Fn(In) -> Result<Out> + Send + Sync + 'static,
{
    type Item = In;

    fn on_next(&mut self, item: In) -> Result<Ack> {
        if self.terminated {
            return Ok(Ack::Stop);
        }
        match (self.f)(item) {
            Ok(mapped) => Ok(deliver(&mut self.downstream, &mut self.terminated, mapped)),
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
