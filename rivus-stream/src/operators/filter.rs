// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Predicate-based filtering.

use core::marker::PhantomData;
use std::sync::Arc;

use rivus_core::{Ack, Observer, Result, RivusError, Subscriber};

use crate::operator::Operator;
use crate::operators::deliver;

/// Emits only elements matching the predicate; rejected elements are acked
/// with `Continue` without touching the downstream.
pub struct FilterOperator<A, P> {
    predicate: Arc<P>,
    _marker: PhantomData<fn(A)>,
}

impl<A, P> FilterOperator<A, P> {
    pub fn new(predicate: P) -> Self {
        Self {
            predicate: Arc::new(predicate),
            _marker: PhantomData,
        }
    }
}

impl<A, P> Operator<A, A> for FilterOperator<A, P>
where
    A: Send + 'static,
    P: Fn(&A) -> Result<bool> + Send + Sync + 'static,
{
    fn apply(&self, downstream: Subscriber<A>) -> Option<Subscriber<A>> {
        let scheduler = downstream.scheduler().clone();
        Some(Subscriber::new(
            FilterObserver {
                downstream,
                predicate: Arc::clone(&self.predicate),
                terminated: false,
            },
            scheduler,
        ))
    }
}

struct FilterObserver<A: Send + 'static, P> {
    downstream: Subscriber<A>,
    predicate: Arc<P>,
    terminated: bool,
}

impl<A, P> Observer for FilterObserver<A, P>
where
    A: Send + 'static,
    P: Fn(&A) -> Result<bool> + Send + Sync + 'static,
{
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        if self.terminated {
            return Ok(Ack::Stop);
        }
        match (self.predicate)(&item) {
            Ok(true) => Ok(deliver(&mut self.downstream, &mut self.terminated, item)),
            Ok(false) => Ok(Ack::Continue),
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
