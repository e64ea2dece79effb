// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Suppression of consecutive duplicates by key equivalence.

use core::marker::PhantomData;
use std::sync::Arc;

use rivus_core::{Ack, Observer, Result, RivusError, Subscriber};

use crate::operator::Operator;
use crate::operators::deliver;

/// Emits an element iff it is the first one, or its key is not equivalent
/// to the key of the most recently *kept* element.
///
/// The equivalence relation is caller-supplied: key types may legitimately
/// compare via approximate or domain-specific equivalence, so no implicit
/// `PartialEq` is assumed. Key extraction may fail (user-code error);
/// the comparison is assumed total.
pub struct DistinctUntilChangedOperator<A, K, KeyFn, Eq> {
    key_fn: Arc<KeyFn>,
    eq: Arc<Eq>,
    _marker: PhantomData<fn(A) -> K>,
}

impl<A, K, KeyFn, Eq> DistinctUntilChangedOperator<A, K, KeyFn, Eq> {
    pub fn new(key_fn: KeyFn, eq: Eq) -> Self {
        Self {
            key_fn: Arc::new(key_fn),
            eq: Arc::new(eq),
            _marker: PhantomData,
        }
    }
}

impl<A, K, KeyFn, Eq> Operator<A, A> for DistinctUntilChangedOperator<A, K, KeyFn, Eq>
where
    A: Send + 'static,
    K: Send + 'static,
    KeyFn: Fn(&A) -> Result<K> + Send + Sync + 'static,
    Eq: Fn(&K, &K) -> bool + Send + Sync + 'static,
{
    fn apply(&self, downstream: Subscriber<A>) -> Option<Subscriber<A>> {
        let scheduler = downstream.scheduler().clone();
        Some(Subscriber::new(
            DistinctUntilChangedObserver {
                downstream,
                key_fn: Arc::clone(&self.key_fn),
                eq: Arc::clone(&self.eq),
                last_key: None,
                terminated: false,
            },
            scheduler,
        ))
    }
}

struct DistinctUntilChangedObserver<A: Send + 'static, K, KeyFn, Eq> {
    downstream: Subscriber<A>,
    key_fn: Arc<KeyFn>,
    eq: Arc<Eq>,
    last_key: Option<K>,
    terminated: bool,
}

impl<A, K, KeyFn, Eq> Observer for DistinctUntilChangedObserver<A, K, KeyFn, Eq>
where
    A: Send + 'static,
    K: Send + 'static,
    KeyFn: Fn(&A) -> Result<K> + Send + Sync + 'static,
    Eq: Fn(&K, &K) -> bool + Send + Sync + 'static,
{
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        if self.terminated {
            return Ok(Ack::Stop);
        }
        let key = match (self.key_fn)(&item) {
            Ok(key) => key,
            Err(error) => {
                self.terminated = true;
                self.downstream.on_error(error);
                return Ok(Ack::Stop);
            }
        };
        let changed = match self.last_key.as_ref() {
            None => true,
            Some(previous) => !(self.eq)(previous, &key),
        };
        if changed {
            self.last_key = Some(key);
            Ok(deliver(&mut self.downstream, &mut self.terminated, item))
        } else {
            Ok(Ack::Continue)
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
