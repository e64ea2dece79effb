// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Predicate-bounded take with an optional inclusive boundary.

use core::marker::PhantomData;
use parking_lot::Mutex;
use std::sync::Arc;

use rivus_core::{
    Ack, AckValue, Observer, Result, RivusError, Scheduler, SchedulerRef, Subscriber,
};

use crate::operator::Operator;

/// Emits elements while the predicate holds. The first failing element
/// terminates the stream: with `inclusive` it is emitted before the
/// completion, without it the completion comes directly. Either way the
/// upstream is answered `Stop`.
///
/// When the boundary element's acknowledgement is deferred, the completion
/// is deferred with it: the terminal event happens-after the
/// acknowledgement resolves, via a continuation on the scheduler. The
/// downstream therefore lives behind a mutex shared with that continuation.
pub struct TakeWhileOperator<A, P> {
    predicate: Arc<P>,
    inclusive: bool,
    _marker: PhantomData<fn(A)>,
}

impl<A, P> TakeWhileOperator<A, P> {
    pub fn new(predicate: P, inclusive: bool) -> Self {
        Self {
            predicate: Arc::new(predicate),
            inclusive,
            _marker: PhantomData,
        }
    }
}

impl<A, P> Operator<A, A> for TakeWhileOperator<A, P>
where
    A: Send + 'static,
    P: Fn(&A) -> Result<bool> + Send + Sync + 'static,
{
    fn apply(&self, downstream: Subscriber<A>) -> Option<Subscriber<A>> {
        let scheduler = downstream.scheduler().clone();
        Some(Subscriber::new(
            TakeWhileObserver {
                downstream: Arc::new(Mutex::new(downstream)),
                scheduler: scheduler.clone(),
                predicate: Arc::clone(&self.predicate),
                inclusive: self.inclusive,
                terminated: false,
            },
            scheduler,
        ))
    }
}

struct TakeWhileObserver<A: Send + 'static, P> {
    downstream: Arc<Mutex<Subscriber<A>>>,
    scheduler: SchedulerRef,
    predicate: Arc<P>,
    inclusive: bool,
    terminated: bool,
}

impl<A, P> TakeWhileObserver<A, P>
where
    A: Send + 'static,
    P: Fn(&A) -> Result<bool> + Send + Sync + 'static,
{
    /// Emit the boundary element, then complete once its acknowledgement
    /// allows it.
    fn emit_boundary(&mut self, item: A) -> Ack {
        let mut downstream = self.downstream.lock();
        match downstream.on_next(item) {
            Err(error) => {
                drop(downstream);
                self.scheduler.report_failure(error);
                Ack::Stop
            }
            Ok(Ack::Stop) => Ack::Stop,
            Ok(Ack::Continue) => {
                downstream.on_complete();
                Ack::Stop
            }
            Ok(deferred @ Ack::Deferred(_)) => {
                drop(downstream);
                let shared = Arc::clone(&self.downstream);
                self.scheduler.execute(Box::pin(async move {
                    match deferred.resolved().await {
                        Ok(AckValue::Continue) => shared.lock().on_complete(),
                        Ok(AckValue::Stop) => {}
                        Err(error) => shared.lock().on_error(error),
                    }
                }));
                Ack::Stop
            }
        }
    }
}

impl<A, P> Observer for TakeWhileObserver<A, P>
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
            Ok(true) => {
                let mut downstream = self.downstream.lock();
                match downstream.on_next(item) {
                    Ok(Ack::Stop) => {
                        self.terminated = true;
                        Ok(Ack::Stop)
                    }
                    Ok(ack) => Ok(ack),
                    Err(error) => {
                        self.terminated = true;
                        drop(downstream);
                        self.scheduler.report_failure(error);
                        Ok(Ack::Stop)
                    }
                }
            }
            Ok(false) => {
                self.terminated = true;
                if self.inclusive {
                    Ok(self.emit_boundary(item))
                } else {
                    self.downstream.lock().on_complete();
                    Ok(Ack::Stop)
                }
            }
            Err(error) => {
                self.terminated = true;
                self.downstream.lock().on_error(error);
                Ok(Ack::Stop)
            }
        }
    }

    fn on_complete(&mut self) {
        if !self.terminated {
            self.terminated = true;
            self.downstream.lock().on_complete();
        }
    }

    fn on_error(&mut self, error: RivusError) {
        if !self.terminated {
            self.terminated = true;
            self.downstream.lock().on_error(error);
        }
    }
}
