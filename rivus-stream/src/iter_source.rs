// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Iterator-backed sources and their batched emission loop.
//!
//! Both `from_iter` and `from_resource_iter` funnel into the same loop: a
//! scheduler task that drains the iterator, honours every acknowledgement
//! before producing the next element, yields back to the scheduler after a
//! batch of synchronous `Continue`s, and runs the finalizer (when there is
//! one) exactly once on the way out.

use parking_lot::Mutex;

use rivus_core::{
    Ack, AckValue, Cancelable, Observer, Result, RivusError, Scheduler, SchedulerRef, Subscriber,
};

use crate::observable::ObservableSource;
use crate::resource::{ExitOutcome, Finalizer, Resource};

/// Cold source backed by a fresh iterator per subscription.
pub(crate) struct FromIterSource<F> {
    factory: F,
}

impl<F> FromIterSource<F> {
    pub(crate) fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<F, I, A> ObservableSource for FromIterSource<F>
where
    F: Fn() -> I + Send + Sync + 'static,
    I: IntoIterator<Item = A>,
    I::IntoIter: Send + 'static,
    A: Send + 'static,
{
    type Item = A;

    fn unsafe_subscribe(&self, subscriber: Subscriber<A>) -> Cancelable {
        let iter = (self.factory)().into_iter().map(Ok::<A, RivusError>);
        start(iter, None, subscriber)
    }
}

/// Single-subscriber source draining a resource-bound iterator.
pub(crate) struct ResourceIterSource<I> {
    resource: Mutex<Option<Resource<I>>>,
}

impl<I> ResourceIterSource<I> {
    pub(crate) fn new(resource: Resource<I>) -> Self {
        Self {
            resource: Mutex::new(Some(resource)),
        }
    }
}

impl<I, A> ObservableSource for ResourceIterSource<I>
where
    I: Iterator<Item = Result<A>> + Send + 'static,
    A: Send + 'static,
{
    type Item = A;

    fn unsafe_subscribe(&self, mut subscriber: Subscriber<A>) -> Cancelable {
        let Some(resource) = self.resource.lock().take() else {
            subscriber.on_error(RivusError::api_contract_violation(
                "resource-backed observable supports a single subscriber",
            ));
            return Cancelable::new();
        };
        match resource.acquire() {
            Ok(acquired) => start(acquired.value, Some(acquired.finalizer), subscriber),
            Err(error) => {
                subscriber.on_error(error);
                Cancelable::new()
            }
        }
    }
}

struct EmissionLoop<I, A>
where
    I: Iterator<Item = Result<A>> + Send + 'static,
    A: Send + 'static,
{
    iter: I,
    finalizer: Option<Finalizer>,
    subscriber: Subscriber<A>,
    handle: Cancelable,
    batch_size: usize,
}

fn start<I, A>(iter: I, finalizer: Option<Finalizer>, subscriber: Subscriber<A>) -> Cancelable
where
    I: Iterator<Item = Result<A>> + Send + 'static,
    A: Send + 'static,
{
    let handle = Cancelable::new();
    let scheduler = subscriber.scheduler().clone();
    let batch_size = scheduler.execution_model().recommended_batch_size.max(1);
    let state = EmissionLoop {
        iter,
        finalizer,
        subscriber,
        handle: handle.clone(),
        batch_size,
    };
    schedule(&scheduler, state);
    handle
}

fn schedule<I, A>(scheduler: &SchedulerRef, state: EmissionLoop<I, A>)
where
    I: Iterator<Item = Result<A>> + Send + 'static,
    A: Send + 'static,
{
    scheduler.execute(Box::pin(run(state)));
}

async fn run<I, A>(mut state: EmissionLoop<I, A>)
where
    I: Iterator<Item = Result<A>> + Send + 'static,
    A: Send + 'static,
{
    let mut remaining = state.batch_size;
    loop {
        // Cancellation is observed at scheduling boundaries only; an
        // outstanding acknowledgement is always honoured first
        if state.handle.is_canceled() {
            state.finalize_detached(&ExitOutcome::Canceled);
            return;
        }
        match state.iter.next() {
            None => {
                state.finish_complete();
                return;
            }
            Some(Err(error)) => {
                state.finish_error(error);
                return;
            }
            Some(Ok(item)) => match state.subscriber.on_next(item) {
                Err(error) => {
                    state.finish_error(error);
                    return;
                }
                Ok(Ack::Continue) => {
                    remaining -= 1;
                    if remaining == 0 {
                        // Batch exhausted: yield the rest to a fresh task
                        let scheduler = state.subscriber.scheduler().clone();
                        schedule(&scheduler, state);
                        return;
                    }
                }
                Ok(Ack::Stop) => {
                    state.finalize_detached(&ExitOutcome::Canceled);
                    return;
                }
                Ok(deferred @ Ack::Deferred(_)) => match deferred.resolved().await {
                    Ok(AckValue::Continue) => remaining = state.batch_size,
                    Ok(AckValue::Stop) => {
                        state.finalize_detached(&ExitOutcome::Canceled);
                        return;
                    }
                    Err(error) => {
                        state.finish_error(error);
                        return;
                    }
                },
            },
        }
    }
}

impl<I, A> EmissionLoop<I, A>
where
    I: Iterator<Item = Result<A>> + Send + 'static,
    A: Send + 'static,
{
    /// Normal completion: a finalizer failure pre-empts the pending
    /// `on_complete` and becomes the pipeline's terminal error.
    fn finish_complete(&mut self) {
        match self.run_finalizer(&ExitOutcome::Completed) {
            Ok(()) => self.subscriber.on_complete(),
            Err(error) => self.subscriber.on_error(error),
        }
    }

    /// Failure termination: the stream's own error is the terminal event; a
    /// finalizer failure on top of it goes to the out-of-band channel (one
    /// terminal per subscription, never two).
    fn finish_error(&mut self, error: RivusError) {
        if let Err(finalizer_error) = self.run_finalizer(&ExitOutcome::Errored(error.clone())) {
            self.subscriber.scheduler().report_failure(finalizer_error);
        }
        self.subscriber.on_error(error);
    }

    /// The downstream revoked its interest (`Stop` or cancel): nothing may
    /// be delivered any more, including finalizer failures.
    fn finalize_detached(&mut self, outcome: &ExitOutcome) {
        if let Err(finalizer_error) = self.run_finalizer(outcome) {
            self.subscriber.scheduler().report_failure(finalizer_error);
        }
    }

    fn run_finalizer(&mut self, outcome: &ExitOutcome) -> Result<()> {
        match self.finalizer.take() {
            Some(finalizer) => finalizer(outcome),
            None => Ok(()),
        }
    }
}
