// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The execution context every subscription runs on.
//!
//! The scheduler is the only entity shared between subscriptions. Producers
//! run their emission loops as scheduler tasks, deferred-acknowledgement
//! continuations resume on it, and protocol errors that may no longer enter
//! a terminated pipeline are surfaced through its failure channel.

use core::time::Duration;
use futures::future::BoxFuture;
use std::sync::Arc;

use crate::{Cancelable, RivusError};

/// A unit of work submitted to a [`Scheduler`].
pub type Task = BoxFuture<'static, ()>;

/// Shared handle to a scheduler.
pub type SchedulerRef = Arc<dyn Scheduler>;

/// An executor capable of running submitted tasks, firing delayed tasks and
/// reporting uncaught failures out-of-band.
///
/// Implementations must be safe for concurrent submission; everything else
/// in a pipeline is exclusively owned by its subscription.
pub trait Scheduler: Send + Sync + 'static {
    /// Submit a task for asynchronous execution.
    fn execute(&self, task: Task);

    /// Run a task after the given delay.
    ///
    /// The returned handle cancels the pending task; cancelling after the
    /// task ran is a no-op.
    fn schedule_after(&self, delay: Duration, task: Task) -> Cancelable;

    /// Out-of-band error sink.
    ///
    /// Receives errors that must not re-enter their pipeline: failures
    /// raised by a downstream that already received its terminal event, and
    /// finalizer errors after the downstream gave up.
    fn report_failure(&self, error: RivusError);

    /// Hint describing how this scheduler wants producers to yield.
    fn execution_model(&self) -> ExecutionModel {
        ExecutionModel::default()
    }
}

/// Describes how often a synchronous emission loop should yield back to the
/// scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionModel {
    /// After this many consecutive synchronous `Continue` acknowledgements a
    /// producer reschedules itself so other tasks get a turn.
    pub recommended_batch_size: usize,
}

impl ExecutionModel {
    /// Batched execution with an explicit batch size (clamped to at least 1).
    #[must_use]
    pub fn batched(recommended_batch_size: usize) -> Self {
        Self {
            recommended_batch_size: recommended_batch_size.max(1),
        }
    }
}

impl Default for ExecutionModel {
    fn default() -> Self {
        Self {
            recommended_batch_size: 1024,
        }
    }
}
