// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-tokio")]
use std::time::Duration;

#[cfg(feature = "runtime-tokio")]
use rivus_core::{logging, Cancelable, ExecutionModel, RivusError, Scheduler, Task};

/// Scheduler backed by the ambient Tokio runtime.
///
/// Tasks are spawned onto the runtime the calling code is running inside;
/// constructing one outside a runtime is fine, using it is not. Failures
/// reported out-of-band go through [`rivus_core::logging::report_discarded`]
/// (`tracing` when the feature is enabled, stderr otherwise).
#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    execution_model: ExecutionModel,
}

#[cfg(feature = "runtime-tokio")]
impl TokioScheduler {
    /// Scheduler with the default execution model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            execution_model: ExecutionModel::default(),
        }
    }

    /// Scheduler with an explicit batch size.
    #[must_use]
    pub fn with_execution_model(execution_model: ExecutionModel) -> Self {
        Self { execution_model }
    }
}

#[cfg(feature = "runtime-tokio")]
impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "runtime-tokio")]
impl Scheduler for TokioScheduler {
    fn execute(&self, task: Task) {
        tokio::spawn(task);
    }

    fn schedule_after(&self, delay: Duration, task: Task) -> Cancelable {
        let handle = Cancelable::new();
        let guard = handle.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(delay) => {
                    if !guard.is_canceled() {
                        task.await;
                    }
                }
                () = guard.canceled() => {}
            }
        });
        handle
    }

    fn report_failure(&self, err: RivusError) {
        logging::report_discarded("uncaught stream failure", &err);
    }

    fn execution_model(&self) -> ExecutionModel {
        self.execution_model
    }
}
