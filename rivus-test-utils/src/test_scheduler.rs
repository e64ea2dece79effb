// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A deterministic, hand-driven scheduler with virtual time.
//!
//! Nothing runs unless the test drives it: [`TestScheduler::run_until_idle`]
//! drains the ready queue, [`TestScheduler::advance`] moves the virtual
//! clock and fires due timers in deadline order. Failures reported through
//! the out-of-band channel are captured for assertion, and
//! [`TestScheduler::is_quiescent`] checks that a finished pipeline left no
//! task behind.

use core::task::{Context, Poll};
use core::time::Duration;
use futures::task::{self, ArcWake};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use rivus_core::{Cancelable, ExecutionModel, RivusError, Scheduler, Task};

type TaskId = u64;

struct Timer {
    due: Duration,
    seq: u64,
    handle: Cancelable,
    task: Task,
}

#[derive(Default)]
struct Inner {
    ready: VecDeque<(TaskId, Task)>,
    /// Tasks that returned `Pending` and wait for their waker.
    parked: HashMap<TaskId, Task>,
    /// The task currently being polled, with its woken-while-running flag.
    running: Option<(TaskId, bool)>,
    timers: Vec<Timer>,
    now: Duration,
    next_id: u64,
    next_timer_seq: u64,
    failures: Vec<RivusError>,
}

/// Deterministic scheduler for tests.
///
/// # Example
///
/// ```
/// use rivus_core::Scheduler;
/// use rivus_test_utils::TestScheduler;
///
/// let scheduler = TestScheduler::new();
/// scheduler.execute(Box::pin(async { /* runs when driven */ }));
/// assert!(!scheduler.is_quiescent());
///
/// scheduler.run_until_idle();
/// assert!(scheduler.is_quiescent());
/// ```
pub struct TestScheduler {
    inner: Arc<Mutex<Inner>>,
    execution_model: ExecutionModel,
}

impl TestScheduler {
    /// Scheduler with the default execution model.
    #[must_use]
    pub fn new() -> Self {
        Self::with_execution_model(ExecutionModel::default())
    }

    /// Scheduler with an explicit batch size, for tests that parameterise
    /// batch granularity instead of hard-coding it.
    #[must_use]
    pub fn with_execution_model(execution_model: ExecutionModel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            execution_model,
        }
    }

    /// Run ready tasks (and everything they make ready) until none is left.
    ///
    /// Parked tasks stay parked until their waker fires; timers only fire
    /// through [`advance`](Self::advance).
    pub fn run_until_idle(&self) {
        loop {
            let entry = self.inner.lock().ready.pop_front();
            let Some((id, mut task)) = entry else { break };

            self.inner.lock().running = Some((id, false));
            let waker = task::waker(Arc::new(TaskWaker {
                id,
                inner: Arc::clone(&self.inner),
            }));
            let mut cx = Context::from_waker(&waker);
            match task.as_mut().poll(&mut cx) {
                Poll::Ready(()) => {
                    self.inner.lock().running = None;
                }
                Poll::Pending => {
                    let mut inner = self.inner.lock();
                    let woken = matches!(inner.running, Some((rid, true)) if rid == id);
                    inner.running = None;
                    if woken {
                        inner.ready.push_back((id, task));
                    } else {
                        inner.parked.insert(id, task);
                    }
                }
            }
        }
    }

    /// Advance the virtual clock by `delta`, firing due timers in deadline
    /// order (ties in creation order) and running everything each firing
    /// makes ready.
    pub fn advance(&self, delta: Duration) {
        let target = self.inner.lock().now + delta;
        loop {
            let next = {
                let mut inner = self.inner.lock();
                inner.timers.retain(|t| !t.handle.is_canceled());
                let due_idx = inner
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(idx, _)| idx);
                match due_idx {
                    Some(idx) => {
                        let timer = inner.timers.swap_remove(idx);
                        inner.now = timer.due;
                        let id = inner.next_id;
                        inner.next_id += 1;
                        inner.ready.push_back((id, timer.task));
                        true
                    }
                    None => {
                        inner.now = target;
                        false
                    }
                }
            };
            self.run_until_idle();
            if !next {
                break;
            }
        }
    }

    /// The current virtual time.
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Whether the scheduler has nothing left to do: no ready task, no
    /// parked task, no live timer.
    pub fn is_quiescent(&self) -> bool {
        let inner = self.inner.lock();
        inner.ready.is_empty()
            && inner.parked.is_empty()
            && inner.timers.iter().all(|t| t.handle.is_canceled())
    }

    /// Failures captured from the out-of-band channel, in arrival order.
    pub fn failures(&self) -> Vec<RivusError> {
        self.inner.lock().failures.clone()
    }

    /// Number of captured out-of-band failures.
    pub fn failure_count(&self) -> usize {
        self.inner.lock().failures.len()
    }
}

impl Default for TestScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TestScheduler {
    fn execute(&self, task: Task) {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.ready.push_back((id, task));
    }

    fn schedule_after(&self, delay: Duration, task: Task) -> Cancelable {
        let handle = Cancelable::new();
        let mut inner = self.inner.lock();
        let due = inner.now + delay;
        let seq = inner.next_timer_seq;
        inner.next_timer_seq += 1;
        inner.timers.push(Timer {
            due,
            seq,
            handle: handle.clone(),
            task,
        });
        handle
    }

    fn report_failure(&self, error: RivusError) {
        self.inner.lock().failures.push(error);
    }

    fn execution_model(&self) -> ExecutionModel {
        self.execution_model
    }
}

struct TaskWaker {
    id: TaskId,
    inner: Arc<Mutex<Inner>>,
}

impl ArcWake for TaskWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        let mut inner = arc_self.inner.lock();
        if let Some(task) = inner.parked.remove(&arc_self.id) {
            inner.ready.push_back((arc_self.id, task));
        } else if let Some((running_id, woken)) = inner.running.as_mut() {
            if *running_id == arc_self.id {
                *woken = true;
            }
        }
        // A wake for a finished or already-ready task is a no-op
    }
}
