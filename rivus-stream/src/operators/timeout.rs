// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timeout on a slow upstream, with an optional backup source.
//!
//! Not a plain lifted operator: firing the deadline must cancel the
//! upstream subscription, so this wraps the source observable itself and
//! keeps the upstream handle next to the per-subscription state.

use core::time::Duration;
use parking_lot::Mutex;
use std::sync::Arc;

use rivus_core::{
    Ack, Cancelable, Observer, Result, RivusError, Scheduler, SchedulerRef, Subscriber,
};

use crate::observable::{Observable, ObservableSource};

/// Fails (or switches to a backup) when the interval between consecutive
/// emissions exceeds `timeout`.
///
/// Every emission re-arms a deadline tagged with the emission index; a
/// deadline firing against a stale index is a no-op. All transitions are
/// guarded by the per-subscription mutex, so a racing emission and deadline
/// serialise cleanly.
pub(crate) struct TimeoutSource<A: Send + 'static> {
    pub(crate) source: Arc<dyn ObservableSource<Item = A>>,
    pub(crate) timeout: Duration,
    pub(crate) backup: Option<Observable<A>>,
}

struct TimeoutState<A: Send + 'static> {
    downstream: Subscriber<A>,
    /// Bumped on every emission; deadlines only fire on the index they
    /// were armed with.
    index: u64,
    terminated: bool,
    timer: Cancelable,
}

struct ArmContext<A: Send + 'static> {
    scheduler: SchedulerRef,
    timeout: Duration,
    upstream: Cancelable,
    backup: Option<Observable<A>>,
    outer: Cancelable,
}

impl<A: Send + 'static> ObservableSource for TimeoutSource<A> {
    type Item = A;

    fn unsafe_subscribe(&self, subscriber: Subscriber<A>) -> Cancelable {
        let scheduler = subscriber.scheduler().clone();
        let outer = Cancelable::new();
        // Slot for the upstream handle: the first deadline can be armed
        // before the source subscription exists
        let upstream_slot = Cancelable::new();

        let shared = Arc::new(Mutex::new(TimeoutState {
            downstream: subscriber,
            index: 0,
            terminated: false,
            timer: Cancelable::new(),
        }));
        let ctx = Arc::new(ArmContext {
            scheduler: scheduler.clone(),
            timeout: self.timeout,
            upstream: upstream_slot.clone(),
            backup: self.backup.clone(),
            outer: outer.clone(),
        });

        arm(&ctx, &shared, 0);

        let observer = TimeoutObserver {
            shared: Arc::clone(&shared),
            ctx: Arc::clone(&ctx),
        };
        let upstream = self
            .source
            .unsafe_subscribe(Subscriber::new(observer, scheduler));
        upstream_slot.attach_child(upstream);
        outer.attach_child(upstream_slot);
        outer
    }
}

/// Arm the deadline for the given emission index.
fn arm<A: Send + 'static>(
    ctx: &Arc<ArmContext<A>>,
    shared: &Arc<Mutex<TimeoutState<A>>>,
    expected_index: u64,
) {
    let task_ctx = Arc::clone(ctx);
    let task_shared = Arc::clone(shared);
    let task = async move {
        let mut state = task_shared.lock();
        if state.terminated || state.index != expected_index || task_ctx.outer.is_canceled() {
            return;
        }
        state.terminated = true;
        task_ctx.upstream.cancel();
        match &task_ctx.backup {
            None => {
                state.downstream.on_error(RivusError::timeout_error(format!(
                    "upstream idle for {:?}",
                    task_ctx.timeout
                )));
            }
            Some(backup) => {
                // The silenced upstream can no longer reach the downstream;
                // the relay takes over feeding it
                let relay = Subscriber::new(
                    RelayObserver {
                        shared: Arc::clone(&task_shared),
                        scheduler: task_ctx.scheduler.clone(),
                        done: false,
                    },
                    task_ctx.scheduler.clone(),
                );
                let backup = backup.clone();
                drop(state);
                let token = backup.unsafe_subscribe(relay);
                task_ctx.outer.attach_child(token);
            }
        }
    };
    let timer = ctx.scheduler.schedule_after(ctx.timeout, Box::pin(task));

    let mut state = shared.lock();
    if state.terminated {
        timer.cancel();
        return;
    }
    state.timer.cancel();
    state.timer = timer.clone();
    drop(state);
    ctx.outer.attach_child(timer);
}

struct TimeoutObserver<A: Send + 'static> {
    shared: Arc<Mutex<TimeoutState<A>>>,
    ctx: Arc<ArmContext<A>>,
}

impl<A: Send + 'static> Observer for TimeoutObserver<A> {
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        let mut state = self.shared.lock();
        if state.terminated {
            return Ok(Ack::Stop);
        }
        state.index += 1;
        state.timer.cancel();
        let ack = match state.downstream.on_next(item) {
            Ok(Ack::Stop) => {
                state.terminated = true;
                Ack::Stop
            }
            Ok(ack) => ack,
            Err(error) => {
                state.terminated = true;
                self.ctx.scheduler.report_failure(error);
                Ack::Stop
            }
        };
        let live = !state.terminated;
        let next_index = state.index;
        drop(state);
        if live {
            arm(&self.ctx, &self.shared, next_index);
        }
        Ok(ack)
    }

    fn on_complete(&mut self) {
        let mut state = self.shared.lock();
        if !state.terminated {
            state.terminated = true;
            state.timer.cancel();
            state.downstream.on_complete();
        }
    }

    fn on_error(&mut self, error: RivusError) {
        let mut state = self.shared.lock();
        if !state.terminated {
            state.terminated = true;
            state.timer.cancel();
            state.downstream.on_error(error);
        }
    }
}

/// Feeds the backup observable into the original downstream after a switch.
struct RelayObserver<A: Send + 'static> {
    shared: Arc<Mutex<TimeoutState<A>>>,
    scheduler: SchedulerRef,
    done: bool,
}

impl<A: Send + 'static> Observer for RelayObserver<A> {
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        if self.done {
            return Ok(Ack::Stop);
        }
        let mut state = self.shared.lock();
        match state.downstream.on_next(item) {
            Ok(Ack::Stop) => {
                self.done = true;
                Ok(Ack::Stop)
            }
            Ok(ack) => Ok(ack),
            Err(error) => {
                self.done = true;
                drop(state);
                self.scheduler.report_failure(error);
                Ok(Ack::Stop)
            }
        }
    }

    fn on_complete(&mut self) {
        if !self.done {
            self.done = true;
            self.shared.lock().downstream.on_complete();
        }
    }

    fn on_error(&mut self, error: RivusError) {
        if !self.done {
            self.done = true;
            self.shared.lock().downstream.on_error(error);
        }
    }
}
