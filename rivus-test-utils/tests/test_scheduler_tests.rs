// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::sync::atomic::{AtomicUsize, Ordering};
use core::time::Duration;
use std::sync::Arc;

use futures::channel::oneshot;
use parking_lot::Mutex;
use rivus_core::{RivusError, Scheduler};
use rivus_test_utils::TestScheduler;

#[test]
fn tasks_run_in_submission_order() {
    let scheduler = TestScheduler::new();
    let order: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));

    for i in 0..3 {
        let order = Arc::clone(&order);
        scheduler.execute(Box::pin(async move {
            order.lock().push(i);
        }));
    }
    scheduler.run_until_idle();

    assert_eq!(*order.lock(), vec![0, 1, 2]);
}

#[test]
fn tasks_spawned_by_tasks_run_in_the_same_drain() {
    let scheduler = Arc::new(TestScheduler::new());
    let hits = Arc::new(AtomicUsize::new(0));

    let inner_scheduler = Arc::clone(&scheduler);
    let inner_hits = Arc::clone(&hits);
    scheduler.execute(Box::pin(async move {
        let hits = Arc::clone(&inner_hits);
        inner_scheduler.execute(Box::pin(async move {
            hits.fetch_add(1, Ordering::SeqCst);
        }));
        inner_hits.fetch_add(1, Ordering::SeqCst);
    }));
    scheduler.run_until_idle();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(scheduler.is_quiescent());
}

#[test]
fn parked_task_resumes_when_woken() {
    let scheduler = TestScheduler::new();
    let (tx, rx) = oneshot::channel::<u32>();
    let received: Arc<Mutex<Option<u32>>> = Arc::new(Mutex::new(None));

    let slot = Arc::clone(&received);
    scheduler.execute(Box::pin(async move {
        if let Ok(value) = rx.await {
            *slot.lock() = Some(value);
        }
    }));

    scheduler.run_until_idle();
    assert_eq!(*received.lock(), None);
    assert!(!scheduler.is_quiescent(), "task should be parked");

    tx.send(7).unwrap();
    scheduler.run_until_idle();
    assert_eq!(*received.lock(), Some(7));
    assert!(scheduler.is_quiescent());
}

#[test]
fn timers_fire_in_deadline_order() {
    let scheduler = TestScheduler::new();
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let late = Arc::clone(&order);
    scheduler.schedule_after(
        Duration::from_secs(10),
        Box::pin(async move { late.lock().push("late") }),
    );
    let early = Arc::clone(&order);
    scheduler.schedule_after(
        Duration::from_secs(1),
        Box::pin(async move { early.lock().push("early") }),
    );

    scheduler.advance(Duration::from_secs(30));
    assert_eq!(*order.lock(), vec!["early", "late"]);
    assert_eq!(scheduler.now(), Duration::from_secs(30));
}

#[test]
fn canceled_timer_never_fires() {
    let scheduler = TestScheduler::new();
    let fired = Arc::new(AtomicUsize::new(0));

    let hits = Arc::clone(&fired);
    let handle = scheduler.schedule_after(
        Duration::from_secs(5),
        Box::pin(async move {
            hits.fetch_add(1, Ordering::SeqCst);
        }),
    );
    handle.cancel();

    scheduler.advance(Duration::from_secs(10));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(scheduler.is_quiescent());
}

#[test]
fn advance_stops_at_the_target_between_timers() {
    let scheduler = TestScheduler::new();
    let fired = Arc::new(AtomicUsize::new(0));

    let hits = Arc::clone(&fired);
    scheduler.schedule_after(
        Duration::from_secs(5),
        Box::pin(async move {
            hits.fetch_add(1, Ordering::SeqCst);
        }),
    );

    scheduler.advance(Duration::from_secs(4));
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    scheduler.advance(Duration::from_secs(1));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn failures_are_captured_in_order() {
    let scheduler = TestScheduler::new();
    scheduler.report_failure(RivusError::stream_error("first"));
    scheduler.report_failure(RivusError::timeout_error("second"));

    let failures = scheduler.failures();
    assert_eq!(failures.len(), 2);
    assert!(matches!(failures[0], RivusError::Processing { .. }));
    assert!(matches!(failures[1], RivusError::Timeout { .. }));
}
