// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;

use rivus_core::{Notification, RivusError};
use rivus_stream::Observable;
use rivus_test_utils::helpers::assert_emitted_then_completed;
use rivus_test_utils::{RecordingObserver, TestScheduler};

#[test]
fn materialize_reifies_elements_and_completion() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| vec![1, 2])
        .materialize()
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    let values = log.values();
    assert_eq!(values.len(), 3);
    assert!(matches!(values[0], Notification::OnNext(1)));
    assert!(matches!(values[1], Notification::OnNext(2)));
    assert!(matches!(values[2], Notification::OnComplete));
    assert!(log.is_completed());
    assert_eq!(log.terminal_count(), 1);
}

#[test]
fn materialize_turns_failure_into_data_plus_completion() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::<i32>::raise_error(RivusError::stream_error("boom"))
        .materialize()
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    let values = log.values();
    assert_eq!(values.len(), 1);
    assert!(matches!(values[0], Notification::OnError(_)));
    assert!(log.is_completed(), "materialized streams end well");
    assert!(log.error().is_none());
}

#[test]
fn dematerialize_replays_reified_events() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| {
        vec![
            Notification::OnNext(10),
            Notification::OnNext(20),
            Notification::OnComplete,
        ]
    })
    .dematerialize()
    .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[10, 20]);
}

#[test]
fn dematerialize_replays_a_reified_error() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| {
        vec![
            Notification::OnNext(1),
            Notification::OnError(RivusError::stream_error("replayed failure")),
        ]
    })
    .dematerialize()
    .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_eq!(log.values(), vec![1]);
    assert!(log.error().is_some());
    assert_eq!(log.terminal_count(), 1);
}

#[test]
fn inner_completion_stops_the_upstream() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| {
        vec![
            Notification::OnNext(1),
            Notification::OnComplete,
            Notification::OnNext(99),
        ]
    })
    .dematerialize()
    .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[1]);
}

#[test]
fn dematerialize_after_materialize_is_the_identity() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| 1..=5)
        .materialize()
        .dematerialize()
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[1, 2, 3, 4, 5]);
}

#[test]
fn round_trip_preserves_failure_semantics() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::<i32>::raise_error(RivusError::stream_error("round trip"))
        .materialize()
        .dematerialize()
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert!(log.values().is_empty());
    assert!(log.error().is_some());
    assert_eq!(log.terminal_count(), 1);
}
