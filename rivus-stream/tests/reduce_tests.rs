// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;

use rivus_core::RivusError;
use rivus_stream::Observable;
use rivus_test_utils::helpers::{assert_emitted_then_completed, assert_emitted_then_errored};
use rivus_test_utils::{RecordingObserver, TestScheduler};

#[test]
fn reduce_over_empty_source_completes_without_emitting() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::<i32>::empty()
        .reduce(|a, b| Ok(a + b))
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[]);
    assert!(scheduler.is_quiescent());
}

#[test]
fn reduce_over_single_element_completes_without_emitting() {
    // One element is not enough to observe an application of the combiner
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| vec![42])
        .reduce(|a, b| Ok(a + b))
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[]);
}

#[test]
fn reduce_sums_a_multi_element_source() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| vec![1, 2, 3, 4])
        .reduce(|a, b| Ok(a + b))
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[10]);
    assert_eq!(scheduler.failure_count(), 0);
}

#[test]
fn reduce_forwards_the_source_error_immediately() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::<i32>::raise_error(RivusError::stream_error("source failed"))
        .reduce(|a, b| Ok(a + b))
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_errored(&log, &[]);
}

#[test]
fn combiner_failure_terminates_with_on_error() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| vec![1, 2, 3])
        .reduce(|_, _| Err(RivusError::stream_error("combiner failed")))
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert!(log.values().is_empty());
    assert!(log.error().is_some());
    assert_eq!(log.terminal_count(), 1);
}

#[test]
fn reduce_over_resubscribed_source_starts_fresh() {
    // Cold semantics: per-subscription state is never shared
    let scheduler = Arc::new(TestScheduler::new());
    let source = Observable::from_iter(|| vec![1, 2, 3]).reduce(|a, b| Ok(a + b));

    let (first, first_log) = RecordingObserver::new();
    source.subscribe(first, scheduler.clone());
    scheduler.run_until_idle();

    let (second, second_log) = RecordingObserver::new();
    source.subscribe(second, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&first_log, &[6]);
    assert_emitted_then_completed(&second_log, &[6]);
}
