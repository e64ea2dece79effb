// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;

use rivus_core::RivusError;
use rivus_stream::Observable;
use rivus_test_utils::helpers::assert_emitted_then_completed;
use rivus_test_utils::{RecordingObserver, TestScheduler};

#[test]
fn identity_key_suppresses_consecutive_duplicates() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| vec![1, 1, 2, 2, 3, 1, 1])
        .distinct_until_changed()
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[1, 2, 3, 1]);
}

#[test]
fn key_projection_decides_equivalence() {
    // key x mod 2 over [1, 3, 5, 2, 4, 3]: runs of equal parity collapse
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| vec![1, 3, 5, 2, 4, 3])
        .distinct_until_changed_by_key(|x| Ok(x % 2), |a, b| a == b)
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[1, 2, 3]);
}

#[test]
fn custom_equivalence_need_not_be_equality() {
    // Two readings are "the same" when they differ by less than 10
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| vec![100, 104, 93, 120, 125, 50])
        .distinct_until_changed_by_key(|x| Ok(*x), |a: &i32, b: &i32| (a - b).abs() < 10)
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[100, 120, 50]);
}

#[test]
fn first_element_always_passes() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| vec![7])
        .distinct_until_changed()
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[7]);
}

#[test]
fn key_failure_routes_to_on_error() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| vec![1, 2, 3])
        .distinct_until_changed_by_key(
            |x: &i32| {
                if *x == 2 {
                    Err(RivusError::stream_error("key extraction failed"))
                } else {
                    Ok(*x)
                }
            },
            |a, b| a == b,
        )
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_eq!(log.values(), vec![1]);
    assert!(log.error().is_some());
    assert_eq!(log.terminal_count(), 1);
}
