// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;

use rivus_stream::Observable;
use rivus_test_utils::helpers::assert_emitted_then_completed;
use rivus_test_utils::{RecordingObserver, TestScheduler};

#[test]
fn skip_drops_exactly_the_first_n() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| 0..6)
        .skip(3)
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[3, 4, 5]);
}

#[test]
fn skip_beyond_the_source_length_completes_empty() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| 0..3)
        .skip(10)
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[]);
}

#[test]
fn take_limits_and_completes_early() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| 0..100)
        .take(4)
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[0, 1, 2, 3]);
    assert_eq!(scheduler.failure_count(), 0);
}

#[test]
fn take_zero_completes_without_emitting() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| 0..5)
        .take(0)
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[]);
}

#[test]
fn skip_then_take_yields_the_window() {
    // drop(n) ∘ take(m) over [0..k] = [n .. min(n+m, k)-1]
    let cases = [(2usize, 3usize, 10), (0, 4, 4), (5, 10, 8), (7, 2, 6)];
    for (n, m, k) in cases {
        let scheduler = Arc::new(TestScheduler::new());
        let (observer, log) = RecordingObserver::new();

        Observable::from_iter(move || 0..k as i64)
            .skip(n)
            .take(m)
            .subscribe(observer, scheduler.clone());
        scheduler.run_until_idle();

        let expected: Vec<i64> = (n as i64..(n + m).min(k) as i64).collect();
        assert_emitted_then_completed(&log, &expected);
    }
}

#[test]
fn take_more_than_available_completes_with_the_source() {
    let scheduler = Arc::new(TestScheduler::new());
    let (observer, log) = RecordingObserver::new();

    Observable::from_iter(|| 0..3)
        .take(10)
        .subscribe(observer, scheduler.clone());
    scheduler.run_until_idle();

    assert_emitted_then_completed(&log, &[0, 1, 2]);
}
