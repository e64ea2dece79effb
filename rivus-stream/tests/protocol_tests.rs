// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Protocol-level tests driving observers by hand, without a producer:
//! grammar enforcement, post-termination behaviour and failure-channel
//! routing.

use std::sync::Arc;

use rivus_core::{Ack, Notification, Observer, RivusError, SchedulerRef, Subscriber};
use rivus_stream::operators::dematerialize::DematerializeOperator;
use rivus_stream::{Operator, SafeObserver};
use rivus_test_utils::{EventLog, RecordingObserver, TestScheduler};

fn safe_chain(
    scheduler: &Arc<TestScheduler>,
) -> (Subscriber<i32>, EventLog<i32>) {
    let scheduler_ref: SchedulerRef = scheduler.clone();
    let (observer, log) = RecordingObserver::new();
    let downstream = Subscriber::new(observer, scheduler_ref.clone());
    (
        Subscriber::new(SafeObserver::new(downstream), scheduler_ref),
        log,
    )
}

#[test]
fn events_after_completion_are_dropped() {
    let scheduler = Arc::new(TestScheduler::new());
    let (mut subscriber, log) = safe_chain(&scheduler);

    assert!(matches!(subscriber.on_next(1), Ok(Ack::Continue)));
    subscriber.on_complete();
    subscriber.on_complete();
    assert!(matches!(subscriber.on_next(2), Ok(Ack::Stop)));

    assert_eq!(log.values(), vec![1]);
    assert_eq!(log.terminal_count(), 1);
}

#[test]
fn error_after_termination_goes_to_the_failure_channel() {
    let scheduler = Arc::new(TestScheduler::new());
    let (mut subscriber, log) = safe_chain(&scheduler);

    subscriber.on_complete();
    subscriber.on_error(RivusError::stream_error("too late"));

    assert_eq!(log.terminal_count(), 1);
    assert!(log.is_completed());
    assert_eq!(scheduler.failure_count(), 1);
}

#[test]
fn consumer_failure_becomes_its_own_on_error() {
    let scheduler = Arc::new(TestScheduler::new());
    let scheduler_ref: SchedulerRef = scheduler.clone();
    let (observer, log) = RecordingObserver::replying(|index, _| {
        if index == 1 {
            Err(RivusError::stream_error("consumer choked"))
        } else {
            Ok(Ack::Continue)
        }
    });
    let downstream = Subscriber::new(observer, scheduler_ref.clone());
    let mut subscriber = Subscriber::new(SafeObserver::new(downstream), scheduler_ref);

    assert!(matches!(subscriber.on_next(1), Ok(Ack::Continue)));
    assert!(matches!(subscriber.on_next(2), Ok(Ack::Stop)));
    // The terminal the consumer received is its own converted failure
    assert_eq!(log.values(), vec![1, 2]);
    assert!(log.error().is_some());
    assert_eq!(log.terminal_count(), 1);

    // Upstream misbehaving afterwards changes nothing
    assert!(matches!(subscriber.on_next(3), Ok(Ack::Stop)));
    assert_eq!(log.values(), vec![1, 2]);
}

#[test]
fn stop_is_remembered_by_the_safe_layer() {
    let scheduler = Arc::new(TestScheduler::new());
    let scheduler_ref: SchedulerRef = scheduler.clone();
    let (observer, log) = RecordingObserver::replying(|index, _| {
        Ok(if index == 0 { Ack::Stop } else { Ack::Continue })
    });
    let downstream = Subscriber::new(observer, scheduler_ref.clone());
    let mut subscriber = Subscriber::new(SafeObserver::new(downstream), scheduler_ref);

    assert!(matches!(subscriber.on_next(1), Ok(Ack::Stop)));
    assert!(matches!(subscriber.on_next(2), Ok(Ack::Stop)));
    assert_eq!(log.values(), vec![1]);
    assert!(!log.is_terminated());
}

#[test]
fn dematerialize_diverts_post_termination_errors() {
    let scheduler = Arc::new(TestScheduler::new());
    let scheduler_ref: SchedulerRef = scheduler.clone();
    let (observer, log) = RecordingObserver::new();
    let downstream = Subscriber::new(observer, scheduler_ref);

    let operator: DematerializeOperator<i32> = DematerializeOperator::new();
    let mut upstream = operator.apply(downstream).unwrap();

    assert!(matches!(
        upstream.on_next(Notification::OnNext(5)),
        Ok(Ack::Continue)
    ));
    assert!(matches!(
        upstream.on_next(Notification::OnComplete),
        Ok(Ack::Stop)
    ));
    // Ignored: the inner terminal already fired
    assert!(matches!(
        upstream.on_next(Notification::OnNext(6)),
        Ok(Ack::Stop)
    ));
    upstream.on_complete();

    // A source error arriving after termination cannot re-enter
    upstream.on_error(RivusError::stream_error("late source failure"));

    assert_eq!(log.values(), vec![5]);
    assert_eq!(log.terminal_count(), 1);
    assert_eq!(scheduler.failure_count(), 1);
}

#[test]
fn dematerialize_forwards_the_source_terminal_when_no_inner_one_fired() {
    let scheduler = Arc::new(TestScheduler::new());
    let scheduler_ref: SchedulerRef = scheduler.clone();
    let (observer, log) = RecordingObserver::new();
    let downstream = Subscriber::new(observer, scheduler_ref);

    let operator: DematerializeOperator<i32> = DematerializeOperator::new();
    let mut upstream = operator.apply(downstream).unwrap();

    assert!(matches!(
        upstream.on_next(Notification::OnNext(5)),
        Ok(Ack::Continue)
    ));
    upstream.on_error(RivusError::stream_error("source failed"));

    assert_eq!(log.values(), vec![5]);
    assert!(log.error().is_some());
    assert_eq!(scheduler.failure_count(), 0);
}
