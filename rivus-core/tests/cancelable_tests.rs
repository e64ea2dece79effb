// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::thread;
use std::time::Duration;

use futures::executor::block_on;
use rivus_core::Cancelable;

#[test]
fn cancel_is_idempotent() {
    let handle = Cancelable::new();
    assert!(!handle.is_canceled());

    handle.cancel();
    handle.cancel();
    handle.cancel();
    assert!(handle.is_canceled());
}

#[test]
fn clones_share_cancellation_state() {
    let handle = Cancelable::new();
    let clone = handle.clone();

    clone.cancel();
    assert!(handle.is_canceled());
}

#[test]
fn children_are_canceled_with_the_parent() {
    let parent = Cancelable::new();
    let first = Cancelable::new();
    let second = Cancelable::new();
    parent.attach_child(first.clone());
    parent.attach_child(second.clone());

    parent.cancel();
    assert!(first.is_canceled());
    assert!(second.is_canceled());
}

#[test]
fn attaching_to_a_canceled_parent_cancels_immediately() {
    let parent = Cancelable::new();
    parent.cancel();

    let child = Cancelable::new();
    parent.attach_child(child.clone());
    assert!(child.is_canceled());
}

#[test]
fn canceled_future_resolves_immediately_when_already_canceled() {
    let handle = Cancelable::new();
    handle.cancel();
    block_on(handle.canceled());
}

#[test]
fn canceled_future_wakes_on_cancel_from_another_thread() {
    let handle = Cancelable::new();
    let remote = handle.clone();

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        remote.cancel();
    });

    block_on(handle.canceled());
    assert!(handle.is_canceled());
    canceller.join().unwrap();
}
