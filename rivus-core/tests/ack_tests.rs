// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::executor::block_on;
use rivus_core::{Ack, AckValue, DeferredAck, RivusError};

#[test]
fn immediate_acks_resolve_without_suspending() {
    assert_eq!(block_on(Ack::Continue.resolved()).unwrap(), AckValue::Continue);
    assert_eq!(block_on(Ack::Stop.resolved()).unwrap(), AckValue::Stop);
}

#[test]
fn channel_ack_resolves_to_continue() {
    let (sender, ack) = DeferredAck::channel();
    assert!(ack.is_deferred());

    sender.continue_();
    assert_eq!(block_on(ack.resolved()).unwrap(), AckValue::Continue);
}

#[test]
fn channel_ack_resolves_to_stop() {
    let (sender, ack) = DeferredAck::channel();
    sender.stop();
    assert_eq!(block_on(ack.resolved()).unwrap(), AckValue::Stop);
}

#[test]
fn channel_ack_carries_consumer_failure() {
    let (sender, ack) = DeferredAck::channel();
    sender.fail(RivusError::stream_error("consumer failed mid-element"));

    let error = block_on(ack.resolved()).unwrap_err();
    assert!(matches!(error, RivusError::Processing { .. }));
}

#[test]
fn dropped_sender_is_a_contract_violation() {
    let (sender, ack) = DeferredAck::channel();
    drop(sender);

    let error = block_on(ack.resolved()).unwrap_err();
    assert!(matches!(error, RivusError::ApiContractViolation { .. }));
}

#[test]
fn deferred_acks_chain_until_an_immediate_verdict() {
    // A deferred reply that is itself deferred: resolution must loop
    let inner = Ack::Deferred(DeferredAck::new(async { Ok(Ack::Stop) }));
    let outer = Ack::Deferred(DeferredAck::new(async move { Ok(inner) }));

    assert_eq!(block_on(outer.resolved()).unwrap(), AckValue::Stop);
}
