// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

//! Test utilities for rivus pipelines.
//!
//! - [`TestScheduler`] - deterministic executor with virtual time, captured
//!   failure reports and a quiescence check for teardown assertions
//! - [`RecordingObserver`] / [`ManualAckObserver`] - consumers that record
//!   every event and reply with scripted or hand-driven acknowledgements
//! - [`helpers`] - the assertions most operator tests end with

pub mod helpers;
pub mod recording;
pub mod test_scheduler;

pub use recording::{AckController, EventLog, ManualAckObserver, RecordedEvent, RecordingObserver};
pub use test_scheduler::TestScheduler;
