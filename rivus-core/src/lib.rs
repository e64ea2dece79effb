// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

//! Core contracts of the rivus push-based reactive stream library.
//!
//! This crate defines the protocol everything else is built on:
//!
//! - [`Ack`] - the three-valued acknowledgement governing back-pressure
//! - [`Observer`] - the downstream endpoint contract
//! - [`Subscriber`] - an observer bound to its [`Scheduler`]
//! - [`Cancelable`] - the idempotent subscription handle
//! - [`Notification`] - reified stream events
//! - [`RivusError`] - the single error type flowing through pipelines
//!
//! Concrete schedulers live in `rivus-runtime`; observables and the
//! operator engine live in `rivus-stream`.

pub mod ack;
pub mod cancelable;
pub mod logging;
pub mod notification;
pub mod observer;
pub mod rivus_error;
pub mod scheduler;
pub mod subscriber;

pub use ack::{Ack, AckSender, AckValue, DeferredAck};
pub use cancelable::Cancelable;
pub use notification::Notification;
pub use observer::{CallbackObserver, Observer};
pub use rivus_error::{Result, RivusError};
pub use scheduler::{ExecutionModel, Scheduler, SchedulerRef, Task};
pub use subscriber::Subscriber;
