// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the commonly used traits and types.
//!
//! Import this module for convenient access to the full pipeline surface:
//!
//! ```ignore
//! use rivus::prelude::*;
//!
//! let totals = Observable::from_iter(|| readings())
//!     .distinct_until_changed()
//!     .scan(|| Ok(0), |acc, x| Ok(acc + x))
//!     .take_while(|total| Ok(*total < 100));
//! ```
//!
//! # Contents
//!
//! ## Types
//!
//! - [`Observable`] - The subscribe-on-demand producer and its combinators
//! - [`Ack`] / [`AckValue`] / [`DeferredAck`] - Acknowledgement signals
//! - [`Subscriber`] - An observer bound to its scheduler
//! - [`Cancelable`] - Idempotent subscription handle
//! - [`Notification`] - Reified events for materialize/dematerialize
//! - [`Resource`] / [`Acquired`] / [`ExitOutcome`] - Bracketed acquisition
//! - [`RivusError`] - The pipeline error type
//!
//! ## Traits
//!
//! - [`Observer`] - The downstream endpoint contract
//! - [`ObservableSource`] - Raw producers wrappable into an [`Observable`]
//! - [`Operator`] - Subscriber-to-subscriber transformations
//! - [`Scheduler`] - The execution context contract
//!
//! ## Consumers
//!
//! - [`CallbackObserver`] - An observer assembled from closures

pub use rivus_core::{
    Ack, AckValue, CallbackObserver, Cancelable, DeferredAck, Notification, Observer, Result,
    RivusError, Scheduler, SchedulerRef, Subscriber,
};
#[cfg(feature = "runtime-tokio")]
pub use rivus_runtime::TokioScheduler;
pub use rivus_stream::{
    Acquired, ExitOutcome, Observable, ObservableSource, Operator, Resource,
};
