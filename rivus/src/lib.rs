// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

//! Push-based reactive streams with explicit back-pressure.
//!
//! rivus composes asynchronous producer→consumer pipelines around a simple
//! protocol: every `on_next` answers with an acknowledgement (`Continue`,
//! `Stop`, or a deferred verdict) and the producer never emits again until
//! that acknowledgement resolves. Streams terminate lawfully (at most one
//! `on_complete` or `on_error`), subscriptions are cancellable, and
//! bracketed resources are released exactly once.
//!
//! # Quick start
//!
//! ```
//! use rivus::prelude::*;
//! use rivus_test_utils::{RecordingObserver, TestScheduler};
//! use std::sync::Arc;
//!
//! let scheduler = Arc::new(TestScheduler::new());
//! let (observer, log) = RecordingObserver::new();
//!
//! Observable::from_iter(|| 1..=10)
//!     .filter(|x| Ok(x % 2 == 0))
//!     .reduce(|a, b| Ok(a + b))
//!     .subscribe(observer, scheduler.clone());
//!
//! scheduler.run_until_idle();
//! assert_eq!(log.values(), vec![30]);
//! ```
//!
//! The [`prelude`] pulls in the observable type, the protocol traits and
//! the error type; the member crates remain available for fine-grained
//! imports.

pub mod prelude;

pub use rivus_core::{
    Ack, AckSender, AckValue, CallbackObserver, Cancelable, DeferredAck, ExecutionModel,
    Notification, Observer, Result, RivusError, Scheduler, SchedulerRef, Subscriber, Task,
};
#[cfg(feature = "runtime-tokio")]
pub use rivus_runtime::TokioScheduler;
pub use rivus_stream::{
    Acquired, ExitOutcome, Finalizer, Observable, ObservableSource, Operator, Resource,
    SafeObserver,
};
