// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

//! Observables, builders and the operator engine of rivus.
//!
//! Data flows from source to sink; control (cancellation, `Stop`) flows
//! sink to source. An [`Observable`] begins producing when subscribed and
//! hands back a cancellation handle; each operator sits between an upstream
//! observable and a downstream subscriber, wrapping the latter and
//! forwarding a transformed view upstream.

mod builders;
mod iter_source;
pub mod observable;
pub mod operator;
pub mod operators;
pub mod resource;
pub mod safe_observer;

pub use observable::{Observable, ObservableSource};
pub use operator::Operator;
pub use resource::{Acquired, ExitOutcome, Finalizer, Resource};
pub use safe_observer::SafeObserver;
