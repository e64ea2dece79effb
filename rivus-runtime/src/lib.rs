// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

//! Concrete [`Scheduler`](rivus_core::Scheduler) implementations.
//!
//! The library core only consumes the scheduler trait; this crate provides
//! the production implementation backed by Tokio. The deterministic
//! scheduler used by tests lives in `rivus-test-utils`.

pub mod impls;

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::TokioScheduler;
