// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Last-resort logging for errors with no pipeline left to enter.

use crate::RivusError;

/// Log a failure that could not be delivered through a pipeline.
///
/// This is the default sink behind [`Scheduler::report_failure`]
/// implementations and observers without an error handler: the error has
/// nowhere lawful to go, but swallowing it silently would hide real bugs.
///
/// Forwards to `tracing` when the `tracing` feature is enabled and falls
/// back to stderr otherwise, so embedders without a subscriber still see
/// discarded failures. The feature is resolved here, in the crate that
/// owns the error type, not at the call site.
///
/// [`Scheduler::report_failure`]: crate::Scheduler::report_failure
pub fn report_discarded(context: &str, error: &RivusError) {
    #[cfg(feature = "tracing")]
    tracing::error!("{context}: {error}");
    #[cfg(not(feature = "tracing"))]
    eprintln!("{context}: {error}");
}
