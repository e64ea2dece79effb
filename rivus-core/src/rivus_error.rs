// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rivus reactive streaming library.
//!
//! A single root [`RivusError`] flows through every pipeline: it is the
//! payload of `on_error`, the failure value of deferred acknowledgements and
//! the argument handed to [`Scheduler::report_failure`] for protocol
//! violations that may no longer re-enter a terminated pipeline.
//!
//! [`Scheduler::report_failure`]: crate::Scheduler::report_failure

/// Root error type for all rivus operations.
#[derive(Debug, thiserror::Error)]
pub enum RivusError {
    /// Stream processing encountered an error.
    ///
    /// This is a general error for stream operations that don't fit
    /// other specific categories.
    #[error("stream processing error: {context}")]
    Processing {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code.
    ///
    /// Wraps errors produced by caller-supplied functions (predicates,
    /// selectors, reducers, seed producers) so they can travel through the
    /// pipeline as a terminal `on_error` event.
    #[error("user error: {0}")]
    User(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A time-based operator exceeded its configured interval.
    #[error("operation timed out: {context}")]
    Timeout {
        /// Context about the timeout (e.g. the configured duration)
        context: String,
    },

    /// The library was used outside its contract.
    ///
    /// Emitted for example when a single-subscriber source is subscribed a
    /// second time, or when a deferred acknowledgement is dropped without a
    /// reply.
    #[error("API contract violation: {context}")]
    ApiContractViolation {
        /// Which part of the contract was violated
        context: String,
    },
}

impl RivusError {
    /// Create a stream processing error with the given context.
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::Processing {
            context: context.into(),
        }
    }

    /// Wrap a user error.
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::User(Box::new(error))
    }

    /// Create a timeout error with the given context.
    pub fn timeout_error(context: impl Into<String>) -> Self {
        Self::Timeout {
            context: context.into(),
        }
    }

    /// Create an API contract violation error.
    pub fn api_contract_violation(context: impl Into<String>) -> Self {
        Self::ApiContractViolation {
            context: context.into(),
        }
    }

    /// Check whether this error was produced by caller-supplied code.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// Check whether this error is a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Specialized `Result` type for rivus operations.
pub type Result<T> = std::result::Result<T, RivusError>;

impl Clone for RivusError {
    fn clone(&self) -> Self {
        match self {
            Self::Processing { context } => Self::Processing {
                context: context.clone(),
            },
            // The boxed source cannot be cloned; downgrade to its rendering
            Self::User(e) => Self::Processing {
                context: format!("user error: {e}"),
            },
            Self::Timeout { context } => Self::Timeout {
                context: context.clone(),
            },
            Self::ApiContractViolation { context } => Self::ApiContractViolation {
                context: context.clone(),
            },
        }
    }
}
