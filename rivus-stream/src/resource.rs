// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bracketed acquisition of subscription-scoped resources.

use core::fmt;

use rivus_core::Result;
use rivus_core::RivusError;

/// Why a subscription released its resource.
#[derive(Debug, Clone)]
pub enum ExitOutcome {
    /// The source ran out of elements and the stream completed.
    Completed,
    /// The stream failed with this error.
    Errored(RivusError),
    /// The downstream stopped demanding (`Stop`) or the subscription was
    /// canceled externally.
    Canceled,
}

/// Finalizer invoked with the [`ExitOutcome`] when a subscription releases
/// its resource. Runs exactly once per subscription; it may itself fail.
pub type Finalizer = Box<dyn FnOnce(&ExitOutcome) -> Result<()> + Send>;

/// A successfully acquired resource paired with its finalizer.
pub struct Acquired<T> {
    pub(crate) value: T,
    pub(crate) finalizer: Finalizer,
}

impl<T> Acquired<T> {
    /// Pair a value with the finalizer releasing it.
    pub fn new<F>(value: T, finalizer: F) -> Self
    where
        F: FnOnce(&ExitOutcome) -> Result<()> + Send + 'static,
    {
        Self {
            value,
            finalizer: Box::new(finalizer),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Acquired<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acquired")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// A bracketed acquisition: a fallible one-shot producer of a value plus
/// the finalizer that releases it.
///
/// The acquisition runs when the owning observable is subscribed; an
/// acquisition failure fails the subscription with `on_error` before any
/// element is produced, and in that case the finalizer never existed so
/// nothing is released.
pub struct Resource<T> {
    acquire: Box<dyn FnOnce() -> Result<Acquired<T>> + Send>,
}

impl<T> Resource<T> {
    /// Define a resource by its acquisition step.
    pub fn new<F>(acquire: F) -> Self
    where
        F: FnOnce() -> Result<Acquired<T>> + Send + 'static,
    {
        Self {
            acquire: Box::new(acquire),
        }
    }

    pub(crate) fn acquire(self) -> Result<Acquired<T>> {
        (self.acquire)()
    }
}

impl<T> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resource(..)")
    }
}
