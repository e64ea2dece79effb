// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The reified form of stream events.

use crate::RivusError;

/// A stream event as a value, used by the materialize/dematerialize
/// round-trip: `on_next`, `on_error` and `on_complete` each become an
/// element of an ordinary stream of `Notification`s.
#[derive(Debug, Clone)]
pub enum Notification<A> {
    /// A regular element.
    OnNext(A),
    /// The stream failed with this error.
    OnError(RivusError),
    /// The stream finished successfully.
    OnComplete,
}

impl<A> Notification<A> {
    /// Whether this notification is a terminal event.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::OnError(_) | Self::OnComplete)
    }

    /// The carried element, if any.
    pub fn into_value(self) -> Option<A> {
        match self {
            Self::OnNext(value) => Some(value),
            _ => None,
        }
    }
}
