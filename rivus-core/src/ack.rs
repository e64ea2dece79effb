// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The acknowledgement signal that drives back-pressure.
//!
//! Every `on_next` call answers with an [`Ack`]: either an immediate verdict
//! ([`Ack::Continue`] / [`Ack::Stop`]) or a [`DeferredAck`] that resolves to
//! one later. A producer must not emit the next element until the previous
//! acknowledgement has resolved; this single rule is the whole flow-control
//! discipline of the library.

use core::fmt;
use core::future::Future;
use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::FutureExt;

use crate::{Result, RivusError};

/// Reply from a consumer to a producer governing further demand.
///
/// # Example
///
/// ```
/// use rivus_core::{Ack, AckValue};
///
/// # futures::executor::block_on(async {
/// let (sender, ack) = rivus_core::DeferredAck::channel();
/// assert!(ack.is_deferred());
///
/// sender.continue_();
/// assert_eq!(ack.resolved().await.unwrap(), AckValue::Continue);
/// # });
/// ```
pub enum Ack {
    /// The consumer is ready for the next element immediately.
    Continue,
    /// The consumer refuses further elements. Terminal from the consumer's
    /// point of view: the producer must emit no further events, including
    /// `on_complete` and `on_error`.
    Stop,
    /// The verdict is not known yet; the producer must suspend until the
    /// wrapped future resolves.
    Deferred(DeferredAck),
}

/// The final verdict a (possibly deferred) acknowledgement resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckValue {
    /// Ready for more elements.
    Continue,
    /// No further events accepted.
    Stop,
}

impl Ack {
    /// Resolve this acknowledgement to its final [`AckValue`].
    ///
    /// Immediate acknowledgements resolve without suspending. Deferred
    /// acknowledgements are awaited; a deferred reply may itself be
    /// deferred again, so resolution loops until an immediate verdict
    /// appears.
    ///
    /// # Errors
    ///
    /// Returns the consumer's error when it failed asynchronously instead
    /// of replying. The producer must treat this as a failed subscription:
    /// route the error into the pipeline's `on_error` if not already
    /// terminated, then cease.
    pub async fn resolved(self) -> Result<AckValue> {
        let mut ack = self;
        loop {
            match ack {
                Ack::Continue => return Ok(AckValue::Continue),
                Ack::Stop => return Ok(AckValue::Stop),
                Ack::Deferred(deferred) => ack = deferred.inner.await?,
            }
        }
    }

    /// Whether this acknowledgement still has to resolve asynchronously.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl From<AckValue> for Ack {
    fn from(value: AckValue) -> Self {
        match value {
            AckValue::Continue => Self::Continue,
            AckValue::Stop => Self::Stop,
        }
    }
}

impl fmt::Debug for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => f.write_str("Continue"),
            Self::Stop => f.write_str("Stop"),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// An acknowledgement whose verdict arrives later.
pub struct DeferredAck {
    inner: BoxFuture<'static, Result<Ack>>,
}

impl DeferredAck {
    /// Wrap an arbitrary future as a deferred acknowledgement.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<Ack>> + Send + 'static,
    {
        Self {
            inner: future.boxed(),
        }
    }

    /// Create a deferred acknowledgement together with the [`AckSender`]
    /// that will eventually resolve it.
    ///
    /// Dropping the sender without replying resolves the acknowledgement
    /// with an API contract violation: a consumer that walks away without
    /// answering has broken the protocol, and the producer must learn about
    /// it rather than hang forever.
    pub fn channel() -> (AckSender, Ack) {
        let (tx, rx) = oneshot::channel();
        let ack = Ack::Deferred(Self::new(async move {
            match rx.await {
                Ok(reply) => reply,
                Err(oneshot::Canceled) => Err(RivusError::api_contract_violation(
                    "deferred acknowledgement dropped without a reply",
                )),
            }
        }));
        (AckSender { tx }, ack)
    }
}

impl fmt::Debug for DeferredAck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredAck(..)")
    }
}

/// Resolves a [`DeferredAck`] created by [`DeferredAck::channel`].
pub struct AckSender {
    tx: oneshot::Sender<Result<Ack>>,
}

impl fmt::Debug for AckSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AckSender(..)")
    }
}

impl AckSender {
    /// Resolve the acknowledgement with [`Ack::Continue`].
    pub fn continue_(self) {
        let _ = self.tx.send(Ok(Ack::Continue));
    }

    /// Resolve the acknowledgement with [`Ack::Stop`].
    pub fn stop(self) {
        let _ = self.tx.send(Ok(Ack::Stop));
    }

    /// Fail the acknowledgement: the consumer errored asynchronously while
    /// processing the element it was acknowledging.
    pub fn fail(self, error: RivusError) {
        let _ = self.tx.send(Err(error));
    }
}
