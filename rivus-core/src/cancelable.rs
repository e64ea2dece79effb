// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic cancellation handle.
//!
//! The handle returned by `subscribe`. Cancellation is advisory and
//! cooperative: producers observe the flag at scheduling boundaries, so an
//! in-flight `on_next` may still complete after `cancel()` returns.

use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use parking_lot::Mutex;
use std::sync::Arc;

/// Idempotent cancellation handle, safe to invoke from any context.
///
/// A `Cancelable` can be cloned to create multiple handles to the same
/// cancellation state. When `cancel()` is called on any clone, all waiters
/// on `canceled()` are notified and every attached child is canceled too.
///
/// # Example
///
/// ```
/// use rivus_core::Cancelable;
///
/// let handle = Cancelable::new();
/// let child = Cancelable::new();
/// handle.attach_child(child.clone());
///
/// handle.cancel();
/// assert!(handle.is_canceled());
/// assert!(child.is_canceled());
/// ```
#[derive(Clone, Debug)]
pub struct Cancelable {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    canceled: AtomicBool,
    event: Event,
    children: Mutex<Vec<Cancelable>>,
}

impl Cancelable {
    /// Create a new handle in the not-canceled state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                canceled: AtomicBool::new(false),
                event: Event::new(),
                children: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Sever the subscription.
    ///
    /// Idempotent: calling it multiple times is observationally equivalent
    /// to calling it once. Attached children are canceled in attachment
    /// order.
    pub fn cancel(&self) {
        // Flag first, release ordering, so waiters observe all prior writes
        if self.inner.canceled.swap(true, Ordering::AcqRel) {
            return;
        }
        self.inner.event.notify(usize::MAX);

        let children = std::mem::take(&mut *self.inner.children.lock());
        for child in children {
            child.cancel();
        }
    }

    /// Check whether the handle has been canceled (non-blocking).
    pub fn is_canceled(&self) -> bool {
        self.inner.canceled.load(Ordering::Acquire)
    }

    /// Tie another handle's lifetime to this one.
    ///
    /// The child is canceled when this handle is canceled; attaching to an
    /// already-canceled handle cancels the child immediately. Composite
    /// subscriptions (a timer plus an upstream plus a backup source) hang
    /// their parts off the single handle `subscribe` returned.
    pub fn attach_child(&self, child: Cancelable) {
        let mut children = self.inner.children.lock();
        // The flag is checked under the lock: cancel() sets it before
        // draining, so a child registered here is either drained or canceled
        if self.is_canceled() {
            drop(children);
            child.cancel();
        } else {
            children.retain(|c| !c.is_canceled());
            children.push(child);
        }
    }

    /// Wait asynchronously until the handle is canceled.
    ///
    /// Resolves immediately when already canceled.
    pub fn canceled(&self) -> Canceled<'_> {
        Canceled {
            handle: self,
            listener: None,
        }
    }
}

impl Default for Cancelable {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`Cancelable::canceled()`].
pub struct Canceled<'a> {
    handle: &'a Cancelable,
    listener: Option<EventListener>,
}

impl Future for Canceled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        // Fast path
        if self.handle.is_canceled() {
            return Poll::Ready(());
        }

        if self.listener.is_none() {
            self.listener = Some(self.handle.inner.event.listen());

            // Re-check after registering: cancel() may have slipped in
            // between the first check and listen()
            if self.handle.is_canceled() {
                return Poll::Ready(());
            }
        }

        match Pin::new(self.listener.as_mut().unwrap()).poll(cx) {
            Poll::Ready(()) => Poll::Ready(()),
            Poll::Pending => Poll::Pending,
        }
    }
}
