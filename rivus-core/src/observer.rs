// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The downstream endpoint of a pipeline.

use crate::{Ack, Result, RivusError};

/// A consumer of a stream of elements.
///
/// # Contract
///
/// 1. **Grammar**: zero or more `on_next` calls, then at most one of
///    `on_complete` or `on_error`. No event follows a terminal.
/// 2. **Serialisation**: calls are never concurrent; the next `on_next`
///    awaits resolution of the previous one's acknowledgement.
/// 3. **Back-pressure**: answering [`Ack::Stop`] is terminal from the
///    consumer's point of view; the producer emits nothing further, not
///    even a terminal event.
/// 4. **Failure**: `on_next` may fail; an `Err` is equivalent to `Stop`
///    plus surfacing the error into the pipeline. `on_complete` and
///    `on_error` are infallible by signature; there is nowhere left for
///    their errors to go.
pub trait Observer: Send {
    /// The element type this observer consumes.
    type Item;

    /// Feed the next element, answering with the demand for more.
    fn on_next(&mut self, item: Self::Item) -> Result<Ack>;

    /// The stream finished successfully.
    fn on_complete(&mut self);

    /// The stream failed; `error` is the final event.
    fn on_error(&mut self, error: RivusError);
}

type OnNextFn<A> = Box<dyn FnMut(A) -> Result<Ack> + Send>;
type OnCompleteFn = Box<dyn FnOnce() + Send>;
type OnErrorFn = Box<dyn FnOnce(RivusError) + Send>;

/// An [`Observer`] assembled from closures.
///
/// Useful for terminal subscriptions where defining a type per consumer
/// would be noise:
///
/// ```
/// use rivus_core::{Ack, CallbackObserver};
///
/// let observer = CallbackObserver::new(|item: u64| {
///     println!("got {item}");
///     Ok(Ack::Continue)
/// })
/// .on_complete(|| println!("done"))
/// .on_error(|e| eprintln!("failed: {e}"));
/// # let _ = observer;
/// ```
pub struct CallbackObserver<A> {
    next_fn: OnNextFn<A>,
    complete_fn: Option<OnCompleteFn>,
    error_fn: Option<OnErrorFn>,
}

impl<A> CallbackObserver<A> {
    /// Build an observer from an `on_next` handler.
    ///
    /// Completion defaults to a no-op; an unhandled error is logged.
    pub fn new<F>(next_fn: F) -> Self
    where
        F: FnMut(A) -> Result<Ack> + Send + 'static,
    {
        Self {
            next_fn: Box::new(next_fn),
            complete_fn: None,
            error_fn: None,
        }
    }

    /// Attach a completion handler.
    #[must_use]
    pub fn on_complete<F>(mut self, complete_fn: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.complete_fn = Some(Box::new(complete_fn));
        self
    }

    /// Attach an error handler.
    #[must_use]
    pub fn on_error<F>(mut self, error_fn: F) -> Self
    where
        F: FnOnce(RivusError) + Send + 'static,
    {
        self.error_fn = Some(Box::new(error_fn));
        self
    }
}

impl<A: Send> Observer for CallbackObserver<A> {
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        (self.next_fn)(item)
    }

    fn on_complete(&mut self) {
        if let Some(f) = self.complete_fn.take() {
            f();
        }
    }

    fn on_error(&mut self, error: RivusError) {
        match self.error_fn.take() {
            Some(f) => f(error),
            None => crate::logging::report_discarded("unhandled stream error", &error),
        }
    }
}
