// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observers that record every event they see, with scripted or manually
//! driven acknowledgements.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use rivus_core::{Ack, AckSender, DeferredAck, Observer, Result, RivusError};

/// One recorded stream event.
#[derive(Debug, Clone)]
pub enum RecordedEvent<A> {
    Next(A),
    Complete,
    Error(RivusError),
}

/// Shared, cloneable view over the events an observer recorded.
pub struct EventLog<A> {
    events: Arc<Mutex<Vec<RecordedEvent<A>>>>,
}

impl<A> Clone for EventLog<A> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<A> EventLog<A> {
    fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All events recorded so far.
    pub fn events(&self) -> Vec<RecordedEvent<A>>
    where
        A: Clone,
    {
        self.events.lock().clone()
    }

    /// The recorded element values, in order.
    pub fn values(&self) -> Vec<A>
    where
        A: Clone,
    {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether `on_complete` was observed.
    pub fn is_completed(&self) -> bool {
        self.events
            .lock()
            .iter()
            .any(|event| matches!(event, RecordedEvent::Complete))
    }

    /// The observed terminal error, if any.
    pub fn error(&self) -> Option<RivusError> {
        self.events.lock().iter().find_map(|event| match event {
            RecordedEvent::Error(error) => Some(error.clone()),
            _ => None,
        })
    }

    /// Whether any terminal event was observed.
    pub fn is_terminated(&self) -> bool {
        self.events.lock().iter().any(RecordedEvent::is_terminal)
    }

    /// Number of terminal events observed. Anything above one is a grammar
    /// violation worth failing a test over.
    pub fn terminal_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| event.is_terminal())
            .count()
    }

    fn push(&self, event: RecordedEvent<A>) {
        self.events.lock().push(event);
    }
}

impl<A> RecordedEvent<A> {
    fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error(_))
    }
}

type AckFn<A> = Box<dyn FnMut(usize, &A) -> Result<Ack> + Send>;

/// An observer recording everything it sees into an [`EventLog`].
///
/// By default every element is acknowledged with `Continue`; a custom reply
/// script can stop, fail or defer at chosen positions.
pub struct RecordingObserver<A> {
    log: EventLog<A>,
    ack_fn: AckFn<A>,
    seen: usize,
}

impl<A: Send + 'static> RecordingObserver<A> {
    /// Observer acknowledging every element with `Continue`.
    pub fn new() -> (Self, EventLog<A>) {
        Self::replying(|_, _| Ok(Ack::Continue))
    }

    /// Observer whose reply for the element at position `index` (zero
    /// based) is computed by the given script.
    pub fn replying<F>(ack_fn: F) -> (Self, EventLog<A>)
    where
        F: FnMut(usize, &A) -> Result<Ack> + Send + 'static,
    {
        let log = EventLog::new();
        (
            Self {
                log: log.clone(),
                ack_fn: Box::new(ack_fn),
                seen: 0,
            },
            log,
        )
    }
}

impl<A: Send + 'static> Observer for RecordingObserver<A> {
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        let reply = (self.ack_fn)(self.seen, &item);
        self.seen += 1;
        self.log.push(RecordedEvent::Next(item));
        reply
    }

    fn on_complete(&mut self) {
        self.log.push(RecordedEvent::Complete);
    }

    fn on_error(&mut self, error: RivusError) {
        self.log.push(RecordedEvent::Error(error));
    }
}

/// Hands out one [`AckSender`] per element so a test can resolve each
/// acknowledgement by hand.
pub struct AckController {
    senders: Arc<Mutex<VecDeque<AckSender>>>,
}

impl AckController {
    /// Outstanding unresolved acknowledgements.
    pub fn pending(&self) -> usize {
        self.senders.lock().len()
    }

    /// Resolve the oldest outstanding acknowledgement with `Continue`.
    /// Returns false when none was outstanding.
    pub fn resolve_continue(&self) -> bool {
        match self.senders.lock().pop_front() {
            Some(sender) => {
                sender.continue_();
                true
            }
            None => false,
        }
    }

    /// Resolve the oldest outstanding acknowledgement with `Stop`.
    pub fn resolve_stop(&self) -> bool {
        match self.senders.lock().pop_front() {
            Some(sender) => {
                sender.stop();
                true
            }
            None => false,
        }
    }

    /// Fail the oldest outstanding acknowledgement.
    pub fn resolve_fail(&self, error: RivusError) -> bool {
        match self.senders.lock().pop_front() {
            Some(sender) => {
                sender.fail(error);
                true
            }
            None => false,
        }
    }
}

/// An observer answering every element with a deferred acknowledgement,
/// resolved by the test through an [`AckController`].
///
/// The producer therefore suspends after every emission, which makes it
/// the sharpest probe there is for back-pressure honesty.
pub struct ManualAckObserver<A> {
    log: EventLog<A>,
    senders: Arc<Mutex<VecDeque<AckSender>>>,
}

impl<A: Send + 'static> ManualAckObserver<A> {
    pub fn new() -> (Self, EventLog<A>, AckController) {
        let log = EventLog::new();
        let senders: Arc<Mutex<VecDeque<AckSender>>> = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                log: log.clone(),
                senders: Arc::clone(&senders),
            },
            log,
            AckController { senders },
        )
    }
}

impl<A: Send + 'static> Observer for ManualAckObserver<A> {
    type Item = A;

    fn on_next(&mut self, item: A) -> Result<Ack> {
        self.log.push(RecordedEvent::Next(item));
        let (sender, ack) = DeferredAck::channel();
        self.senders.lock().push_back(sender);
        Ok(ack)
    }

    fn on_complete(&mut self) {
        self.log.push(RecordedEvent::Complete);
    }

    fn on_error(&mut self, error: RivusError) {
        self.log.push(RecordedEvent::Error(error));
    }
}
