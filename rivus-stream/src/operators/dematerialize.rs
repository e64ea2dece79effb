// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Turns a stream of [`Notification`] elements back into stream events.

use core::marker::PhantomData;

use rivus_core::{Ack, Notification, Observer, Result, RivusError, Scheduler, Subscriber};

use crate::operator::Operator;
use crate::operators::deliver;

/// The inverse of materialize.
///
/// `OnNext(a)` becomes a regular emission whose acknowledgement is passed
/// back upstream; `OnError`/`OnComplete` become the downstream terminal and
/// answer `Stop`. Notifications after an inner terminal are ignored. The
/// source's own terminal is forwarded iff no inner terminal preceded it,
/// except an `on_error` arriving after termination, which can no longer
/// enter the pipeline and is diverted to the scheduler's failure channel.
pub struct DematerializeOperator<A> {
    _marker: PhantomData<fn(A)>,
}

impl<A> DematerializeOperator<A> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<A> Default for DematerializeOperator<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Operator<Notification<A>, A> for DematerializeOperator<A>
where
    A: Send + 'static,
{
    fn apply(&self, downstream: Subscriber<A>) -> Option<Subscriber<Notification<A>>> {
        let scheduler = downstream.scheduler().clone();
        Some(Subscriber::new(
            DematerializeObserver {
                downstream,
                terminated: false,
            },
            scheduler,
        ))
    }
}

struct DematerializeObserver<A: Send + 'static> {
    downstream: Subscriber<A>,
    terminated: bool,
}

impl<A: Send + 'static> Observer for DematerializeObserver<A> {
    type Item = Notification<A>;

    fn on_next(&mut self, item: Notification<A>) -> Result<Ack> {
        if self.terminated {
            return Ok(Ack::Stop);
        }
        match item {
            Notification::OnNext(value) => {
                Ok(deliver(&mut self.downstream, &mut self.terminated, value))
            }
            Notification::OnError(error) => {
                self.terminated = true;
                self.downstream.on_error(error);
                Ok(Ack::Stop)
            }
            Notification::OnComplete => {
                self.terminated = true;
                self.downstream.on_complete();
                Ok(Ack::Stop)
            }
        }
    }

    fn on_complete(&mut self) {
        if !self.terminated {
            self.terminated = true;
            self.downstream.on_complete();
        }
    }

    fn on_error(&mut self, error: RivusError) {
        if self.terminated {
            self.downstream.scheduler().report_failure(error);
        } else {
            self.terminated = true;
            self.downstream.on_error(error);
        }
    }
}
