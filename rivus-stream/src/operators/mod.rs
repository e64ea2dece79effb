// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The operator set: stateful reduction, demand plumbing, predicate-based
//! take, de-duplication, materialise/dematerialise, folds and timeouts.
//!
//! Every operator follows the same shape: `apply` wraps the downstream
//! subscriber into an upstream-facing one that owns the per-subscription
//! state (at minimum a `terminated` flag suppressing late or duplicate
//! terminal events) and carries the downstream's scheduler.
//!
//! Error routing is uniform across the set. An `Err` from caller-supplied
//! code becomes `on_error` downstream plus `Stop` upstream. An `Err` from
//! invoking the downstream itself is a protocol violation: it is reported
//! to the scheduler's failure channel and never re-enters the pipeline.

pub mod dematerialize;
pub mod distinct_until_changed;
pub mod filter;
pub mod fold_left;
pub mod map;
pub mod materialize;
pub mod reduce;
pub mod scan;
pub mod skip;
pub mod take;
pub mod take_while;
pub mod timeout;

use rivus_core::{Ack, Observer, Scheduler, Subscriber};

/// Push an element downstream, folding the two ways a downstream can refuse
/// it (`Stop`, failure) into a plain `Stop` for the upstream.
pub(crate) fn deliver<A: Send + 'static>(
    downstream: &mut Subscriber<A>,
    terminated: &mut bool,
    item: A,
) -> Ack {
    match downstream.on_next(item) {
        Ok(Ack::Stop) => {
            *terminated = true;
            Ack::Stop
        }
        Ok(ack) => ack,
        Err(error) => {
            *terminated = true;
            downstream.scheduler().report_failure(error);
            Ack::Stop
        }
    }
}
