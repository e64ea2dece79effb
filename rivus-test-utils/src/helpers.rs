// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;

use crate::recording::EventLog;

/// Assert the log holds exactly `expected` followed by a clean completion,
/// with a single terminal event.
pub fn assert_emitted_then_completed<A>(log: &EventLog<A>, expected: &[A])
where
    A: Clone + PartialEq + Debug,
{
    assert_eq!(log.values(), expected, "emitted values differ");
    assert!(log.is_completed(), "expected completion");
    assert_eq!(log.terminal_count(), 1, "expected exactly one terminal");
}

/// Assert the log holds exactly `expected` followed by a terminal error.
pub fn assert_emitted_then_errored<A>(log: &EventLog<A>, expected: &[A])
where
    A: Clone + PartialEq + Debug,
{
    assert_eq!(log.values(), expected, "emitted values differ");
    assert!(log.error().is_some(), "expected a terminal error");
    assert_eq!(log.terminal_count(), 1, "expected exactly one terminal");
}

/// Assert nothing was observed at all.
pub fn assert_no_events<A>(log: &EventLog<A>)
where
    A: Clone + Debug,
{
    let events = log.events();
    assert!(events.is_empty(), "expected no events, got {events:?}");
}
