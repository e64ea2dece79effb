// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The subscribe-on-demand producer and its combinator surface.

use core::marker::PhantomData;
use core::time::Duration;
use std::sync::Arc;

use rivus_core::{
    Cancelable, Notification, Observer, Result, RivusError, SchedulerRef, Subscriber,
};

use crate::builders::{EmptySource, JustSource, NeverSource, RaiseErrorSource};
use crate::iter_source::{FromIterSource, ResourceIterSource};
use crate::operator::{Lifted, Operator};
use crate::operators::dematerialize::DematerializeOperator;
use crate::operators::distinct_until_changed::DistinctUntilChangedOperator;
use crate::operators::filter::FilterOperator;
use crate::operators::fold_left::FoldLeftOperator;
use crate::operators::map::MapOperator;
use crate::operators::materialize::MaterializeOperator;
use crate::operators::reduce::ReduceOperator;
use crate::operators::scan::ScanOperator;
use crate::operators::skip::SkipOperator;
use crate::operators::take::TakeOperator;
use crate::operators::take_while::TakeWhileOperator;
use crate::operators::timeout::TimeoutSource;
use crate::resource::Resource;
use crate::safe_observer::SafeObserver;

/// Anything that can begin producing into a subscriber.
///
/// Implementations start production when subscribed (cold semantics: each
/// subscriber gets its own run) and hand back the cancellation handle owned
/// by the caller.
pub trait ObservableSource: Send + Sync {
    /// The element type produced.
    type Item: Send + 'static;

    /// Begin production into the given subscriber, without any contract
    /// enforcement between producer and consumer.
    fn unsafe_subscribe(&self, subscriber: Subscriber<Self::Item>) -> Cancelable;
}

/// A cold producer of a sequence of `A` values terminating in at most one
/// complete or error event.
///
/// `Observable` is a cheap clonable handle; cloning shares the blueprint,
/// not a subscription. Combinators return new observables and never touch
/// the original.
///
/// # Example
///
/// ```
/// use rivus_stream::Observable;
/// use rivus_test_utils::{RecordingObserver, TestScheduler};
/// use std::sync::Arc;
///
/// let scheduler = Arc::new(TestScheduler::new());
/// let (observer, log) = RecordingObserver::new();
///
/// Observable::from_iter(|| 1..=5)
///     .map(|x| Ok(x * 10))
///     .skip(1)
///     .take(3)
///     .subscribe(observer, scheduler.clone());
///
/// scheduler.run_until_idle();
/// assert_eq!(log.values(), vec![20, 30, 40]);
/// assert!(log.is_completed());
/// ```
pub struct Observable<A: Send + 'static> {
    source: Arc<dyn ObservableSource<Item = A>>,
}

impl<A: Send + 'static> Clone for Observable<A> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<A: Send + 'static> Observable<A> {
    /// Wrap a raw source.
    pub fn from_source<S>(source: S) -> Self
    where
        S: ObservableSource<Item = A> + 'static,
    {
        Self {
            source: Arc::new(source),
        }
    }

    /// Cold observable over a fresh iterator per subscription.
    ///
    /// The factory runs once per subscriber; emission is batched on the
    /// subscriber's scheduler and honours every acknowledgement.
    pub fn from_iter<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: IntoIterator<Item = A>,
        I::IntoIter: Send + 'static,
    {
        Self::from_source(FromIterSource::new(factory))
    }

    /// Single-subscriber observable draining a resource-bound iterator.
    ///
    /// The resource is acquired at subscription time and its finalizer runs
    /// exactly once, whatever the termination reason: completion, error,
    /// downstream `Stop`, external cancel, or a failing element. A second
    /// subscription attempt fails with an API contract violation.
    pub fn from_resource_iter<I>(resource: Resource<I>) -> Self
    where
        I: Iterator<Item = Result<A>> + Send + 'static,
    {
        Self::from_source(ResourceIterSource::new(resource))
    }

    /// Emits the single given element, then completes.
    pub fn just(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Self::from_source(JustSource { value })
    }

    /// Completes immediately without emitting.
    pub fn empty() -> Self {
        Self::from_source(EmptySource {
            _marker: PhantomData,
        })
    }

    /// Never emits and never terminates.
    pub fn never() -> Self {
        Self::from_source(NeverSource {
            _marker: PhantomData,
        })
    }

    /// Fails immediately with a copy of the given error.
    pub fn raise_error(error: RivusError) -> Self {
        Self::from_source(RaiseErrorSource {
            error,
            _marker: PhantomData,
        })
    }

    /// Subscribe with contract enforcement.
    ///
    /// The observer is wrapped in the safe layer first: late events are
    /// dropped, a failing `on_next` is converted into `on_error` on the
    /// same observer, and failures after termination go to the scheduler's
    /// failure channel.
    pub fn subscribe<O>(&self, observer: O, scheduler: SchedulerRef) -> Cancelable
    where
        O: Observer<Item = A> + 'static,
    {
        let downstream = Subscriber::new(observer, scheduler.clone());
        self.unsafe_subscribe(Subscriber::new(SafeObserver::new(downstream), scheduler))
    }

    /// Subscribe without the safe layer.
    ///
    /// The subscriber is trusted to uphold the observer contract; internal
    /// builders use this to avoid double wrapping.
    pub fn unsafe_subscribe(&self, subscriber: Subscriber<A>) -> Cancelable {
        self.source.unsafe_subscribe(subscriber)
    }

    /// Sit an operator between this source and every future subscriber.
    pub fn lift<B, Op>(&self, operator: Op) -> Observable<B>
    where
        B: Send + 'static,
        Op: Operator<A, B> + 'static,
    {
        Observable {
            source: Arc::new(Lifted {
                source: Arc::clone(&self.source),
                operator: Arc::new(operator),
            }),
        }
    }

    /// Transform every element with a fallible selector.
    ///
    /// A selector failure terminates the stream: `on_error` downstream,
    /// `Stop` upstream.
    pub fn map<B, F>(&self, f: F) -> Observable<B>
    where
        B: Send + 'static,
        F: Fn(A) -> Result<B> + Send + Sync + 'static,
    {
        self.lift(MapOperator::new(f))
    }

    /// Keep only elements matching the predicate.
    pub fn filter<P>(&self, predicate: P) -> Observable<A>
    where
        P: Fn(&A) -> Result<bool> + Send + Sync + 'static,
    {
        self.lift(FilterOperator::new(predicate))
    }

    /// Accumulate state over the elements, emitting every intermediate
    /// state. The seed is produced per subscription.
    pub fn scan<S, Seed, F>(&self, seed: Seed, f: F) -> Observable<S>
    where
        S: Clone + Send + 'static,
        Seed: Fn() -> Result<S> + Send + Sync + 'static,
        F: Fn(S, A) -> Result<S> + Send + Sync + 'static,
    {
        self.lift(ScanOperator::new(seed, f))
    }

    /// Combine all elements with `f`, emitting the single result on
    /// completion, provided the combiner ran at least once. Empty and
    /// single-element sources complete without emitting.
    ///
    /// ```
    /// use rivus_stream::Observable;
    /// use rivus_test_utils::{RecordingObserver, TestScheduler};
    /// use std::sync::Arc;
    ///
    /// let scheduler = Arc::new(TestScheduler::new());
    /// let (observer, log) = RecordingObserver::new();
    ///
    /// Observable::from_iter(|| vec![1, 2, 3, 4])
    ///     .reduce(|a, b| Ok(a + b))
    ///     .subscribe(observer, scheduler.clone());
    ///
    /// scheduler.run_until_idle();
    /// assert_eq!(log.values(), vec![10]);
    /// ```
    pub fn reduce<F>(&self, f: F) -> Observable<A>
    where
        F: Fn(A, A) -> Result<A> + Send + Sync + 'static,
    {
        self.lift(ReduceOperator::new(f))
    }

    /// Fold all elements into a seeded state, emitting the single final
    /// state on completion. An empty source emits the seed.
    ///
    /// The seed producer runs at subscription time; its failure fails the
    /// subscription immediately with an inert cancelable.
    pub fn fold_left<S, Seed, F>(&self, seed: Seed, f: F) -> Observable<S>
    where
        S: Send + 'static,
        Seed: Fn() -> Result<S> + Send + Sync + 'static,
        F: Fn(S, A) -> Result<S> + Send + Sync + 'static,
    {
        self.lift(FoldLeftOperator::new(seed, f))
    }

    /// Drop the first `n` elements.
    pub fn skip(&self, n: usize) -> Observable<A> {
        self.lift(SkipOperator::new(n))
    }

    /// Emit only the first `n` elements, then complete.
    pub fn take(&self, n: usize) -> Observable<A> {
        self.lift(TakeOperator::new(n))
    }

    /// Emit elements while the predicate holds; the first failing element
    /// is dropped and the stream completes.
    pub fn take_while<P>(&self, predicate: P) -> Observable<A>
    where
        P: Fn(&A) -> Result<bool> + Send + Sync + 'static,
    {
        self.lift(TakeWhileOperator::new(predicate, false))
    }

    /// Like [`take_while`](Self::take_while), but the first failing element
    /// is emitted before the completion.
    pub fn take_while_inclusive<P>(&self, predicate: P) -> Observable<A>
    where
        P: Fn(&A) -> Result<bool> + Send + Sync + 'static,
    {
        self.lift(TakeWhileOperator::new(predicate, true))
    }

    /// Suppress consecutive elements whose keys are equivalent.
    ///
    /// # Arguments
    ///
    /// * `key_fn` - Extracts the comparison key from an element; may fail
    /// * `eq` - Equivalence on keys: `true` means "same, suppress"
    pub fn distinct_until_changed_by_key<K, KeyFn, Eq>(
        &self,
        key_fn: KeyFn,
        eq: Eq,
    ) -> Observable<A>
    where
        K: Send + 'static,
        KeyFn: Fn(&A) -> Result<K> + Send + Sync + 'static,
        Eq: Fn(&K, &K) -> bool + Send + Sync + 'static,
    {
        self.lift(DistinctUntilChangedOperator::new(key_fn, eq))
    }

    /// Suppress consecutive duplicates by value equality.
    pub fn distinct_until_changed(&self) -> Observable<A>
    where
        A: Clone + PartialEq,
    {
        self.distinct_until_changed_by_key(|a: &A| Ok(a.clone()), |x: &A, y: &A| x == y)
    }

    /// Reify events into [`Notification`] elements; the resulting stream
    /// always completes successfully.
    pub fn materialize(&self) -> Observable<Notification<A>> {
        self.lift(MaterializeOperator::new())
    }

    /// Fail with a timeout error when the interval between consecutive
    /// emissions exceeds `timeout`, canceling the upstream.
    pub fn timeout_on_slow_upstream(&self, timeout: Duration) -> Observable<A> {
        Observable {
            source: Arc::new(TimeoutSource {
                source: Arc::clone(&self.source),
                timeout,
                backup: None,
            }),
        }
    }

    /// Switch to `backup` when the interval between consecutive emissions
    /// exceeds `timeout`, canceling the upstream.
    pub fn timeout_to_backup(&self, timeout: Duration, backup: Observable<A>) -> Observable<A> {
        Observable {
            source: Arc::new(TimeoutSource {
                source: Arc::clone(&self.source),
                timeout,
                backup: Some(backup),
            }),
        }
    }
}

impl<A: Send + 'static> Observable<Notification<A>> {
    /// Undo a [`materialize`](Observable::materialize): notifications become
    /// events again, and `dematerialize ∘ materialize` is the identity on
    /// any well-formed source.
    pub fn dematerialize(&self) -> Observable<A> {
        self.lift(DematerializeOperator::new())
    }
}
