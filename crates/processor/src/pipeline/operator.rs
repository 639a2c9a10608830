//! The push protocol and the stateless operators built on it
//!
//! Every operator implements [`Query`]: a driver calls `start` once, `next`
//! once per input item and `end` once at end-of-stream. Inside `next` an
//! operator may synchronously push zero, one or many items into its
//! downstream [`Sink`]. `end` flushes buffered state and then signals
//! `sink.end()` exactly once.
//!
//! This module provides the trait pair plus the stateless building blocks:
//! - Identity: forward every item
//! - Map: transform items one-to-one
//! - Filter: select items based on a predicate
//! - Scan: running fold that emits every intermediate state

use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// Consumer side of the push protocol
pub trait Sink<T> {
    /// Receive one item
    fn next(&mut self, item: T);

    /// End-of-stream signal, delivered exactly once per run
    fn end(&mut self);
}

/// A push-based streaming operator turning a stream of `A` into a stream of `B`
///
/// Operators are single-run objects: a fresh instance, or a `start` call that
/// resets its state, is required per execution.
pub trait Query<A, B> {
    /// Initialize or reset internal state. Must not emit.
    fn start(&mut self, sink: &mut dyn Sink<B>);

    /// Consume exactly one input item
    fn next(&mut self, item: A, sink: &mut dyn Sink<B>);

    /// Flush buffered state, emit final outputs, then call `sink.end()` once
    fn end(&mut self, sink: &mut dyn Sink<B>);
}

impl<A, B, Q> Query<A, B> for Box<Q>
where
    Q: Query<A, B> + ?Sized,
{
    fn start(&mut self, sink: &mut dyn Sink<B>) {
        (**self).start(sink)
    }

    fn next(&mut self, item: A, sink: &mut dyn Sink<B>) {
        (**self).next(item, sink)
    }

    fn end(&mut self, sink: &mut dyn Sink<B>) {
        (**self).end(sink)
    }
}

/// Identity operator - forwards every item unchanged
pub struct Identity<T> {
    _phantom: PhantomData<fn(T)>,
}

impl<T> Identity<T> {
    /// Create a new identity operator
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity").finish()
    }
}

impl<T> Query<T, T> for Identity<T> {
    fn start(&mut self, _sink: &mut dyn Sink<T>) {}

    fn next(&mut self, item: T, sink: &mut dyn Sink<T>) {
        sink.next(item);
    }

    fn end(&mut self, sink: &mut dyn Sink<T>) {
        sink.end();
    }
}

/// Map operator - transforms items one-to-one
///
/// # Example
///
/// ```rust
/// use processor::pipeline::{Collector, MapOperator, Query};
///
/// let mut double = MapOperator::new(|x: i32| x * 2);
/// let mut out: Collector<i32> = Collector::new();
/// double.start(&mut out);
/// double.next(21, &mut out);
/// double.end(&mut out);
/// assert_eq!(out.items(), &[42]);
/// ```
pub struct MapOperator<F, A, B> {
    func: F,
    _phantom: PhantomData<fn(A) -> B>,
}

impl<F, A, B> MapOperator<F, A, B>
where
    F: FnMut(A) -> B,
{
    /// Create a new map operator
    pub fn new(func: F) -> Self {
        Self {
            func,
            _phantom: PhantomData,
        }
    }
}

impl<F, A, B> Debug for MapOperator<F, A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapOperator").finish()
    }
}

impl<F, A, B> Query<A, B> for MapOperator<F, A, B>
where
    F: FnMut(A) -> B,
{
    fn start(&mut self, _sink: &mut dyn Sink<B>) {}

    fn next(&mut self, item: A, sink: &mut dyn Sink<B>) {
        sink.next((self.func)(item));
    }

    fn end(&mut self, sink: &mut dyn Sink<B>) {
        sink.end();
    }
}

/// Filter operator - selects items based on a predicate
pub struct FilterOperator<F, T> {
    predicate: F,
    _phantom: PhantomData<fn(T)>,
}

impl<F, T> FilterOperator<F, T>
where
    F: FnMut(&T) -> bool,
{
    /// Create a new filter operator
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            _phantom: PhantomData,
        }
    }
}

impl<F, T> Debug for FilterOperator<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOperator").finish()
    }
}

impl<F, T> Query<T, T> for FilterOperator<F, T>
where
    F: FnMut(&T) -> bool,
{
    fn start(&mut self, _sink: &mut dyn Sink<T>) {}

    fn next(&mut self, item: T, sink: &mut dyn Sink<T>) {
        if (self.predicate)(&item) {
            sink.next(item);
        }
    }

    fn end(&mut self, sink: &mut dyn Sink<T>) {
        sink.end();
    }
}

/// Scan operator - running fold emitting every intermediate state
///
/// The state is reset to the initial value on `start`.
pub struct ScanOperator<S, F, A> {
    init: S,
    state: S,
    func: F,
    _phantom: PhantomData<fn(A)>,
}

impl<S, F, A> ScanOperator<S, F, A>
where
    S: Clone,
    F: FnMut(&S, A) -> S,
{
    /// Create a new scan operator
    pub fn new(init: S, func: F) -> Self {
        Self {
            state: init.clone(),
            init,
            func,
            _phantom: PhantomData,
        }
    }
}

impl<S: Debug, F, A> Debug for ScanOperator<S, F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanOperator")
            .field("state", &self.state)
            .finish()
    }
}

impl<S, F, A> Query<A, S> for ScanOperator<S, F, A>
where
    S: Clone,
    F: FnMut(&S, A) -> S,
{
    fn start(&mut self, _sink: &mut dyn Sink<S>) {
        self.state = self.init.clone();
    }

    fn next(&mut self, item: A, sink: &mut dyn Sink<S>) {
        self.state = (self.func)(&self.state, item);
        sink.next(self.state.clone());
    }

    fn end(&mut self, sink: &mut dyn Sink<S>) {
        sink.end();
    }
}
