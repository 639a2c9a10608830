//! Operator composition
//!
//! - [`Pipeline`]: sequential composition, the first query's output feeds the second
//! - [`Parallel`]: feeds each input to two queries and pairs their outputs in lock-step

use super::operator::{Query, Sink};
use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// Sink adapter that pushes into a downstream query
struct Downstream<'a, B, C> {
    query: &'a mut dyn Query<B, C>,
    sink: &'a mut dyn Sink<C>,
}

impl<B, C> Sink<B> for Downstream<'_, B, C> {
    fn next(&mut self, item: B) {
        self.query.next(item, &mut *self.sink);
    }

    fn end(&mut self) {
        self.query.end(&mut *self.sink);
    }
}

/// Sequential composition of two queries
///
/// The end-of-stream signal cascades: ending the first query ends the second,
/// which in turn ends the outer sink.
pub struct Pipeline<Q1, Q2, B> {
    first: Q1,
    second: Q2,
    _phantom: PhantomData<fn(B)>,
}

impl<Q1, Q2, B> Pipeline<Q1, Q2, B> {
    /// Compose `first` followed by `second`
    pub fn new(first: Q1, second: Q2) -> Self {
        Self {
            first,
            second,
            _phantom: PhantomData,
        }
    }
}

impl<Q1, Q2, B> Debug for Pipeline<Q1, Q2, B>
where
    Q1: Debug,
    Q2: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

impl<A, B, C, Q1, Q2> Query<A, C> for Pipeline<Q1, Q2, B>
where
    Q1: Query<A, B>,
    Q2: Query<B, C>,
{
    fn start(&mut self, sink: &mut dyn Sink<C>) {
        self.second.start(&mut *sink);
        let mut downstream = Downstream {
            query: &mut self.second,
            sink,
        };
        self.first.start(&mut downstream);
    }

    fn next(&mut self, item: A, sink: &mut dyn Sink<C>) {
        let mut downstream = Downstream {
            query: &mut self.second,
            sink,
        };
        self.first.next(item, &mut downstream);
    }

    fn end(&mut self, sink: &mut dyn Sink<C>) {
        let mut downstream = Downstream {
            query: &mut self.second,
            sink,
        };
        self.first.end(&mut downstream);
    }
}

/// Extension methods for chaining queries
pub trait QueryExt<A, B>: Query<A, B> + Sized {
    /// Feed this query's output into `next`
    fn then<C, Q>(self, next: Q) -> Pipeline<Self, Q, B>
    where
        Q: Query<B, C>,
    {
        Pipeline::new(self, next)
    }
}

impl<A, B, Q: Query<A, B>> QueryExt<A, B> for Q {}

/// Combines one output of each branch of a [`Parallel`] into one item
pub trait Combiner<L, R> {
    /// Combined item type
    type Output;

    /// Combine a left and right item
    fn combine(&mut self, left: L, right: R) -> Self::Output;

    /// Reset any state carried between combinations
    fn reset(&mut self) {}
}

/// [`Combiner`] backed by a stateless function
pub struct CombineFn<F>(pub F);

impl<F, L, R, O> Combiner<L, R> for CombineFn<F>
where
    F: FnMut(L, R) -> O,
{
    type Output = O;

    fn combine(&mut self, left: L, right: R) -> O {
        (self.0)(left, right)
    }
}

/// Runs two queries over the same input and pairs their outputs in lock-step
///
/// Each input item is cloned into both branches. Outputs are queued per
/// branch and one combined item is emitted each time both queues hold an
/// item. Outputs left unpaired when the stream ends are dropped.
pub struct Parallel<A, Q1, Q2, C, L, R> {
    left_query: Q1,
    right_query: Q2,
    combiner: C,
    left: VecDeque<L>,
    right: VecDeque<R>,
    _phantom: PhantomData<fn(A)>,
}

impl<A, Q1, Q2, C, L, R> Parallel<A, Q1, Q2, C, L, R>
where
    A: Clone,
    Q1: Query<A, L>,
    Q2: Query<A, R>,
    C: Combiner<L, R>,
{
    /// Create a lock-step combination of two queries
    pub fn new(left_query: Q1, right_query: Q2, combiner: C) -> Self {
        Self {
            left_query,
            right_query,
            combiner,
            left: VecDeque::new(),
            right: VecDeque::new(),
            _phantom: PhantomData,
        }
    }

    fn drain_pairs(&mut self, sink: &mut dyn Sink<C::Output>) {
        while !self.left.is_empty() && !self.right.is_empty() {
            if let (Some(l), Some(r)) = (self.left.pop_front(), self.right.pop_front()) {
                sink.next(self.combiner.combine(l, r));
            }
        }
    }
}

impl<A, Q1, Q2, C, L, R> Debug for Parallel<A, Q1, Q2, C, L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parallel")
            .field("left_pending", &self.left.len())
            .field("right_pending", &self.right.len())
            .finish()
    }
}

impl<A, Q1, Q2, C, L, R> Query<A, C::Output> for Parallel<A, Q1, Q2, C, L, R>
where
    A: Clone,
    Q1: Query<A, L>,
    Q2: Query<A, R>,
    C: Combiner<L, R>,
{
    fn start(&mut self, _sink: &mut dyn Sink<C::Output>) {
        self.left.clear();
        self.right.clear();
        self.combiner.reset();
        self.left_query.start(&mut self.left);
        self.right_query.start(&mut self.right);
    }

    fn next(&mut self, item: A, sink: &mut dyn Sink<C::Output>) {
        self.left_query.next(item.clone(), &mut self.left);
        self.right_query.next(item, &mut self.right);
        self.drain_pairs(sink);
    }

    fn end(&mut self, sink: &mut dyn Sink<C::Output>) {
        self.left_query.end(&mut self.left);
        self.right_query.end(&mut self.right);
        self.drain_pairs(sink);
        self.left.clear();
        self.right.clear();
        sink.end();
    }
}
