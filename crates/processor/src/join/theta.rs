//! Symmetric nested-loop theta-join

use super::Either;
use crate::pipeline::{Query, Sink};
use std::fmt;
use tracing::debug;

/// Incremental join under an arbitrary predicate over (left, right)
///
/// The predicate is opaque, so nothing can be indexed: every new item is
/// tested against every item seen so far on the other side. Total work is
/// O(n * m) and memory O(n + m).
pub struct ThetaJoin<A, B, P> {
    predicate: P,
    left_items: Vec<A>,
    right_items: Vec<B>,
}

impl<A, B, P> ThetaJoin<A, B, P>
where
    A: Clone,
    B: Clone,
    P: Fn(&A, &B) -> bool,
{
    /// Create a join from a predicate
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            left_items: Vec::new(),
            right_items: Vec::new(),
        }
    }

    /// Left items retained so far
    pub fn left_items(&self) -> &[A] {
        &self.left_items
    }

    /// Right items retained so far
    pub fn right_items(&self) -> &[B] {
        &self.right_items
    }
}

impl<A, B, P> fmt::Debug for ThetaJoin<A, B, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThetaJoin")
            .field("left", &self.left_items.len())
            .field("right", &self.right_items.len())
            .finish()
    }
}

impl<A, B, P> Query<Either<A, B>, (A, B)> for ThetaJoin<A, B, P>
where
    A: Clone,
    B: Clone,
    P: Fn(&A, &B) -> bool,
{
    fn start(&mut self, _sink: &mut dyn Sink<(A, B)>) {
        self.left_items.clear();
        self.right_items.clear();
    }

    fn next(&mut self, item: Either<A, B>, sink: &mut dyn Sink<(A, B)>) {
        match item {
            Either::Left(a) => {
                for b in &self.right_items {
                    if (self.predicate)(&a, b) {
                        sink.next((a.clone(), b.clone()));
                    }
                }
                self.left_items.push(a);
            }
            Either::Right(b) => {
                for a in &self.left_items {
                    if (self.predicate)(a, &b) {
                        sink.next((a.clone(), b.clone()));
                    }
                }
                self.right_items.push(b);
            }
        }
    }

    fn end(&mut self, sink: &mut dyn Sink<(A, B)>) {
        debug!(
            left = self.left_items.len(),
            right = self.right_items.len(),
            "Theta-join finished"
        );
        sink.end();
    }
}
