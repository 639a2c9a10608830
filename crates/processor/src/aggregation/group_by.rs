//! Keyed blocking aggregation

use crate::pipeline::{Query, Sink};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Groups `(key, value)` pairs and emits one `(key, aggregate)` per key at end
///
/// The first value of every key is combined with the neutral element as
/// `op(init, value)`; later values fold into the key's current aggregate with
/// `op(aggregate, value)`. Nothing is emitted before `end`, where keys are
/// produced in first-seen order.
///
/// # Example
///
/// ```rust
/// use processor::aggregation::GroupBy;
/// use processor::pipeline::collect;
///
/// let mut sums = GroupBy::new(0, |acc: &i32, x: i32| acc + x);
/// let out = collect(vec![(1, 10), (2, 5), (1, 3)], &mut sums);
/// assert_eq!(out, vec![(1, 13), (2, 5)]);
/// ```
pub struct GroupBy<K, A, B, F> {
    init: B,
    op: F,
    aggregates: HashMap<K, B>,
    key_order: Vec<K>,
    _phantom: std::marker::PhantomData<fn(A)>,
}

impl<K, A, B, F> GroupBy<K, A, B, F>
where
    K: Eq + Hash + Clone,
    B: Clone,
    F: Fn(&B, A) -> B,
{
    /// Create a grouping aggregator from a neutral element and a combining op
    pub fn new(init: B, op: F) -> Self {
        Self {
            init,
            op,
            aggregates: HashMap::new(),
            key_order: Vec::new(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Number of distinct keys seen so far
    pub fn key_count(&self) -> usize {
        self.key_order.len()
    }

    /// Current aggregate of a key
    pub fn get(&self, key: &K) -> Option<&B> {
        self.aggregates.get(key)
    }
}

impl<K, A, B, F> fmt::Debug for GroupBy<K, A, B, F>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupBy")
            .field("keys", &self.key_order)
            .finish()
    }
}

impl<K, A, B, F> Query<(K, A), (K, B)> for GroupBy<K, A, B, F>
where
    K: Eq + Hash + Clone,
    B: Clone,
    F: Fn(&B, A) -> B,
{
    fn start(&mut self, _sink: &mut dyn Sink<(K, B)>) {
        self.aggregates.clear();
        self.key_order.clear();
    }

    fn next(&mut self, (key, value): (K, A), _sink: &mut dyn Sink<(K, B)>) {
        match self.aggregates.get_mut(&key) {
            Some(aggregate) => {
                *aggregate = (self.op)(aggregate, value);
            }
            None => {
                let aggregate = (self.op)(&self.init, value);
                self.key_order.push(key.clone());
                self.aggregates.insert(key, aggregate);
            }
        }
    }

    fn end(&mut self, sink: &mut dyn Sink<(K, B)>) {
        debug!(keys = self.key_order.len(), "Group-by flushing");
        for key in self.key_order.drain(..) {
            if let Some(aggregate) = self.aggregates.remove(&key) {
                sink.next((key, aggregate));
            }
        }
        sink.end();
    }
}
