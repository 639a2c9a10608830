//! Symmetric hash-indexed equi-join

use super::Either;
use crate::pipeline::{Query, Sink};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Incremental join on key equality
///
/// Each side keeps an index from key to every item seen on that side, in
/// arrival order. A new left item is indexed and then paired with every
/// right item already stored under the same key (and symmetrically for right
/// items). Lookup and insert are O(1) per item; memory grows with the total
/// number of items seen on both sides.
///
/// # Example
///
/// ```rust
/// use processor::join::{Either, EquiJoin};
/// use processor::pipeline::collect;
///
/// let mut join = EquiJoin::new(|l: &(u32, char)| l.0, |r: &(u32, char)| r.0);
/// let out = collect(
///     vec![Either::Left((1, 'a')), Either::Right((1, 'b')), Either::Right((2, 'c'))],
///     &mut join,
/// );
/// assert_eq!(out, vec![((1, 'a'), (1, 'b'))]);
/// ```
pub struct EquiJoin<A, B, K, F, G> {
    left_key: F,
    right_key: G,
    left_index: HashMap<K, Vec<A>>,
    right_index: HashMap<K, Vec<B>>,
}

impl<A, B, K, F, G> EquiJoin<A, B, K, F, G>
where
    A: Clone,
    B: Clone,
    K: Eq + Hash,
    F: Fn(&A) -> K,
    G: Fn(&B) -> K,
{
    /// Create a join from one key extractor per side
    pub fn new(left_key: F, right_key: G) -> Self {
        Self {
            left_key,
            right_key,
            left_index: HashMap::new(),
            right_index: HashMap::new(),
        }
    }

    /// Number of items retained on the left side
    pub fn left_len(&self) -> usize {
        self.left_index.values().map(Vec::len).sum()
    }

    /// Number of items retained on the right side
    pub fn right_len(&self) -> usize {
        self.right_index.values().map(Vec::len).sum()
    }
}

impl<A, B, K, F, G> fmt::Debug for EquiJoin<A, B, K, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EquiJoin")
            .field("left_keys", &self.left_index.len())
            .field("right_keys", &self.right_index.len())
            .finish()
    }
}

impl<A, B, K, F, G> Query<Either<A, B>, (A, B)> for EquiJoin<A, B, K, F, G>
where
    A: Clone,
    B: Clone,
    K: Eq + Hash,
    F: Fn(&A) -> K,
    G: Fn(&B) -> K,
{
    fn start(&mut self, _sink: &mut dyn Sink<(A, B)>) {
        self.left_index.clear();
        self.right_index.clear();
    }

    fn next(&mut self, item: Either<A, B>, sink: &mut dyn Sink<(A, B)>) {
        match item {
            Either::Left(a) => {
                let key = (self.left_key)(&a);
                if let Some(partners) = self.right_index.get(&key) {
                    for b in partners {
                        sink.next((a.clone(), b.clone()));
                    }
                }
                self.left_index.entry(key).or_default().push(a);
            }
            Either::Right(b) => {
                let key = (self.right_key)(&b);
                if let Some(partners) = self.left_index.get(&key) {
                    for a in partners {
                        sink.next((a.clone(), b.clone()));
                    }
                }
                self.right_index.entry(key).or_default().push(b);
            }
        }
    }

    fn end(&mut self, sink: &mut dyn Sink<(A, B)>) {
        debug!(
            left = self.left_len(),
            right = self.right_len(),
            "Equi-join finished"
        );
        sink.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{collect, Collector};

    type Row = (u32, &'static str);

    fn join() -> EquiJoin<Row, Row, u32, fn(&Row) -> u32, fn(&Row) -> u32> {
        EquiJoin::new(|l: &Row| l.0, |r: &Row| r.0)
    }

    #[test]
    fn test_pairs_emitted_when_second_member_arrives() {
        let mut join = join();
        let mut out: Collector<(Row, Row)> = Collector::new();
        join.start(&mut out);

        join.next(Either::Left((1, "a")), &mut out);
        assert!(out.is_empty());

        join.next(Either::Right((1, "b")), &mut out);
        assert_eq!(out.items(), &[((1, "a"), (1, "b"))]);

        join.next(Either::Right((2, "c")), &mut out);
        assert_eq!(out.len(), 1);

        join.next(Either::Left((2, "d")), &mut out);
        assert_eq!(out.items(), &[((1, "a"), (1, "b")), ((2, "d"), (2, "c"))]);

        join.end(&mut out);
        assert_eq!(out.end_count(), 1);
    }

    #[test]
    fn test_partners_in_arrival_order() {
        let mut join = join();
        let out = collect(
            vec![
                Either::Right((7, "r1")),
                Either::Right((7, "r2")),
                Either::Left((7, "l1")),
                Either::Right((7, "r3")),
            ],
            &mut join,
        );
        assert_eq!(
            out,
            vec![
                ((7, "l1"), (7, "r1")),
                ((7, "l1"), (7, "r2")),
                ((7, "l1"), (7, "r3")),
            ]
        );
    }

    #[test]
    fn test_same_side_items_never_pair() {
        let mut join = join();
        let out = collect(
            vec![Either::Left((1, "a")), Either::Left((1, "b"))],
            &mut join,
        );
        assert!(out.is_empty());
        assert_eq!(join.left_len(), 2);
        assert_eq!(join.right_len(), 0);
    }
}
