//! Centered count-based sliding window with incremental aggregation

use crate::error::{WindowError, WindowResult};
use crate::pipeline::{Query, Sink};
use std::fmt;
use tracing::trace;

/// Sliding window over the last `W` items, centered on its leading edge
///
/// The aggregate is maintained incrementally: every new item is folded in
/// with `insert`, and once the buffer holds `W` items the evicted one is
/// taken out again with `remove`. `remove` must exactly invert `insert` for
/// any previously inserted item, otherwise the aggregate drifts.
///
/// On `start` the window logically pre-loads `W / 2` neutral elements, so the
/// first aggregate is emitted on the `W / 2 + 1`-th item and every item after
/// that produces exactly one aggregate. Each aggregate is centered on the item
/// that arrived `W / 2` positions earlier. There is no compensating flush at
/// `end`: the trailing `W / 2` centers are never emitted.
///
/// # Example
///
/// ```rust
/// use processor::pipeline::collect;
/// use processor::window::CenteredSlidingWindow;
///
/// let mut sum = CenteredSlidingWindow::new(3, 0, |a: &i32, x: &i32| a + x, |a: &i32, x: &i32| a - x)?;
/// assert_eq!(collect(vec![1, 2, 3, 4], &mut sum), vec![3, 6, 9]);
/// # Ok::<(), processor::WindowError>(())
/// ```
pub struct CenteredSlidingWindow<A, I, R> {
    init: A,
    insert: I,
    remove: R,
    size: usize,
    buffer: Vec<A>,
    aggregate: A,
    oldest: usize,
    len: usize,
}

impl<A, I, R> CenteredSlidingWindow<A, I, R>
where
    A: Clone,
    I: Fn(&A, &A) -> A,
    R: Fn(&A, &A) -> A,
{
    /// Create a window of `size` items
    ///
    /// Fails with [`WindowError::InvalidWindowSize`] when `size` is zero.
    pub fn new(size: usize, init: A, insert: I, remove: R) -> WindowResult<Self> {
        if size < 1 {
            return Err(WindowError::InvalidWindowSize { size });
        }

        let mut window = Self {
            buffer: vec![init.clone(); size],
            aggregate: init.clone(),
            init,
            insert,
            remove,
            size,
            oldest: 0,
            len: 0,
        };
        window.reset();
        Ok(window)
    }

    /// Window size `W`
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of items withheld before the first aggregate, `W / 2`
    pub fn delay(&self) -> usize {
        self.size / 2
    }

    /// Number of real items currently held
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no real item is held
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the buffer holds `W` real items
    pub fn is_full(&self) -> bool {
        self.len >= self.size
    }

    /// Current aggregate
    pub fn aggregate(&self) -> &A {
        &self.aggregate
    }

    fn reset(&mut self) {
        let half = self.size / 2;
        for slot in self.buffer.iter_mut() {
            *slot = self.init.clone();
        }
        // The neutral half occupies slots [0, W/2); real items start after it
        self.oldest = half % self.size;
        self.len = 0;
        self.aggregate = self.init.clone();
    }

    /// Absorb one item, returning the aggregate if the window emits
    fn push(&mut self, item: A) -> Option<A> {
        if self.len >= self.size {
            self.aggregate = (self.remove)(&self.aggregate, &self.buffer[self.oldest]);
            self.aggregate = (self.insert)(&self.aggregate, &item);
            self.buffer[self.oldest] = item;
            self.oldest = (self.oldest + 1) % self.size;
        } else {
            let slot = (self.oldest + self.len) % self.size;
            self.aggregate = (self.insert)(&self.aggregate, &item);
            self.buffer[slot] = item;
            self.len += 1;
        }

        if self.len > self.delay() {
            Some(self.aggregate.clone())
        } else {
            None
        }
    }
}

impl<A, I, R> fmt::Debug for CenteredSlidingWindow<A, I, R>
where
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CenteredSlidingWindow")
            .field("size", &self.size)
            .field("len", &self.len)
            .field("oldest", &self.oldest)
            .field("aggregate", &self.aggregate)
            .finish()
    }
}

impl<A, I, R> Query<A, A> for CenteredSlidingWindow<A, I, R>
where
    A: Clone,
    I: Fn(&A, &A) -> A,
    R: Fn(&A, &A) -> A,
{
    fn start(&mut self, _sink: &mut dyn Sink<A>) {
        self.reset();
        trace!(size = self.size, delay = self.delay(), "Centered window started");
    }

    fn next(&mut self, item: A, sink: &mut dyn Sink<A>) {
        if let Some(aggregate) = self.push(item) {
            sink.next(aggregate);
        }
    }

    fn end(&mut self, sink: &mut dyn Sink<A>) {
        sink.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{collect, Collector};

    fn summing(size: usize) -> CenteredSlidingWindow<i64, impl Fn(&i64, &i64) -> i64, impl Fn(&i64, &i64) -> i64> {
        CenteredSlidingWindow::new(size, 0, |a: &i64, x: &i64| a + x, |a: &i64, x: &i64| a - x)
            .expect("valid window size")
    }

    #[test]
    fn test_zero_size_rejected() {
        let result = CenteredSlidingWindow::new(0, 0.0, |a: &f64, x: &f64| a + x, |a: &f64, x: &f64| a - x);
        assert_eq!(result.err(), Some(WindowError::InvalidWindowSize { size: 0 }));
    }

    #[test]
    fn test_size_one_emits_every_item() {
        let mut window = summing(1);
        assert_eq!(window.delay(), 0);
        assert_eq!(collect(vec![4, 5, 6], &mut window), vec![4, 5, 6]);
    }

    #[test]
    fn test_first_emission_after_half_window() {
        let mut window = summing(5);
        let mut out: Collector<i64> = Collector::new();
        window.start(&mut out);

        window.next(1, &mut out);
        window.next(2, &mut out);
        assert!(out.is_empty());

        window.next(3, &mut out);
        assert_eq!(out.items(), &[6]);
    }

    #[test]
    fn test_centered_sum_of_five() {
        let mut window = summing(5);
        let out = collect(1..=8, &mut window);
        // centers 1..=6: partial windows while filling, then full
        assert_eq!(out, vec![6, 10, 15, 20, 25, 30]);
    }

    #[test]
    fn test_no_trailing_flush() {
        let mut window = summing(41);
        let out = collect(vec![1; 30], &mut window);
        assert_eq!(out.len(), 30 - 20);
    }

    #[test]
    fn test_even_window_size() {
        let mut window = summing(4);
        let out = collect(1..=6, &mut window);
        assert_eq!(out, vec![6, 10, 14, 18]);
    }

    #[test]
    fn test_start_resets_state() {
        let mut window = summing(3);
        assert_eq!(collect(vec![10, 10, 10], &mut window), vec![20, 30]);
        assert_eq!(collect(vec![1, 1], &mut window), vec![2]);
        assert!(!window.is_full());
    }

    #[test]
    fn test_end_signals_once() {
        let mut window = summing(3);
        let mut out: Collector<i64> = Collector::new();
        window.start(&mut out);
        window.next(1, &mut out);
        window.end(&mut out);
        assert!(out.is_empty());
        assert_eq!(out.end_count(), 1);
    }
}
