//! Stateless centered transform over a 3-sample neighborhood

use crate::pipeline::{Query, Sink};
use std::fmt;

/// Emits `f(previous, current, next)` for every item that has both neighbors
///
/// The first output is produced on the third input, so a stream of `N >= 2`
/// items yields `N - 2` outputs.
pub struct ThreePointWindow<T, F> {
    func: F,
    previous: Option<T>,
    current: Option<T>,
}

impl<T, F> ThreePointWindow<T, F>
where
    T: Clone,
    F: FnMut(&T, &T, &T) -> T,
{
    /// Create a three-point window
    pub fn new(func: F) -> Self {
        Self {
            func,
            previous: None,
            current: None,
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for ThreePointWindow<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreePointWindow")
            .field("previous", &self.previous)
            .field("current", &self.current)
            .finish()
    }
}

impl<T, F> Query<T, T> for ThreePointWindow<T, F>
where
    T: Clone,
    F: FnMut(&T, &T, &T) -> T,
{
    fn start(&mut self, _sink: &mut dyn Sink<T>) {
        self.previous = None;
        self.current = None;
    }

    fn next(&mut self, item: T, sink: &mut dyn Sink<T>) {
        if let (Some(previous), Some(current)) = (&self.previous, &self.current) {
            sink.next((self.func)(previous, current, &item));
        }
        self.previous = self.current.take();
        self.current = Some(item);
    }

    fn end(&mut self, sink: &mut dyn Sink<T>) {
        sink.end();
    }
}
