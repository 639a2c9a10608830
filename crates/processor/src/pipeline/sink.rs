//! Terminal sinks
//!
//! - [`Collector`]: records every item plus the end-of-stream signal
//! - [`LoggingSink`]: writes every item through `tracing`
//! - `VecDeque<T>`: queue sink used to buffer intermediate streams

use super::operator::Sink;
use std::collections::VecDeque;
use std::fmt::Debug;
use tracing::info;

/// Sink that keeps every item it receives
#[derive(Debug, Clone, PartialEq)]
pub struct Collector<T> {
    items: Vec<T>,
    end_count: usize,
}

impl<T> Collector<T> {
    /// Create an empty collector
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            end_count: 0,
        }
    }

    /// Items received so far, in arrival order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the collector and return its items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of items received
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no item has been received
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the end-of-stream signal has been received
    pub fn is_ended(&self) -> bool {
        self.end_count > 0
    }

    /// How many times `end` was called
    pub fn end_count(&self) -> usize {
        self.end_count
    }
}

impl<T> Default for Collector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sink<T> for Collector<T> {
    fn next(&mut self, item: T) {
        self.items.push(item);
    }

    fn end(&mut self) {
        self.end_count += 1;
    }
}

/// Sink that logs every item at `info` level under a label
#[derive(Debug, Clone)]
pub struct LoggingSink {
    label: String,
    count: u64,
}

impl LoggingSink {
    /// Create a logging sink
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            count: 0,
        }
    }

    /// Number of items logged
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl<T: Debug> Sink<T> for LoggingSink {
    fn next(&mut self, item: T) {
        self.count += 1;
        info!(sink = %self.label, seq = self.count, item = ?item, "item");
    }

    fn end(&mut self) {
        info!(sink = %self.label, items = self.count, "end of stream");
    }
}

impl<T> Sink<T> for VecDeque<T> {
    fn next(&mut self, item: T) {
        self.push_back(item);
    }

    fn end(&mut self) {}
}

/// Sink adapter counting the items it forwards
pub(crate) struct CountingSink<'a, T> {
    inner: &'a mut dyn Sink<T>,
    count: u64,
}

impl<'a, T> CountingSink<'a, T> {
    pub(crate) fn new(inner: &'a mut dyn Sink<T>) -> Self {
        Self { inner, count: 0 }
    }

    pub(crate) fn count(&self) -> u64 {
        self.count
    }
}

impl<T> Sink<T> for CountingSink<'_, T> {
    fn next(&mut self, item: T) {
        self.count += 1;
        self.inner.next(item);
    }

    fn end(&mut self) {
        self.inner.end();
    }
}
