//! Adapter running an [`Aggregator`] as a push operator

use super::aggregator::Aggregator;
use crate::pipeline::{Query, Sink};

/// Feeds every item into an aggregator and emits its result once, at end
///
/// With [`with_min_count`](Self::with_min_count) the result is withheld when
/// fewer values were absorbed; the end-of-stream signal is still delivered.
#[derive(Debug, Clone)]
pub struct AggregateOperator<G> {
    aggregator: G,
    min_count: u64,
}

impl<G: Aggregator> AggregateOperator<G> {
    /// Wrap an aggregator
    pub fn new(aggregator: G) -> Self {
        Self {
            aggregator,
            min_count: 0,
        }
    }

    /// Only emit the result once at least `min_count` values were absorbed
    pub fn with_min_count(mut self, min_count: u64) -> Self {
        self.min_count = min_count;
        self
    }

    /// The wrapped aggregator
    pub fn aggregator(&self) -> &G {
        &self.aggregator
    }
}

impl<G: Aggregator> Query<G::Input, G::Output> for AggregateOperator<G> {
    fn start(&mut self, _sink: &mut dyn Sink<G::Output>) {
        self.aggregator.reset();
    }

    fn next(&mut self, item: G::Input, _sink: &mut dyn Sink<G::Output>) {
        self.aggregator.update(item);
    }

    fn end(&mut self, sink: &mut dyn Sink<G::Output>) {
        if self.aggregator.count() >= self.min_count {
            sink.next(self.aggregator.finalize());
        }
        sink.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::AverageAggregator;
    use crate::pipeline::collect;

    #[test]
    fn test_emits_single_result_at_end() {
        let mut op = AggregateOperator::new(AverageAggregator::new());
        assert_eq!(collect(vec![1.0, 2.0, 3.0], &mut op), vec![2.0]);
    }

    #[test]
    fn test_empty_stream_emits_sentinel() {
        let mut op = AggregateOperator::new(AverageAggregator::new());
        let out = collect(Vec::<f64>::new(), &mut op);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_nan());
    }

    #[test]
    fn test_min_count_withholds_result() {
        let mut op = AggregateOperator::new(AverageAggregator::new()).with_min_count(2);
        assert!(collect(vec![4.0], &mut op).is_empty());
        assert_eq!(collect(vec![4.0, 6.0], &mut op), vec![5.0]);
    }
}
