//! Synchronous stream executor
//!
//! The executor is the driver of the push protocol: it calls `start`, feeds
//! every item of a source into the head of a query with `next`, and finishes
//! with `end`. Everything downstream advances in lock-step inside those
//! calls; there are no suspension points.

use super::operator::{Query, Sink};
use super::sink::{Collector, CountingSink};
use crate::error::Result;
use std::convert::Infallible;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Statistics for one executor run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutorStats {
    /// Items pulled from the source
    pub items_in: u64,

    /// Items delivered to the sink
    pub items_out: u64,

    /// Wall-clock duration of the run in microseconds
    pub elapsed_us: u64,
}

/// Drives a source through a query into a sink
#[derive(Debug, Clone)]
pub struct StreamExecutor {
    name: String,
}

impl Default for StreamExecutor {
    fn default() -> Self {
        Self::new("stream")
    }
}

impl StreamExecutor {
    /// Create a named executor
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    /// Executor name used in log records
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run an infallible source to completion
    pub fn run<A, B, I>(
        &self,
        source: I,
        query: &mut dyn Query<A, B>,
        sink: &mut dyn Sink<B>,
    ) -> ExecutorStats
    where
        I: IntoIterator<Item = A>,
    {
        match self.try_run(source.into_iter().map(Ok::<A, Infallible>), query, sink) {
            Ok(stats) => stats,
            Err(never) => match never {},
        }
    }

    /// Run a fallible source
    ///
    /// The first source error aborts the run: no further items are fed and
    /// the end-of-stream signal is not delivered.
    pub fn try_run<A, B, I, E>(
        &self,
        source: I,
        query: &mut dyn Query<A, B>,
        sink: &mut dyn Sink<B>,
    ) -> std::result::Result<ExecutorStats, E>
    where
        I: IntoIterator<Item = std::result::Result<A, E>>,
    {
        let started = Instant::now();
        let mut counting = CountingSink::new(sink);
        let mut items_in = 0_u64;

        info!(executor = %self.name, "Starting stream executor");
        query.start(&mut counting);

        for item in source {
            match item {
                Ok(item) => {
                    items_in += 1;
                    trace!(executor = %self.name, seq = items_in, "Feeding item");
                    query.next(item, &mut counting);
                }
                Err(err) => {
                    debug!(executor = %self.name, items_in, "Source failed, aborting run");
                    return Err(err);
                }
            }
        }

        query.end(&mut counting);

        let stats = ExecutorStats {
            items_in,
            items_out: counting.count(),
            elapsed_us: started.elapsed().as_micros() as u64,
        };
        info!(
            executor = %self.name,
            items_in = stats.items_in,
            items_out = stats.items_out,
            elapsed_us = stats.elapsed_us,
            "Stream executor finished"
        );
        Ok(stats)
    }
}

/// Run `query` over `source` and collect its output
pub fn collect<A, B, I>(source: I, query: &mut dyn Query<A, B>) -> Vec<B>
where
    I: IntoIterator<Item = A>,
{
    let mut out: Collector<B> = Collector::new();
    StreamExecutor::default().run(source, query, &mut out);
    out.into_items()
}

/// Run `query` over a fallible `source` and collect its output
pub fn try_collect<A, B, I>(source: I, query: &mut dyn Query<A, B>) -> Result<Vec<B>>
where
    I: IntoIterator<Item = Result<A>>,
{
    let mut out: Collector<B> = Collector::new();
    StreamExecutor::default().try_run(source, query, &mut out)?;
    Ok(out.into_items())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProcessorError, SourceError};
    use crate::pipeline::{FilterOperator, MapOperator};

    #[test]
    fn test_executor_counts_items() {
        let executor = StreamExecutor::new("test");
        let mut query = FilterOperator::new(|x: &i32| x % 2 == 0);
        let mut out: Collector<i32> = Collector::new();

        let stats = executor.run(1..=10, &mut query, &mut out);

        assert_eq!(stats.items_in, 10);
        assert_eq!(stats.items_out, 5);
        assert_eq!(out.items(), &[2, 4, 6, 8, 10]);
        assert_eq!(out.end_count(), 1);
    }

    #[test]
    fn test_try_run_aborts_without_end() {
        let executor = StreamExecutor::default();
        let mut query = MapOperator::new(|x: i32| x + 1);
        let mut out: Collector<i32> = Collector::new();
        let source: Vec<Result<i32>> = vec![
            Ok(1),
            Err(ProcessorError::Source(SourceError::InvalidSample {
                record: 2,
                value: "x".to_string(),
            })),
            Ok(3),
        ];

        let result = executor.try_run(source, &mut query, &mut out);

        assert!(result.is_err());
        assert_eq!(out.items(), &[2]);
        assert!(!out.is_ended());
    }

    #[test]
    fn test_collect_helper() {
        let mut query = MapOperator::new(|x: i32| x * x);
        assert_eq!(collect(vec![1, 2, 3], &mut query), vec![1, 4, 9]);
    }
}
