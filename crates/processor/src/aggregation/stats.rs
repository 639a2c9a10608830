//! Numeric statistics over `f64` streams

use super::aggregator::Aggregator;

/// Running count, mean and sum of squared deviations (Welford)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Moments {
    /// Empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one value
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of values pushed
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of the pushed values, `None` before the first one
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sum of squared deviations divided by `count - ddof`
    ///
    /// `None` unless more than `ddof` values were pushed.
    pub fn variance(&self, ddof: u64) -> Option<f64> {
        (self.count > ddof).then(|| self.m2 / (self.count - ddof) as f64)
    }
}

/// Arithmetic mean, NaN over zero values
///
/// ```
/// use processor::aggregation::{Aggregator, AverageAggregator};
///
/// let mut mean = AverageAggregator::new();
/// for x in [10.0, 20.0, 30.0] {
///     mean.update(x);
/// }
/// assert_eq!(mean.finalize(), 20.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AverageAggregator {
    moments: Moments,
}

impl AverageAggregator {
    /// Mean over no values yet
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregator for AverageAggregator {
    type Input = f64;
    type Output = f64;

    fn update(&mut self, value: f64) {
        self.moments.push(value);
    }

    fn finalize(&self) -> f64 {
        self.moments.mean().unwrap_or(f64::NAN)
    }

    fn reset(&mut self) {
        self.moments = Moments::new();
    }

    fn count(&self) -> u64 {
        self.moments.count()
    }
}

/// Which divisor a [`StandardDeviationAggregator`] uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deviation {
    /// Divide by n - 1
    Sample,
    /// Divide by n
    Population,
}

/// Standard deviation, NaN when too few values were seen
#[derive(Debug, Clone)]
pub struct StandardDeviationAggregator {
    moments: Moments,
    kind: Deviation,
}

impl StandardDeviationAggregator {
    /// Sample standard deviation, needs two values
    pub fn sample() -> Self {
        Self {
            moments: Moments::new(),
            kind: Deviation::Sample,
        }
    }

    /// Population standard deviation, needs one value
    pub fn population() -> Self {
        Self {
            moments: Moments::new(),
            kind: Deviation::Population,
        }
    }

    /// Divisor in use
    pub fn kind(&self) -> Deviation {
        self.kind
    }
}

impl Aggregator for StandardDeviationAggregator {
    type Input = f64;
    type Output = f64;

    fn update(&mut self, value: f64) {
        self.moments.push(value);
    }

    fn finalize(&self) -> f64 {
        let ddof = match self.kind {
            Deviation::Sample => 1,
            Deviation::Population => 0,
        };
        self.moments.variance(ddof).map_or(f64::NAN, f64::sqrt)
    }

    fn reset(&mut self) {
        self.moments = Moments::new();
    }

    fn count(&self) -> u64 {
        self.moments.count()
    }
}
