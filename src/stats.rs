//! Aggregation of per-iteration timings into configuration results and the
//! cross-size scaling analysis.
use crate::error::{BenchError, BenchResult};
use crate::types::{ImageSize, TestConfiguration};

/// Elapsed seconds of each kernel invocation, in invocation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IterationSamples {
    seconds: Vec<f64>,
}

impl IterationSamples {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            seconds: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, elapsed_s: f64) {
        self.seconds.push(elapsed_s);
    }

    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.seconds.iter().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.seconds
    }
}

impl From<Vec<f64>> for IterationSamples {
    fn from(seconds: Vec<f64>) -> Self {
        Self { seconds }
    }
}

impl FromIterator<f64> for IterationSamples {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self {
            seconds: iter.into_iter().collect(),
        }
    }
}

/// Summary statistics for one configuration. All times in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigurationResult {
    pub config: TestConfiguration,
    /// Number of samples aggregated.
    pub samples: usize,
    pub total_s: f64,
    pub average_s: f64,
    pub min_s: f64,
    pub max_s: f64,
    pub pixels_per_second: f64,
    pub megapixels_per_second: f64,
}

impl ConfigurationResult {
    /// Aggregate `samples` taken for `config`.
    ///
    /// `average = total / N`, and `min <= average <= max` holds up to
    /// rounding. Throughput is infinite when the average is exactly zero.
    pub fn from_samples(
        config: TestConfiguration,
        samples: &IterationSamples,
    ) -> BenchResult<Self> {
        if samples.is_empty() {
            return Err(BenchError::EmptySamples);
        }
        let n = samples.len();
        let mut total = 0.0f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for s in samples.iter() {
            total += s;
            min = min.min(s);
            max = max.max(s);
        }
        // Keep the ordering invariant exact despite summation rounding.
        let average = (total / n as f64).max(min).min(max);
        let pixels_per_second = config.pixels() as f64 / average;
        Ok(Self {
            config,
            samples: n,
            total_s: total,
            average_s: average,
            min_s: min,
            max_s: max,
            pixels_per_second,
            megapixels_per_second: pixels_per_second / 1_000_000.0,
        })
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        self.config.size()
    }

    #[inline]
    pub fn pixels(&self) -> usize {
        self.config.pixels()
    }

    pub fn average_ms(&self) -> f64 {
        self.average_s * 1000.0
    }

    /// Average time spent per pixel, in nanoseconds.
    pub fn time_per_pixel_ns(&self) -> f64 {
        self.average_s * 1e9 / self.pixels() as f64
    }
}

/// Observed slowdown between two consecutive successful configurations.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalingEntry {
    pub from: ImageSize,
    pub to: ImageSize,
    /// `pixels(to) / pixels(from)`: the slowdown expected under linear scaling.
    pub pixel_ratio: f64,
    /// `average(to) / average(from)`.
    pub actual_ratio: f64,
    /// `pixel_ratio / actual_ratio * 100`; `None` when the ratio is not finite
    /// or zero.
    pub efficiency_percent: Option<f64>,
}

impl ScalingEntry {
    pub fn between(prev: &ConfigurationResult, next: &ConfigurationResult) -> Self {
        let pixel_ratio = next.pixels() as f64 / prev.pixels() as f64;
        let actual_ratio = next.average_s / prev.average_s;
        let efficiency_percent = scaling_efficiency(pixel_ratio, actual_ratio);
        Self {
            from: prev.size(),
            to: next.size(),
            pixel_ratio,
            actual_ratio,
            efficiency_percent,
        }
    }
}

/// `(pixel_ratio / actual_ratio) * 100`, or `None` if undefined.
pub fn scaling_efficiency(pixel_ratio: f64, actual_ratio: f64) -> Option<f64> {
    if !actual_ratio.is_finite() || actual_ratio <= 0.0 {
        return None;
    }
    let eff = pixel_ratio / actual_ratio * 100.0;
    eff.is_finite().then_some(eff)
}

/// A configuration that did not produce a result, with the reason.
#[derive(Clone, Debug, PartialEq)]
pub struct FailedConfiguration {
    pub config: TestConfiguration,
    pub reason: String,
}

/// Outcome of a full benchmark run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub total_configurations: usize,
    pub results: Vec<ConfigurationResult>,
    pub failures: Vec<FailedConfiguration>,
    pub scaling: Vec<ScalingEntry>,
}

impl RunSummary {
    pub fn new(total_configurations: usize) -> Self {
        Self {
            total_configurations,
            ..Default::default()
        }
    }

    pub fn record_success(&mut self, result: ConfigurationResult) {
        if let Some(prev) = self.results.last() {
            self.scaling.push(ScalingEntry::between(prev, &result));
        }
        self.results.push(result);
    }

    pub fn record_failure(&mut self, config: TestConfiguration, reason: impl Into<String>) {
        self.failures.push(FailedConfiguration {
            config,
            reason: reason.into(),
        });
    }

    pub fn successful(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
