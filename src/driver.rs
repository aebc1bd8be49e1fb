//! Benchmark driver: runs a validated plan of configurations in order and
//! assembles the run summary.
//!
//! Failures stay local to their configuration. An allocation failure is
//! reported and recorded, then the next configuration runs. Only a failing
//! report sink aborts a run.
use crate::error::{BenchError, BenchResult};
use crate::harness::TimingHarness;
use crate::image::{GrayImageU8, ImageF32};
use crate::kernel::GrayKernel;
use crate::report;
use crate::stats::{ConfigurationResult, RunSummary};
use crate::types::{ImageSize, TestConfiguration};
use crate::workload::{clock_seed, WorkloadGenerator};
use log::{debug, info, warn};
use std::io::Write;

/// Smallest iteration count a plan accepts.
pub const MIN_ITERATIONS: usize = 30;

/// Small, medium and large images, 100x apart in pixel count.
pub const DEFAULT_SIZES: [ImageSize; 3] = [
    ImageSize::new(10, 10),
    ImageSize::new(100, 100),
    ImageSize::new(1000, 1000),
];

/// Ordered, validated list of configurations sharing one iteration count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchPlan {
    configurations: Vec<TestConfiguration>,
    iterations: usize,
    seed: Option<u64>,
}

impl BenchPlan {
    /// Validate every size and the shared iteration count up front.
    pub fn new(sizes: &[ImageSize], iterations: usize) -> BenchResult<Self> {
        if sizes.is_empty() {
            return Err(BenchError::EmptyPlan);
        }
        if iterations < MIN_ITERATIONS {
            return Err(BenchError::TooFewIterations {
                got: iterations,
                min: MIN_ITERATIONS,
            });
        }
        let configurations = sizes
            .iter()
            .map(|&size| TestConfiguration::from_size(size, iterations))
            .collect::<BenchResult<Vec<_>>>()?;
        Ok(Self {
            configurations,
            iterations,
            seed: None,
        })
    }

    /// Fix the base seed so the workload is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn configurations(&self) -> &[TestConfiguration] {
        &self.configurations
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Source of the input/output buffers for one configuration.
pub trait BufferAllocator {
    fn allocate(&self, config: &TestConfiguration) -> BenchResult<(ImageF32, GrayImageU8)>;
}

impl<A: BufferAllocator + ?Sized> BufferAllocator for &A {
    fn allocate(&self, config: &TestConfiguration) -> BenchResult<(ImageF32, GrayImageU8)> {
        (**self).allocate(config)
    }
}

/// Fallible heap allocation of both buffers.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    fn allocate(&self, config: &TestConfiguration) -> BenchResult<(ImageF32, GrayImageU8)> {
        let input = ImageF32::try_new(config.width(), config.height())?;
        let output = GrayImageU8::try_new(config.width(), config.height())?;
        Ok((input, output))
    }
}

pub struct BenchmarkDriver<A = HeapAllocator> {
    plan: BenchPlan,
    allocator: A,
    harness: TimingHarness,
}

impl BenchmarkDriver<HeapAllocator> {
    pub fn new(plan: BenchPlan) -> Self {
        Self {
            plan,
            allocator: HeapAllocator,
            harness: TimingHarness::new(),
        }
    }
}

impl<A: BufferAllocator> BenchmarkDriver<A> {
    pub fn with_allocator<B: BufferAllocator>(self, allocator: B) -> BenchmarkDriver<B> {
        BenchmarkDriver {
            plan: self.plan,
            allocator,
            harness: self.harness,
        }
    }

    pub fn with_harness(mut self, harness: TimingHarness) -> Self {
        self.harness = harness;
        self
    }

    pub fn plan(&self) -> &BenchPlan {
        &self.plan
    }

    /// Run every configuration with `kernel`, writing the text report to `out`.
    pub fn run<K, W>(&self, kernel: &K, out: &mut W) -> BenchResult<RunSummary>
    where
        K: GrayKernel + ?Sized,
        W: Write,
    {
        let base_seed = self.plan.seed.unwrap_or_else(clock_seed);
        let configs = self.plan.configurations();
        info!(
            "benchmark start: kernel={} configurations={} iterations={} seed={base_seed}",
            kernel.name(),
            configs.len(),
            self.plan.iterations
        );
        report::write_banner(out, kernel.name(), self.plan.iterations)?;

        let mut summary = RunSummary::new(configs.len());
        for config in configs {
            match self.run_configuration(config, kernel, base_seed, out) {
                Ok(result) => {
                    debug!(
                        "{}: avg={:.9}s min={:.9}s max={:.9}s",
                        config.size(),
                        result.average_s,
                        result.min_s,
                        result.max_s
                    );
                    summary.record_success(result);
                }
                Err(BenchError::Io(err)) => return Err(BenchError::Io(err)),
                Err(err) => {
                    warn!("{} failed: {err}", config.size());
                    let allocation = matches!(err, BenchError::Allocation { .. });
                    let reason = err.to_string();
                    report::write_failure(out, config, &reason, allocation)?;
                    summary.record_failure(*config, reason);
                }
            }
            writeln!(out)?;
        }

        report::write_summary(out, &summary)?;
        info!(
            "benchmark done: {}/{} configurations succeeded",
            summary.successful(),
            summary.total_configurations
        );
        Ok(summary)
    }

    fn run_configuration<K, W>(
        &self,
        config: &TestConfiguration,
        kernel: &K,
        base_seed: u64,
        out: &mut W,
    ) -> BenchResult<ConfigurationResult>
    where
        K: GrayKernel + ?Sized,
        W: Write,
    {
        // Both buffers drop at the end of this call, before the next
        // configuration allocates.
        let (mut input, mut output) = self.allocator.allocate(config)?;
        report::write_configuration_header(out, config)?;

        let mut workload = WorkloadGenerator::for_configuration(base_seed, config.pixels());
        let mut progress_err = None;
        let samples = self.harness.run(
            config,
            kernel,
            &mut workload,
            &mut input,
            &mut output,
            |done, total| {
                if progress_err.is_none() {
                    progress_err = report::write_progress(&mut *out, done, total).err();
                }
            },
        )?;
        if let Some(err) = progress_err {
            return Err(err.into());
        }

        let result = ConfigurationResult::from_samples(*config, &samples)?;
        report::write_timing_results(out, &result)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_enforces_minimum_iterations() {
        let err = BenchPlan::new(&DEFAULT_SIZES, 29).unwrap_err();
        assert!(matches!(err, BenchError::TooFewIterations { got: 29, min: 30 }));
        assert!(BenchPlan::new(&DEFAULT_SIZES, 30).is_ok());
    }

    #[test]
    fn plan_rejects_invalid_sizes_before_running() {
        let sizes = [ImageSize::new(10, 10), ImageSize::new(0, 5)];
        let err = BenchPlan::new(&sizes, 30).unwrap_err();
        assert!(matches!(err, BenchError::InvalidSize { width: 0, height: 5 }));
        assert!(matches!(BenchPlan::new(&[], 30), Err(BenchError::EmptyPlan)));
    }

    #[test]
    fn plan_keeps_order_and_iterations() {
        let plan = BenchPlan::new(&DEFAULT_SIZES, 40).unwrap().with_seed(5);
        let sizes: Vec<_> = plan.configurations().iter().map(|c| c.size()).collect();
        assert_eq!(sizes, DEFAULT_SIZES.to_vec());
        assert!(plan.configurations().iter().all(|c| c.iterations() == 40));
        assert_eq!(plan.seed(), Some(5));
    }

    #[test]
    fn heap_allocator_sizes_buffers() {
        let cfg = TestConfiguration::new(12, 5, 1).unwrap();
        let (input, output) = HeapAllocator.allocate(&cfg).unwrap();
        assert_eq!((input.w, input.h), (12, 5));
        assert_eq!(output.into_raw().len(), 60);
    }
}
