//! Timing harness: repeated, individually timed kernel invocations.
//!
//! Each iteration regenerates the input first and only then reads the
//! clock, so the measured span covers the kernel call alone. Invocations are
//! strictly sequential on the calling thread.
use crate::error::{BenchError, BenchResult};
use crate::image::{GrayImageU8, ImageF32, ImageView};
use crate::kernel::GrayKernel;
use crate::stats::IterationSamples;
use crate::types::TestConfiguration;
use crate::workload::WorkloadGenerator;
use log::trace;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Iteration counts below this do not report progress.
pub const PROGRESS_MIN_ITERATIONS: usize = 30;
/// Progress is reported after every this many iterations.
pub const PROGRESS_INTERVAL: usize = 10;

/// Measure wall-clock time for a synchronous operation.
pub fn measure<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    (result, elapsed)
}

#[derive(Clone, Copy, Debug)]
pub struct TimingHarness {
    progress_interval: usize,
    progress_min_iterations: usize,
}

impl Default for TimingHarness {
    fn default() -> Self {
        Self {
            progress_interval: PROGRESS_INTERVAL,
            progress_min_iterations: PROGRESS_MIN_ITERATIONS,
        }
    }
}

impl TimingHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report progress every `interval` iterations once a run has at least
    /// `min_iterations`. An interval of 0 disables progress.
    pub fn with_progress(mut self, interval: usize, min_iterations: usize) -> Self {
        self.progress_interval = interval;
        self.progress_min_iterations = min_iterations;
        self
    }

    /// Time `config.iterations()` conversions of freshly generated input.
    ///
    /// `progress(done, total)` is called after each reporting interval.
    /// Fails only if the buffers do not match the configuration.
    pub fn run<K, P>(
        &self,
        config: &TestConfiguration,
        kernel: &K,
        workload: &mut WorkloadGenerator,
        input: &mut ImageF32,
        output: &mut GrayImageU8,
        mut progress: P,
    ) -> BenchResult<IterationSamples>
    where
        K: GrayKernel + ?Sized,
        P: FnMut(usize, usize),
    {
        check_dims(config, input.width(), input.height())?;
        check_dims(config, output.width(), output.height())?;

        let n = config.iterations();
        let report_progress = self.progress_interval > 0 && n >= self.progress_min_iterations;
        let mut samples = IterationSamples::with_capacity(n);
        for i in 0..n {
            workload.fill(input);

            let start = Instant::now();
            kernel.convert(black_box(&*input), black_box(&mut *output));
            let elapsed = start.elapsed().as_secs_f64();

            trace!(
                "{} {} iteration {}/{}: {:.9}s",
                kernel.name(),
                config.size(),
                i + 1,
                n,
                elapsed
            );
            samples.push(elapsed);

            if report_progress && (i + 1) % self.progress_interval == 0 {
                progress(i + 1, n);
            }
        }
        Ok(samples)
    }
}

fn check_dims(config: &TestConfiguration, w: usize, h: usize) -> BenchResult<()> {
    if (w, h) == (config.width(), config.height()) {
        Ok(())
    } else {
        Err(BenchError::BufferMismatch {
            expected_w: config.width(),
            expected_h: config.height(),
            actual_w: w,
            actual_h: h,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{FnKernel, ScalarKernel};
    use std::cell::Cell;

    #[test]
    fn collects_one_sample_per_iteration() {
        let cfg = TestConfiguration::new(8, 4, 5).unwrap();
        let mut workload = WorkloadGenerator::from_seed(1);
        let mut input = ImageF32::new(8, 4);
        let mut output = GrayImageU8::new(8, 4);
        let samples = TimingHarness::new()
            .run(&cfg, &ScalarKernel, &mut workload, &mut input, &mut output, |_, _| {})
            .unwrap();
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|s| s >= 0.0));
    }

    #[test]
    fn input_is_regenerated_before_each_call() {
        let cfg = TestConfiguration::new(4, 4, 3).unwrap();
        let seen = Cell::new(Vec::<f32>::new());
        let kernel = FnKernel::new("spy", |src: &[f32], _dst: &mut [u8]| {
            let mut v = seen.take();
            v.push(src[0]);
            seen.set(v);
        });
        let mut workload = WorkloadGenerator::from_seed(9);
        let mut input = ImageF32::new(4, 4);
        let mut output = GrayImageU8::new(4, 4);
        TimingHarness::new()
            .run(&cfg, &kernel, &mut workload, &mut input, &mut output, |_, _| {})
            .unwrap();
        let firsts = seen.take();
        assert_eq!(firsts.len(), 3);
        assert!(firsts[0] != firsts[1] || firsts[1] != firsts[2]);
    }

    #[test]
    fn progress_fires_every_ten_iterations_from_thirty() {
        let cfg = TestConfiguration::new(2, 2, 35).unwrap();
        let mut calls = Vec::new();
        let mut workload = WorkloadGenerator::from_seed(2);
        let mut input = ImageF32::new(2, 2);
        let mut output = GrayImageU8::new(2, 2);
        TimingHarness::new()
            .run(
                &cfg,
                &ScalarKernel,
                &mut workload,
                &mut input,
                &mut output,
                |done, total| calls.push((done, total)),
            )
            .unwrap();
        assert_eq!(calls, vec![(10, 35), (20, 35), (30, 35)]);
    }

    #[test]
    fn short_runs_stay_quiet() {
        let cfg = TestConfiguration::new(2, 2, 29).unwrap();
        let mut fired = 0;
        let mut workload = WorkloadGenerator::from_seed(2);
        let mut input = ImageF32::new(2, 2);
        let mut output = GrayImageU8::new(2, 2);
        TimingHarness::new()
            .run(&cfg, &ScalarKernel, &mut workload, &mut input, &mut output, |_, _| {
                fired += 1
            })
            .unwrap();
        assert_eq!(fired, 0);
    }

    #[test]
    fn mismatched_buffers_are_rejected() {
        let cfg = TestConfiguration::new(4, 4, 1).unwrap();
        let mut workload = WorkloadGenerator::from_seed(2);
        let mut input = ImageF32::new(4, 4);
        let mut output = GrayImageU8::new(4, 3);
        let err = TimingHarness::new()
            .run(&cfg, &ScalarKernel, &mut workload, &mut input, &mut output, |_, _| {})
            .unwrap_err();
        assert!(matches!(err, BenchError::BufferMismatch { actual_h: 3, .. }));
    }

    #[test]
    fn measure_returns_result_and_duration() {
        let (v, elapsed) = measure(|| 6 * 7);
        assert_eq!(v, 42);
        assert!(elapsed >= Duration::ZERO);
    }
}
