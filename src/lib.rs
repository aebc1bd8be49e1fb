#![doc = include_str!("../README.md")]

pub mod config;
pub mod driver;
pub mod error;
pub mod harness;
pub mod image;
pub mod kernel;
pub mod report;
pub mod stats;
pub mod types;
pub mod workload;

// --- High-level re-exports -------------------------------------------------

pub use crate::driver::{BenchPlan, BenchmarkDriver, BufferAllocator, HeapAllocator};
pub use crate::error::{BenchError, BenchResult};
pub use crate::kernel::{FnKernel, GrayKernel, KernelKind, LaneKernel, ScalarKernel};
pub use crate::stats::{ConfigurationResult, RunSummary, ScalingEntry};
pub use crate::types::{ImageSize, TestConfiguration};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use gray_bench::prelude::*;
///
/// # fn main() -> Result<(), BenchError> {
/// let plan = BenchPlan::new(&[ImageSize::new(64, 64), ImageSize::new(640, 640)], 30)?
///     .with_seed(7);
/// let summary = BenchmarkDriver::new(plan).run(&LaneKernel, &mut std::io::stdout())?;
/// println!("{}/{} sizes timed", summary.successful(), summary.total_configurations);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayImageU8, ImageF32, ImageView, ImageViewMut};
    pub use crate::workload::WorkloadGenerator;
    pub use crate::{
        BenchError, BenchPlan, BenchmarkDriver, GrayKernel, ImageSize, LaneKernel, ScalarKernel,
        TestConfiguration,
    };
}
