//! Error type shared by the benchmark core.
//!
//! Every variant is local to a single configuration: the driver turns them
//! into diagnostics and keeps going.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    /// Width or height of zero.
    #[error("invalid image size {width}x{height}: dimensions must be positive")]
    InvalidSize { width: usize, height: usize },

    /// `width * height` does not fit in `usize`.
    #[error("pixel count of {width}x{height} image overflows usize")]
    SizeOverflow { width: usize, height: usize },

    /// Fewer iterations than the caller requires.
    #[error("iteration count must be at least {min}, got {got}")]
    TooFewIterations { got: usize, min: usize },

    /// No image sizes in a benchmark plan.
    #[error("benchmark plan contains no image sizes")]
    EmptyPlan,

    /// Buffer reservation failed for one configuration.
    #[error("memory allocation failed for {width}x{height} image ({pixels} pixels, {bytes} bytes)")]
    Allocation {
        width: usize,
        height: usize,
        pixels: usize,
        bytes: usize,
    },

    /// Buffers handed to the harness do not match the configuration.
    #[error("buffer size {actual_w}x{actual_h} does not match configuration {expected_w}x{expected_h}")]
    BufferMismatch {
        expected_w: usize,
        expected_h: usize,
        actual_w: usize,
        actual_h: usize,
    },

    /// Statistics requested over zero samples.
    #[error("cannot aggregate an empty sample set")]
    EmptySamples,

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type BenchResult<T> = Result<T, BenchError>;
