use gray_bench::image::{GrayImageU8, ImageF32};
use gray_bench::{BenchError, BenchResult, BufferAllocator, HeapAllocator};
use gray_bench::{ImageSize, TestConfiguration};
use std::cell::Cell;

/// Heap allocation except for one size, which reports an allocation failure.
pub struct FailingAllocator {
    pub fail_on: ImageSize,
    pub attempts: Cell<usize>,
}

impl FailingAllocator {
    pub fn new(fail_on: ImageSize) -> Self {
        Self {
            fail_on,
            attempts: Cell::new(0),
        }
    }
}

impl BufferAllocator for FailingAllocator {
    fn allocate(&self, config: &TestConfiguration) -> BenchResult<(ImageF32, GrayImageU8)> {
        self.attempts.set(self.attempts.get() + 1);
        if config.size() == self.fail_on {
            return Err(BenchError::Allocation {
                width: config.width(),
                height: config.height(),
                pixels: config.pixels(),
                bytes: config.pixels() * 5,
            });
        }
        HeapAllocator.allocate(config)
    }
}

/// Reference scaling used to check kernel output.
pub fn expected_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
