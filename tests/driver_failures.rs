mod common;

use common::fixtures::{init_logger, FailingAllocator};
use gray_bench::{BenchPlan, BenchmarkDriver, ImageSize, LaneKernel, ScalarKernel};

#[test]
fn allocation_failure_is_local_to_its_configuration() {
    init_logger();
    let sizes = [
        ImageSize::new(10, 10),
        ImageSize::new(20, 20),
        ImageSize::new(40, 40),
    ];
    let plan = BenchPlan::new(&sizes, 30).unwrap().with_seed(3);
    let allocator = FailingAllocator::new(ImageSize::new(20, 20));
    let driver = BenchmarkDriver::new(plan).with_allocator(allocator);

    let mut out = Vec::new();
    let summary = driver.run(&ScalarKernel, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(summary.total_configurations, 3);
    assert_eq!(summary.successful(), 2);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.failures[0].config.size(), ImageSize::new(20, 20));

    // Scaling pairs the surviving neighbours: 10x10 -> 40x40.
    assert_eq!(summary.scaling.len(), 1);
    assert_eq!(summary.scaling[0].from, ImageSize::new(10, 10));
    assert_eq!(summary.scaling[0].to, ImageSize::new(40, 40));
    assert_eq!(summary.scaling[0].pixel_ratio, 16.0);

    assert!(text.contains("FAILED: Could not complete timing for 20x20 image"));
    assert!(text.contains("This might be due to insufficient memory."));
    assert!(text.contains("Successfully tested 2 out of 3 image sizes"));
    assert!(text.contains("--- Timing 40x40 image (1600 pixels) ---"));
    assert!(!text.contains("--- Timing 20x20 image"));
}

#[test]
fn run_completes_with_zero_successes() {
    let plan = BenchPlan::new(&[ImageSize::new(16, 16)], 30).unwrap();
    let driver =
        BenchmarkDriver::new(plan).with_allocator(FailingAllocator::new(ImageSize::new(16, 16)));
    let mut out = Vec::new();
    let summary = driver.run(&LaneKernel, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(summary.successful(), 0);
    assert!(summary.scaling.is_empty());
    assert!(text.contains("Successfully tested 0 out of 1 image sizes"));
    assert!(text.contains("=== SUMMARY REPORT ==="));
}

#[test]
fn every_configuration_is_attempted_once() {
    let sizes = [ImageSize::new(8, 8), ImageSize::new(16, 16), ImageSize::new(32, 32)];
    let plan = BenchPlan::new(&sizes, 30).unwrap();
    let allocator = FailingAllocator::new(ImageSize::new(8, 8));
    let driver = BenchmarkDriver::new(plan).with_allocator(&allocator);
    let mut sink = std::io::sink();
    let summary = driver.run(&ScalarKernel, &mut sink).unwrap();
    assert_eq!(allocator.attempts.get(), 3);
    assert_eq!(summary.successful(), 2);
    assert_eq!(summary.failed(), 1);
}
