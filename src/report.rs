//! Plain-text rendering of benchmark progress, per-size results and the
//! final summary.
use crate::image::memory_footprint_mib;
use crate::stats::{ConfigurationResult, RunSummary, ScalingEntry};
use crate::types::TestConfiguration;
use std::io::{self, Write};

const RULE: &str = "===========================================";

pub fn write_banner<W: Write>(out: &mut W, kernel_name: &str, iterations: usize) -> io::Result<()> {
    writeln!(out, "=== GRAYSCALE CONVERSION TIMING BENCHMARK ===")?;
    writeln!(out, "Timing `{kernel_name}` conversion kernel")?;
    writeln!(out, "Random float input values: [0.0, 1.0]")?;
    writeln!(out, "Output integer values: [0, 255]")?;
    writeln!(out, "Number of iterations per test: {iterations}")?;
    writeln!(out, "{RULE}")
}

/// Header printed once buffers for `config` are allocated.
pub fn write_configuration_header<W: Write>(
    out: &mut W,
    config: &TestConfiguration,
) -> io::Result<()> {
    writeln!(
        out,
        "\n--- Timing {} image ({} pixels) ---",
        config.size(),
        config.pixels()
    )?;
    writeln!(
        out,
        "Memory allocated: {:.2} MB",
        memory_footprint_mib(config.pixels())
    )?;
    writeln!(out, "Running {} iterations...", config.iterations())
}

pub fn write_progress<W: Write>(out: &mut W, done: usize, total: usize) -> io::Result<()> {
    writeln!(out, "  Completed {done}/{total} iterations")
}

pub fn write_timing_results<W: Write>(out: &mut W, r: &ConfigurationResult) -> io::Result<()> {
    writeln!(out, "\n=== TIMING RESULTS ===")?;
    writeln!(out, "Image Size: {} ({} pixels)", r.size(), r.pixels())?;
    writeln!(out, "Iterations: {}", r.samples)?;
    writeln!(out, "Total Time: {:.6} seconds", r.total_s)?;
    writeln!(
        out,
        "Average Time: {:.9} seconds ({:.6} ms)",
        r.average_s,
        r.average_s * 1000.0
    )?;
    writeln!(
        out,
        "Min Time: {:.9} seconds ({:.6} ms)",
        r.min_s,
        r.min_s * 1000.0
    )?;
    writeln!(
        out,
        "Max Time: {:.9} seconds ({:.6} ms)",
        r.max_s,
        r.max_s * 1000.0
    )?;
    writeln!(out, "Time per pixel: {:.3} nanoseconds", r.time_per_pixel_ns())?;
    writeln!(out, "Throughput: {:.0} pixels/second", r.pixels_per_second)?;
    writeln!(
        out,
        "Throughput: {:.3} megapixels/second",
        r.megapixels_per_second
    )?;
    writeln!(out, "======================")
}

/// Diagnostic for a configuration that produced no result.
pub fn write_failure<W: Write>(
    out: &mut W,
    config: &TestConfiguration,
    reason: &str,
    allocation: bool,
) -> io::Result<()> {
    writeln!(out, "ERROR: {reason}")?;
    writeln!(
        out,
        "FAILED: Could not complete timing for {} image",
        config.size()
    )?;
    if allocation {
        writeln!(out, "This might be due to insufficient memory.")?;
        writeln!(
            out,
            "Consider reducing the image size or closing other applications."
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(out, "=== SUMMARY REPORT ===")?;
    writeln!(
        out,
        "Successfully tested {} out of {} image sizes",
        summary.successful(),
        summary.total_configurations
    )?;

    if !summary.failures.is_empty() {
        writeln!(out, "\nFailed:")?;
        for f in &summary.failures {
            writeln!(out, "- {}: {}", f.config.size(), f.reason)?;
        }
    }

    if summary.results.is_empty() {
        return Ok(());
    }

    writeln!(out, "\nPerformance Summary:")?;
    for r in &summary.results {
        writeln!(
            out,
            "- {}: {:.6} ms ({:.3} MP/s)",
            r.size(),
            r.average_ms(),
            r.megapixels_per_second
        )?;
    }

    if !summary.scaling.is_empty() {
        writeln!(out, "\nScaling Analysis:")?;
        for entry in &summary.scaling {
            write_scaling_entry(out, entry)?;
        }
    }
    Ok(())
}

fn write_scaling_entry<W: Write>(out: &mut W, entry: &ScalingEntry) -> io::Result<()> {
    writeln!(
        out,
        "- {} is {:.1}x slower than {}",
        entry.to, entry.actual_ratio, entry.from
    )?;
    writeln!(
        out,
        "- Expected ratio for linear scaling: {}x",
        format_ratio(entry.pixel_ratio)
    )?;
    match entry.efficiency_percent {
        Some(eff) => writeln!(out, "- Actual scaling efficiency: {eff:.1}%"),
        None => writeln!(out, "- Actual scaling efficiency: n/a"),
    }
}

/// Whole ratios print without decimals (`100x`), others with two.
fn format_ratio(ratio: f64) -> String {
    if ratio.fract() == 0.0 && ratio.abs() < 1e15 {
        format!("{ratio:.0}")
    } else {
        format!("{ratio:.2}")
    }
}
