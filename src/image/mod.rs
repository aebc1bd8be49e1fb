//! Single-channel image buffers used by the benchmark.
//!
//! `ImageF32` holds the float intensities fed to a kernel, `GrayImageU8` the
//! byte image it writes. Both are row-major with `stride == width` and can
//! be allocated fallibly so an oversized configuration fails locally.
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::{GrayImageU8, ImageU8};

use crate::error::{BenchError, BenchResult};
use std::mem::size_of;

// The `f32`/`u8` submodules shadow the primitive names in this module.
const BYTES_PER_PIXEL: usize =
    size_of::<core::primitive::f32>() + size_of::<core::primitive::u8>();

/// Bytes held by one float input plus one byte output image of `pixels` pixels.
pub fn memory_footprint_bytes(pixels: usize) -> usize {
    pixels.saturating_mul(BYTES_PER_PIXEL)
}

/// Same as [`memory_footprint_bytes`], in MiB.
pub fn memory_footprint_mib(pixels: usize) -> f64 {
    memory_footprint_bytes(pixels) as f64 / (1024.0 * 1024.0)
}

/// Allocate `w * h` default-initialised pixels without aborting on failure.
pub(crate) fn try_alloc_pixels<T: Copy + Default>(w: usize, h: usize) -> BenchResult<Vec<T>> {
    let pixels = w
        .checked_mul(h)
        .ok_or(BenchError::SizeOverflow { width: w, height: h })?;
    let alloc_err = || BenchError::Allocation {
        width: w,
        height: h,
        pixels,
        bytes: pixels.saturating_mul(size_of::<T>()),
    };
    // Vec capacity is capped at isize::MAX bytes.
    if pixels
        .checked_mul(size_of::<T>())
        .map_or(true, |bytes| bytes > isize::MAX as usize)
    {
        return Err(alloc_err());
    }
    let mut data = Vec::new();
    data.try_reserve_exact(pixels).map_err(|_| alloc_err())?;
    data.resize(pixels, T::default());
    Ok(data)
}
