//! Float-to-byte grayscale conversion kernels.
//!
//! The harness only sees [`GrayKernel`]; which routine sits behind it
//! (scalar loop, lane-chunked loop, an arbitrary function) does not change
//! how it is timed.
//!
//! Contract for every implementation:
//! - `input` and `output` have identical width and height;
//! - each output pixel is `round(v * 255)` saturated into `[0, 255]`
//!   (any monotonic equivalent is acceptable; values outside `[0, 1]` are
//!   implementation-defined);
//! - nothing outside the `width * height` extents is touched and no
//!   reference to either buffer survives the call.
mod lanes;
mod scalar;

pub use self::lanes::LaneKernel;
pub use self::scalar::ScalarKernel;

use crate::image::{GrayImageU8, ImageF32, ImageView, ImageViewMut};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub trait GrayKernel {
    /// Short identifier used in reports.
    fn name(&self) -> &str;

    /// Convert `input` into `output`. Both images share the same dimensions.
    fn convert(&self, input: &ImageF32, output: &mut GrayImageU8);
}

impl<K: GrayKernel + ?Sized> GrayKernel for &K {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn convert(&self, input: &ImageF32, output: &mut GrayImageU8) {
        (**self).convert(input, output)
    }
}

impl<K: GrayKernel + ?Sized> GrayKernel for Box<K> {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn convert(&self, input: &ImageF32, output: &mut GrayImageU8) {
        (**self).convert(input, output)
    }
}

/// Scale one intensity to a byte: `round(v * 255)`, saturated. NaN maps to 0.
#[inline]
pub fn intensity_to_byte(v: f32) -> u8 {
    // `as` saturates and sends NaN to 0.
    (v * 255.0).round() as u8
}

/// Adapter turning a plain function over row-major slices into a kernel.
///
/// The function receives exactly `width * height` elements on each side.
pub struct FnKernel<F> {
    name: String,
    func: F,
}

impl<F> FnKernel<F>
where
    F: Fn(&[f32], &mut [u8]),
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> GrayKernel for FnKernel<F>
where
    F: Fn(&[f32], &mut [u8]),
{
    fn name(&self) -> &str {
        &self.name
    }

    fn convert(&self, input: &ImageF32, output: &mut GrayImageU8) {
        if let (Some(src), Some(dst)) = (input.as_slice(), output.as_mut_slice()) {
            (self.func)(src, dst);
            return;
        }
        for y in 0..input.height().min(output.height()) {
            (self.func)(input.row(y), output.row_mut(y));
        }
    }
}

impl<F> fmt::Debug for FnKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnKernel").field("name", &self.name).finish()
    }
}

/// Built-in kernels selectable from configuration or the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    #[default]
    Scalar,
    Lanes,
}

impl KernelKind {
    pub fn build(self) -> Box<dyn GrayKernel> {
        match self {
            KernelKind::Scalar => Box::new(ScalarKernel),
            KernelKind::Lanes => Box::new(LaneKernel),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KernelKind::Scalar => "scalar",
            KernelKind::Lanes => "lanes",
        }
    }
}

impl FromStr for KernelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(KernelKind::Scalar),
            "lanes" | "simd" => Ok(KernelKind::Lanes),
            other => Err(format!(
                "Unknown kernel `{other}` (expected `scalar` or `lanes`)"
            )),
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
