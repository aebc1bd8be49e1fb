use super::{intensity_to_byte, GrayKernel};
use crate::image::{GrayImageU8, ImageF32, ImageView, ImageViewMut};

const LANES: usize = 8;

/// Kernel processing each row in fixed 8-wide chunks plus a scalar tail.
///
/// Produces the same bytes as [`super::ScalarKernel`]; the fixed-width inner
/// loops give the compiler a shape it can vectorise.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaneKernel;

impl GrayKernel for LaneKernel {
    fn name(&self) -> &str {
        "lanes"
    }

    fn convert(&self, input: &ImageF32, output: &mut GrayImageU8) {
        debug_assert_eq!(
            (input.width(), input.height()),
            (output.width(), output.height())
        );
        let rows = input.height().min(output.height());
        for y in 0..rows {
            convert_row(input.row(y), output.row_mut(y));
        }
    }
}

#[inline]
fn convert_row(src: &[f32], dst: &mut [u8]) {
    let mut src_chunks = src.chunks_exact(LANES);
    let mut dst_chunks = dst.chunks_exact_mut(LANES);
    for (s, d) in (&mut src_chunks).zip(&mut dst_chunks) {
        let mut scaled = [0.0f32; LANES];
        for i in 0..LANES {
            scaled[i] = (s[i] * 255.0).round();
        }
        for i in 0..LANES {
            d[i] = scaled[i] as u8;
        }
    }
    for (d, &s) in dst_chunks
        .into_remainder()
        .iter_mut()
        .zip(src_chunks.remainder())
    {
        *d = intensity_to_byte(s);
    }
}
