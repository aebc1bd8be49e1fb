use super::{intensity_to_byte, GrayKernel};
use crate::image::{GrayImageU8, ImageF32, ImageView, ImageViewMut};

/// Reference kernel: one pixel at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarKernel;

impl GrayKernel for ScalarKernel {
    fn name(&self) -> &str {
        "scalar"
    }

    fn convert(&self, input: &ImageF32, output: &mut GrayImageU8) {
        debug_assert_eq!(
            (input.width(), input.height()),
            (output.width(), output.height())
        );
        let rows = input.height().min(output.height());
        for y in 0..rows {
            let src = input.row(y);
            let dst = output.row_mut(y);
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = intensity_to_byte(s);
            }
        }
    }
}
