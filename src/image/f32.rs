//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Input side of a conversion kernel. Intensities are nominally in
//! [0.0, 1.0]; nothing here enforces that range.
use super::try_alloc_pixels;
use crate::error::BenchResult;

#[derive(Clone, Debug)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Like [`ImageF32::new`] but reports allocation failure instead of aborting.
    pub fn try_new(w: usize, h: usize) -> BenchResult<Self> {
        let data = try_alloc_pixels::<f32>(w, h)?;
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Wrap existing row-major data. Returns `None` if `data.len() != w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Option<Self> {
        (w.checked_mul(h) == Some(data.len())).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl crate::image::traits::ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [f32]> {
        if self.stride == self.w {
            Some(&mut self.data[..self.w * self.h])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    #[test]
    fn try_new_matches_new() {
        let img = ImageF32::try_new(7, 3).expect("small allocation");
        assert_eq!(img.data.len(), 21);
        assert_eq!(img.stride, 7);
        assert!(img.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(ImageF32::from_vec(2, 2, vec![0.0; 3]).is_none());
        let img = ImageF32::from_vec(2, 2, vec![0.1, 0.2, 0.3, 0.4]).expect("exact length");
        assert_eq!(img.row(1), &[0.3, 0.4]);
        assert_eq!(img.get(1, 0), 0.2);
    }
}
