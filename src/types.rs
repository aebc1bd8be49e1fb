use crate::error::{BenchError, BenchResult};
use serde::Deserialize;
use std::fmt;

/// Width and height of one synthetic image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ImageSize {
    pub width: usize,
    pub height: usize,
}

impl ImageSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of pixels, `None` on overflow.
    #[inline]
    pub fn pixels(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(usize, usize)> for ImageSize {
    fn from((width, height): (usize, usize)) -> Self {
        Self { width, height }
    }
}

/// One benchmark unit of work: an image size and how many times to convert it.
///
/// Only constructible through [`TestConfiguration::new`], so a value in hand
/// always has positive dimensions, a representable pixel count and at least
/// one iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestConfiguration {
    size: ImageSize,
    pixels: usize,
    iterations: usize,
}

impl TestConfiguration {
    pub fn new(width: usize, height: usize, iterations: usize) -> BenchResult<Self> {
        Self::from_size(ImageSize::new(width, height), iterations)
    }

    pub fn from_size(size: ImageSize, iterations: usize) -> BenchResult<Self> {
        let ImageSize { width, height } = size;
        if width == 0 || height == 0 {
            return Err(BenchError::InvalidSize { width, height });
        }
        let pixels = size
            .pixels()
            .ok_or(BenchError::SizeOverflow { width, height })?;
        if iterations == 0 {
            return Err(BenchError::TooFewIterations {
                got: iterations,
                min: 1,
            });
        }
        Ok(Self {
            size,
            pixels,
            iterations,
        })
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }
    #[inline]
    pub fn pixels(&self) -> usize {
        self.pixels
    }
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            TestConfiguration::new(0, 10, 30),
            Err(BenchError::InvalidSize {
                width: 0,
                height: 10
            })
        ));
        assert!(matches!(
            TestConfiguration::new(10, 0, 30),
            Err(BenchError::InvalidSize { .. })
        ));
    }

    #[test]
    fn rejects_zero_iterations() {
        assert!(matches!(
            TestConfiguration::new(10, 10, 0),
            Err(BenchError::TooFewIterations { got: 0, min: 1 })
        ));
    }

    #[test]
    fn rejects_overflowing_pixel_count() {
        assert!(matches!(
            TestConfiguration::new(usize::MAX, 2, 1),
            Err(BenchError::SizeOverflow { .. })
        ));
    }

    #[test]
    fn exposes_pixel_count_and_label() {
        let cfg = TestConfiguration::new(100, 20, 30).expect("valid configuration");
        assert_eq!(cfg.pixels(), 2000);
        assert_eq!(cfg.size().to_string(), "100x20");
    }
}
