//! Row-major pixel storage.

use thiserror::Error;

use crate::color::Rgba;

/// Errors raised when constructing a [`PixelGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height is zero
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Pixel buffer length does not equal width * height
    #[error("pixel buffer holds {actual} pixels, expected {expected} ({width}x{height})")]
    LengthMismatch {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// width * height
        expected: usize,
        /// Buffer length supplied
        actual: usize,
    },
    /// Byte buffer length does not equal width * height * 4
    #[error("byte buffer holds {actual} bytes, expected {expected} ({width}x{height} RGBA)")]
    ByteLengthMismatch {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// width * height * 4
        expected: usize,
        /// Buffer length supplied
        actual: usize,
    },
    /// width * height does not fit in memory
    #[error("image dimensions {width}x{height} overflow the pixel count")]
    TooLarge {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
}

/// A rectangular image of [`Rgba`] pixels in row-major order.
///
/// Width and height are both at least 1.
///
/// # Example
///
/// ```
/// use shepard_recolor::{PixelGrid, Rgba};
///
/// let grid = PixelGrid::new(2, 1, vec![Rgba::opaque(1, 2, 3), Rgba::TRANSPARENT]).unwrap();
/// assert_eq!(grid.get(1, 0), Some(Rgba::TRANSPARENT));
/// assert_eq!(grid.get(2, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelGrid {
    /// Wrap a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// - [`GridError::ZeroDimension`] if either dimension is zero
    /// - [`GridError::TooLarge`] if `width * height` overflows
    /// - [`GridError::LengthMismatch`] if `pixels.len() != width * height`
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self, GridError> {
        let expected = checked_pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(GridError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A grid with the bounds of `like` holding `pixels`.
    pub(crate) fn with_bounds_of(like: &PixelGrid, pixels: Vec<Rgba>) -> Self {
        debug_assert_eq!(pixels.len(), like.pixel_count());
        Self {
            width: like.width,
            height: like.height,
            pixels,
        }
    }

    /// A grid with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgba) -> Result<Self, GridError> {
        let count = checked_pixel_count(width, height)?;
        Self::new(width, height, vec![color; count])
    }

    /// Build a grid from a flat `[R, G, B, A, ...]` byte buffer.
    ///
    /// The buffer must hold exactly `width * height * 4` bytes; a trailing
    /// partial pixel is a [`GridError::ByteLengthMismatch`].
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, GridError> {
        let expected = checked_pixel_count(width, height)?
            .checked_mul(4)
            .ok_or(GridError::TooLarge { width, height })?;
        if bytes.len() != expected {
            return Err(GridError::ByteLengthMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// One row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[Rgba] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// The pixel at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Flatten to `[R, G, B, A, ...]` bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_bytes()).collect()
    }

    /// Consume the grid and return its pixel buffer.
    pub fn into_pixels(self) -> Vec<Rgba> {
        self.pixels
    }
}

fn checked_pixel_count(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::ZeroDimension { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(GridError::TooLarge { width, height })
}
