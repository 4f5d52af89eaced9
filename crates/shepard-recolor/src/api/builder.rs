//! Recolorer builder, the main entry point for the crate.
//!
//! [`Recolorer`] bundles a palette, the Shepard parameters and the parallel
//! processor settings behind a fluent builder.

use std::time::Duration;

use crate::palette::Palette;
use crate::raster::{
    NoProgress, PixelGrid, ProcessingConfig, ProgressSink, RasterProcessor, DEFAULT_LUMINOSITY,
    DEFAULT_NEAREST, DEFAULT_POWER,
};

use super::error::RecolorError;

/// High-level recoloring builder.
///
/// - Constructor requires a [`Palette`]
/// - Configuration methods consume and return `self`
/// - Parameters are validated when an image is recolored, so a bad value
///   surfaces as [`RecolorError::Config`] rather than being clamped
/// - [`recolor()`](Self::recolor) takes `&self`, so one builder serves many
///   images
///
/// # Example
///
/// ```
/// use shepard_recolor::{Palette, PixelGrid, Recolorer, Rgba};
///
/// let palette = Palette::from_hex(&["#000000", "#808080", "#ffffff"]).unwrap();
/// let recolorer = Recolorer::new(palette).nearest(2).power(3.0);
///
/// let image = PixelGrid::filled(2, 2, Rgba::opaque(128, 128, 128)).unwrap();
/// let result = recolorer.recolor(&image).unwrap();
///
/// assert_eq!(result.get(0, 0), Some(Rgba::opaque(128, 128, 128)));
/// ```
#[derive(Debug, Clone)]
pub struct Recolorer {
    palette: Palette,
    luminosity: f64,
    nearest: usize,
    power: f64,
    processor: RasterProcessor,
}

impl Recolorer {
    /// Create a recolorer with default parameters: luminosity 1.0, 30
    /// nearest colors, power 2.5.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            luminosity: DEFAULT_LUMINOSITY,
            nearest: DEFAULT_NEAREST,
            power: DEFAULT_POWER,
            processor: RasterProcessor::new(),
        }
    }

    /// Set the brightness factor applied before matching.
    #[inline]
    pub fn luminosity(mut self, factor: f64) -> Self {
        self.luminosity = factor;
        self
    }

    /// Set how many palette colors are blended per pixel.
    #[inline]
    pub fn nearest(mut self, count: usize) -> Self {
        self.nearest = count;
        self
    }

    /// Set the inverse distance power.
    #[inline]
    pub fn power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Cap the number of worker threads.
    #[inline]
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.processor = self.processor.max_workers(workers);
        self
    }

    /// Set the minimum time between progress updates.
    #[inline]
    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.processor = self.processor.progress_interval(interval);
        self
    }

    /// The palette colors are matched against.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Validate the current parameters.
    pub fn config(&self) -> Result<ProcessingConfig, RecolorError> {
        Ok(ProcessingConfig::new(
            self.luminosity,
            self.nearest,
            self.power,
        )?)
    }

    /// Recolor `image` without progress reporting.
    pub fn recolor(&self, image: &PixelGrid) -> Result<PixelGrid, RecolorError> {
        self.recolor_with_progress(image, &NoProgress)
    }

    /// Recolor `image`, reporting completed pixels to `sink`.
    pub fn recolor_with_progress(
        &self,
        image: &PixelGrid,
        sink: &dyn ProgressSink,
    ) -> Result<PixelGrid, RecolorError> {
        let config = self.config()?;
        Ok(self.processor.run(image, &self.palette, &config, sink))
    }

    /// Recolor a flat `[R, G, B, A, ...]` buffer and return the same layout.
    pub fn recolor_rgba(
        &self,
        bytes: &[u8],
        width: usize,
        height: usize,
    ) -> Result<Vec<u8>, RecolorError> {
        let image = PixelGrid::from_rgba_bytes(width, height, bytes)?;
        Ok(self.recolor(&image)?.to_rgba_bytes())
    }
}
