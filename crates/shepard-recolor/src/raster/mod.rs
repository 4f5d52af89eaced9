//! Whole-image recoloring.
//!
//! [`PixelGrid`] holds the image, [`ProcessingConfig`] the Shepard
//! parameters, and [`RasterProcessor`] fans rows out over scoped worker
//! threads, reporting through a [`ProgressSink`].

mod bands;
mod config;
mod grid;
mod processor;
mod progress;

pub use bands::{row_bands, rows_per_band, worker_count};
pub use config::{
    ConfigError, ProcessingConfig, DEFAULT_LUMINOSITY, DEFAULT_NEAREST, DEFAULT_POWER,
};
pub use grid::{GridError, PixelGrid};
pub use processor::{
    process, process_with_progress, recolor_pixel, RasterProcessor, DEFAULT_MEMO_CAPACITY,
};
pub use progress::{NoProgress, ProgressCounter, ProgressSink, DEFAULT_PROGRESS_INTERVAL};
