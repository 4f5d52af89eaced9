#![allow(clippy::module_inception)]

//! shepard-recolor: palette recoloring with Shepard's method
//!
//! Every opaque pixel of an image is replaced by an inverse distance
//! weighted blend of its closest palette colors. Fully transparent pixels
//! pass through untouched. Rows are processed in parallel bands, and the
//! result does not depend on how many workers ran.
//!
//! # Quick Start
//!
//! The [`Recolorer`] builder is the primary entry point:
//!
//! ```
//! use shepard_recolor::{Palette, PixelGrid, Recolorer, Rgba};
//!
//! let palette = Palette::from_hex(&["#2e3440", "#88c0d0", "#eceff4"]).unwrap();
//! let image = PixelGrid::filled(4, 3, Rgba::opaque(120, 140, 160)).unwrap();
//!
//! let themed = Recolorer::new(palette)
//!     .nearest(3)
//!     .power(2.5)
//!     .recolor(&image)
//!     .unwrap();
//!
//! assert_eq!(themed.width(), 4);
//! assert_eq!(themed.height(), 3);
//! ```
//!
//! # Lower-level API
//!
//! The building blocks are public as well:
//!
//! - [`interpolate`] recolors a single [`Rgba`]
//! - [`find_n_closest`] ranks palette entries by distance
//! - [`process`] runs a whole [`PixelGrid`] with a validated
//!   [`ProcessingConfig`]
//! - [`RasterProcessor`] exposes worker and progress settings, with progress
//!   delivered to any [`ProgressSink`]
//!
//! # Distance and weighting
//!
//! Ranking uses squared Euclidean distance over R, G and B; alpha is never
//! compared. A neighbor at distance `d` gets weight `1 / d^power`, so with
//! `power = 2.5` a color twice as far away contributes about 18% as much.
//! An exact palette match always wins outright.
//!
//! Palettes are stored sorted by channel value. When two palette colors are
//! equally far from a pixel, the one with the smaller `(r, g, b)` ranks
//! first, so tie resolution is the same on every run.

pub mod api;
pub mod color;
pub mod palette;
pub mod raster;
pub mod shepard;

#[cfg(test)]
mod domain_tests;

pub use api::{RecolorError, Recolorer};
pub use color::{distance_squared, scale_luminosity, weighted_blend, Rgba};
pub use palette::{
    find_n_closest, Palette, PaletteError, ParseColorError, RankedCandidate, MAX_PALETTE_SIZE,
    MIN_PALETTE_SIZE,
};
pub use raster::{
    process, process_with_progress, recolor_pixel, ConfigError, GridError, NoProgress, PixelGrid,
    ProcessingConfig, ProgressSink, RasterProcessor, DEFAULT_LUMINOSITY, DEFAULT_NEAREST,
    DEFAULT_POWER,
};
pub use shepard::interpolate;
