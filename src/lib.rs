//! Tint - theme your images
//!
//! Recolors PNG and JPEG images into the palette of a color theme using
//! Shepard's inverse distance weighting. This library exposes the
//! application modules for integration testing; the recoloring itself lives
//! in the `shepard-recolor` crate.

pub mod assets;
pub mod imaging;
pub mod job;
pub mod progress;
pub mod themes;
pub mod viewer;
