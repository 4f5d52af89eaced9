//! Palette types and nearest-color search
//!
//! This module provides the [`Palette`] set type, its validation errors and
//! the nearest-neighbor selector used by Shepard interpolation.

mod error;
mod nearest;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use nearest::{find_n_closest, RankedCandidate};
pub use palette::{Palette, MAX_PALETTE_SIZE, MIN_PALETTE_SIZE};
