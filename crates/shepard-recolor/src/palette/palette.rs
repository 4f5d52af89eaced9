//! Palette struct with canonical color storage.
//!
//! The palette is the read-only set of target colors shared by every
//! worker during a recoloring run.

use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgba;

/// Smallest palette accepted by [`Palette::checked`].
pub const MIN_PALETTE_SIZE: usize = 3;

/// Largest palette accepted by [`Palette::checked`].
pub const MAX_PALETTE_SIZE: usize = 256;

/// A set of target colors.
///
/// Alpha plays no part in matching, so entries are stored opaque. Entries
/// are kept sorted by `(r, g, b)`: insertion order never influences the
/// result, and colors at exactly the same distance from a pixel always
/// rank in ascending color order. Duplicates are kept and count as
/// separate neighbors.
///
/// # Example
///
/// ```
/// use shepard_recolor::{Palette, Rgba};
///
/// let palette = Palette::new(&[Rgba::opaque(255, 255, 255), Rgba::opaque(0, 0, 0)]);
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.colors()[0], Rgba::opaque(0, 0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Create a palette from any number of colors, including none.
    ///
    /// An empty palette is valid input to the recoloring core, which then
    /// leaves pixels unchanged. Use [`Palette::checked`] to enforce the
    /// supported size range.
    pub fn new(colors: &[Rgba]) -> Self {
        let mut colors: Vec<Rgba> = colors.iter().map(|c| c.to_opaque()).collect();
        colors.sort_unstable();
        Self { colors }
    }

    /// Create a palette, requiring between [`MIN_PALETTE_SIZE`] and
    /// [`MAX_PALETTE_SIZE`] colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::Empty`] for no colors
    /// - [`PaletteError::TooFew`] below the minimum
    /// - [`PaletteError::TooMany`] above the maximum
    pub fn checked(colors: &[Rgba]) -> Result<Self, PaletteError> {
        match colors.len() {
            0 => Err(PaletteError::Empty),
            n if n < MIN_PALETTE_SIZE => Err(PaletteError::TooFew {
                count: n,
                min: MIN_PALETTE_SIZE,
            }),
            n if n > MAX_PALETTE_SIZE => Err(PaletteError::TooMany {
                count: n,
                max: MAX_PALETTE_SIZE,
            }),
            _ => Ok(Self::new(colors)),
        }
    }

    /// Create a checked palette from hex color strings.
    ///
    /// # Example
    ///
    /// ```
    /// use shepard_recolor::Palette;
    ///
    /// let palette = Palette::from_hex(&["#2e3440", "#3b4252", "#434c5e"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex(hex: &[&str]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .map(|s| Rgba::from_str(s))
            .collect::<Result<Vec<_>, _>>()?;
        Self::checked(&colors)
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette has no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The palette colors in canonical order.
    #[inline]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// True when a color with the same RGB channels is in the palette.
    pub fn contains(&self, color: Rgba) -> bool {
        self.colors.binary_search(&color.to_opaque()).is_ok()
    }
}

impl FromIterator<Rgba> for Palette {
    fn from_iter<I: IntoIterator<Item = Rgba>>(iter: I) -> Self {
        let colors: Vec<Rgba> = iter.into_iter().collect();
        Self::new(&colors)
    }
}
