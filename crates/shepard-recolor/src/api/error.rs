//! Unified error type for the shepard-recolor public API.

use thiserror::Error;

use crate::palette::{PaletteError, ParseColorError};
use crate::raster::{ConfigError, GridError};

/// Every error the crate can produce, for `?` propagation in application
/// code.
///
/// # Example
///
/// ```
/// use shepard_recolor::{Palette, RecolorError};
///
/// fn create_palette() -> Result<Palette, RecolorError> {
///     let palette = Palette::from_hex(&["#000000", "#808080", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// # create_palette().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecolorError {
    /// Palette validation error (size or parse error)
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// Color parsing error (invalid hex string)
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Shepard parameter out of range
    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),
    /// Image buffer does not describe a valid grid
    #[error("invalid image: {0}")]
    Grid(#[from] GridError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_wraps_inner_message() {
        let err = RecolorError::from(PaletteError::TooFew { count: 2, min: 3 });
        assert_eq!(
            err.to_string(),
            "palette error: palette has too few colors (2), need at least 3"
        );

        let err = RecolorError::from(ConfigError::InvalidNearest(0));
        assert_eq!(
            err.to_string(),
            "invalid settings: nearest colors count must be at least 1, got 0"
        );
    }

    #[test]
    fn test_source_is_inner_error() {
        let err = RecolorError::from(GridError::ZeroDimension {
            width: 0,
            height: 1,
        });
        let source = err.source().map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("image dimensions must be non-zero, got 0x1")
        );
    }
}
