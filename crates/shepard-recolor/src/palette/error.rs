//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3, 6 or 8 digits after stripping '#')
    #[error("invalid hex color length in '{0}' (expected 3, 6 or 8 hex digits)")]
    InvalidLength(String),
    /// Non-hexadecimal character encountered
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
}

/// Error type for palette validation.
///
/// Only [`Palette::checked`](super::Palette::checked) and
/// [`Palette::from_hex`](super::Palette::from_hex) produce these; the
/// recoloring core itself tolerates any palette size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Palette has no colors at all
    #[error("palette is empty")]
    Empty,
    /// Palette has fewer colors than the supported minimum
    #[error("palette has too few colors ({count}), need at least {min}")]
    TooFew {
        /// Number of colors supplied
        count: usize,
        /// Minimum accepted size
        min: usize,
    },
    /// Palette has more colors than the supported maximum
    #[error("palette has too many colors ({count}), maximum is {max}")]
    TooMany {
        /// Number of colors supplied
        count: usize,
        /// Maximum accepted size
        max: usize,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_error_messages() {
        assert_eq!(PaletteError::Empty.to_string(), "palette is empty");
        assert_eq!(
            PaletteError::TooFew { count: 2, min: 3 }.to_string(),
            "palette has too few colors (2), need at least 3"
        );
        assert_eq!(
            PaletteError::TooMany { count: 300, max: 256 }.to_string(),
            "palette has too many colors (300), maximum is 256"
        );
    }

    #[test]
    fn test_parse_error_wraps_into_palette_error() {
        let err: PaletteError = ParseColorError::InvalidHex("#zz".to_string()).into();
        assert_eq!(err.to_string(), "invalid color: invalid hex color '#zz'");
    }
}
