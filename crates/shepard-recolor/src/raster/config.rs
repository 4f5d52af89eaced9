//! Shepard parameters for a recoloring run.

use thiserror::Error;

/// Default luminosity factor (no brightness change).
pub const DEFAULT_LUMINOSITY: f64 = 1.0;
/// Default number of palette neighbors blended per pixel.
pub const DEFAULT_NEAREST: usize = 30;
/// Default inverse distance power.
pub const DEFAULT_POWER: f64 = 2.5;

/// Invalid Shepard parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Luminosity is zero, negative, NaN or infinite
    #[error("luminosity must be positive, got {0:.2}")]
    InvalidLuminosity(f64),
    /// Nearest count is zero
    #[error("nearest colors count must be at least 1, got {0}")]
    InvalidNearest(usize),
    /// Power is zero, negative, NaN or infinite
    #[error("power must be positive, got {0:.2}")]
    InvalidPower(f64),
}

/// Validated parameters for one recoloring run.
///
/// - `luminosity`: factor applied to each pixel before matching
///   (`0.8` darker, `1.2` brighter)
/// - `nearest`: how many palette colors are blended per pixel
/// - `power`: how quickly a neighbor's weight falls off with distance
///
/// # Example
///
/// ```
/// use shepard_recolor::ProcessingConfig;
///
/// let config = ProcessingConfig::new(1.0, 30, 2.5).unwrap();
/// assert_eq!(config, ProcessingConfig::default());
///
/// assert!(ProcessingConfig::new(0.0, 30, 2.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingConfig {
    luminosity: f64,
    nearest: usize,
    power: f64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            luminosity: DEFAULT_LUMINOSITY,
            nearest: DEFAULT_NEAREST,
            power: DEFAULT_POWER,
        }
    }
}

impl ProcessingConfig {
    /// Create a configuration, rejecting values that cannot be used.
    ///
    /// Values are never clamped into range: a bad value is an error.
    pub fn new(luminosity: f64, nearest: usize, power: f64) -> Result<Self, ConfigError> {
        if !(luminosity.is_finite() && luminosity > 0.0) {
            return Err(ConfigError::InvalidLuminosity(luminosity));
        }
        if nearest < 1 {
            return Err(ConfigError::InvalidNearest(nearest));
        }
        if !(power.is_finite() && power > 0.0) {
            return Err(ConfigError::InvalidPower(power));
        }
        Ok(Self {
            luminosity,
            nearest,
            power,
        })
    }

    /// Luminosity factor.
    #[inline]
    pub fn luminosity(&self) -> f64 {
        self.luminosity
    }

    /// Number of nearest palette colors blended.
    #[inline]
    pub fn nearest(&self) -> usize {
        self.nearest
    }

    /// Inverse distance power.
    #[inline]
    pub fn power(&self) -> f64 {
        self.power
    }
}
