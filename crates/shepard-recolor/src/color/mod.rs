//! Color type and numeric primitives
//!
//! [`Rgba`] is the pixel value type. The free functions in this module are
//! the arithmetic the interpolator is built from:
//!
//! - [`distance_squared`]: RGB ranking distance (alpha excluded)
//! - [`scale_luminosity`]: brighten or darken with saturation at the edges
//! - [`weighted_blend`]: normalized weighted average of colors
//!
//! # Example
//!
//! ```
//! use shepard_recolor::{scale_luminosity, Rgba};
//!
//! let pixel = Rgba::opaque(100, 150, 200);
//! let brighter = scale_luminosity(pixel, 1.2);
//! assert_eq!(brighter, Rgba::opaque(120, 180, 240));
//! ```

mod math;
mod rgba;

pub use math::{distance_squared, scale_luminosity, weighted_blend};
pub use rgba::Rgba;
