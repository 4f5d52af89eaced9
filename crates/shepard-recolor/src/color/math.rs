//! Numeric color primitives
//!
//! Pure functions over [`Rgba`]: squared RGB distance for ranking,
//! luminosity scaling and weighted channel blending.

use super::rgba::Rgba;

/// Squared Euclidean distance between two colors in RGB space.
///
/// Alpha is excluded. No square root is taken: the value is only used for
/// ranking, where the square preserves order.
///
/// # Example
/// ```
/// use shepard_recolor::{distance_squared, Rgba};
/// let d = distance_squared(Rgba::opaque(0, 0, 0), Rgba::opaque(1, 2, 2));
/// assert_eq!(d, 9.0);
/// ```
#[inline]
pub fn distance_squared(a: Rgba, b: Rgba) -> f64 {
    let dr = f64::from(a.r) - f64::from(b.r);
    let dg = f64::from(a.g) - f64::from(b.g);
    let db = f64::from(a.b) - f64::from(b.b);
    dr * dr + dg * dg + db * db
}

/// Scale the RGB channels of a color by `factor`.
///
/// Each channel is multiplied, clamped to `0..=255` and rounded to the
/// nearest integer, so large factors saturate instead of wrapping. Alpha is
/// preserved. `factor` must be positive; that is checked by
/// [`ProcessingConfig`](crate::ProcessingConfig), not here.
#[inline]
pub fn scale_luminosity(color: Rgba, factor: f64) -> Rgba {
    let scale = |channel: u8| (f64::from(channel) * factor).clamp(0.0, 255.0).round() as u8;
    Rgba::new(scale(color.r), scale(color.g), scale(color.b), color.a)
}

/// Blend colors by normalized weights.
///
/// Each RGB channel becomes `sum(channel_i * weight_i) / sum(weight_i)`,
/// rounded and clamped to `0..=255`. The result is always opaque.
///
/// Returns `None` when the inputs are empty, their lengths differ, or the
/// weights sum to zero. Normal Shepard interpolation never reaches these
/// cases; callers keep a fallback anyway.
///
/// # Example
/// ```
/// use shepard_recolor::{weighted_blend, Rgba};
/// let colors = [Rgba::opaque(0, 0, 0), Rgba::opaque(200, 100, 0)];
/// let blended = weighted_blend(&colors, &[1.0, 1.0]).unwrap();
/// assert_eq!(blended, Rgba::opaque(100, 50, 0));
/// ```
pub fn weighted_blend(colors: &[Rgba], weights: &[f64]) -> Option<Rgba> {
    if colors.is_empty() || colors.len() != weights.len() {
        return None;
    }

    let mut sum = [0.0f64; 3];
    let mut total_weight = 0.0f64;

    for (color, &weight) in colors.iter().zip(weights) {
        sum[0] += f64::from(color.r) * weight;
        sum[1] += f64::from(color.g) * weight;
        sum[2] += f64::from(color.b) * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return None;
    }

    let channel = |s: f64| (s / total_weight).round().clamp(0.0, 255.0) as u8;
    Some(Rgba::opaque(channel(sum[0]), channel(sum[1]), channel(sum[2])))
}
