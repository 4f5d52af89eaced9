//! Shepard's method: inverse distance weighted recoloring of one color.
//!
//! A source color is replaced by a blend of its `nearest` palette
//! neighbors, each weighted by `1 / distance^power`. Higher powers make the
//! closest neighbor dominate; lower powers mix more evenly.
//!
//! Degenerate inputs resolve in a fixed order:
//!
//! 1. empty palette: the source color is returned unchanged
//! 2. one neighbor, or an exact palette match: that palette color
//! 3. zero distance met while weighting: that palette color
//! 4. weights summing to zero or overflowing: the closest palette color
//! 5. otherwise the weighted blend

use crate::color::{weighted_blend, Rgba};
use crate::palette::{find_n_closest, Palette};

/// Recolor a single color against `palette`.
///
/// # Example
///
/// ```
/// use shepard_recolor::{interpolate, Palette, Rgba};
///
/// let palette = Palette::new(&[Rgba::opaque(0, 0, 0), Rgba::opaque(20, 20, 20)]);
/// let out = interpolate(Rgba::opaque(10, 10, 10), &palette, 2, 2.0);
/// assert_eq!(out, Rgba::opaque(10, 10, 10));
/// ```
pub fn interpolate(source: Rgba, palette: &Palette, nearest: usize, power: f64) -> Rgba {
    let closest = find_n_closest(source, palette, nearest);

    let Some(first) = closest.first() else {
        return source;
    };

    if closest.len() == 1 || first.distance_squared == 0.0 {
        return first.color;
    }

    let mut colors = Vec::with_capacity(closest.len());
    let mut weights = Vec::with_capacity(closest.len());
    let mut total_weight = 0.0;

    for candidate in &closest {
        if candidate.distance_squared == 0.0 {
            return candidate.color;
        }
        let weight = 1.0 / candidate.distance_squared.sqrt().powf(power);
        colors.push(candidate.color);
        weights.push(weight);
        total_weight += weight;
    }

    if total_weight == 0.0 || !total_weight.is_finite() {
        return first.color;
    }

    weighted_blend(&colors, &weights).unwrap_or(first.color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mixed_palette() -> Palette {
        Palette::new(&[
            Rgba::opaque(0, 0, 0),
            Rgba::opaque(255, 255, 255),
            Rgba::opaque(255, 0, 0),
            Rgba::opaque(0, 255, 0),
            Rgba::opaque(0, 0, 255),
        ])
    }

    #[test]
    fn test_palette_member_maps_to_itself() {
        let palette = mixed_palette();
        for &color in palette.colors() {
            for nearest in [1, 2, 5, 30] {
                for power in [0.1, 1.0, 2.5, 10.0] {
                    assert_eq!(interpolate(color, &palette, nearest, power), color);
                }
            }
        }
    }

    #[test]
    fn test_single_entry_palette_always_wins() {
        let only = Rgba::opaque(12, 200, 99);
        let palette = Palette::new(&[only]);
        for source in [Rgba::opaque(0, 0, 0), Rgba::opaque(255, 1, 2)] {
            assert_eq!(interpolate(source, &palette, 30, 2.5), only);
        }
    }

    #[test]
    fn test_nearest_one_picks_closest() {
        let palette = mixed_palette();
        let out = interpolate(Rgba::opaque(240, 20, 30), &palette, 1, 2.5);
        assert_eq!(out, Rgba::opaque(255, 0, 0));
    }

    #[test]
    fn test_empty_palette_returns_source() {
        let source = Rgba::new(1, 2, 3, 4);
        assert_eq!(interpolate(source, &Palette::new(&[]), 30, 2.5), source);
    }

    #[test]
    fn test_equidistant_neighbors_average() {
        let palette = Palette::new(&[Rgba::opaque(0, 0, 0), Rgba::opaque(20, 20, 20)]);
        let out = interpolate(Rgba::opaque(10, 10, 10), &palette, 2, 2.0);
        assert_eq!(out, Rgba::opaque(10, 10, 10));
    }

    #[test]
    fn test_higher_power_favours_closest() {
        let palette = Palette::new(&[Rgba::opaque(0, 0, 0), Rgba::opaque(100, 100, 100)]);
        let source = Rgba::opaque(30, 30, 30);
        let soft = interpolate(source, &palette, 2, 1.0);
        let sharp = interpolate(source, &palette, 2, 8.0);
        assert!(sharp.r < soft.r, "sharp {sharp:?} should sit closer to black than {soft:?}");
    }

    #[test]
    fn test_underflowing_weights_fall_back_to_closest() {
        // Huge power drives every weight to zero.
        let palette = Palette::new(&[Rgba::opaque(0, 0, 0), Rgba::opaque(200, 200, 200)]);
        let out = interpolate(Rgba::opaque(60, 60, 60), &palette, 2, 1e6);
        assert_eq!(out, Rgba::opaque(0, 0, 0));
    }

    #[test]
    fn test_result_is_opaque_when_blending() {
        let palette = mixed_palette();
        let out = interpolate(Rgba::new(100, 120, 140, 10), &palette, 5, 2.5);
        assert_eq!(out.a, 255);
    }
}
