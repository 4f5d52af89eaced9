//! Nearest-neighbor selection over a palette.

use super::palette::Palette;
use crate::color::{distance_squared, Rgba};

/// A palette color paired with its squared distance to a source color.
///
/// Produced by [`find_n_closest`] and consumed within a single pixel's
/// interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    /// Squared RGB distance to the source color (never negative)
    pub distance_squared: f64,
    /// The palette color
    pub color: Rgba,
}

/// Return the `n` palette colors closest to `source`, nearest first.
///
/// Every palette entry is measured; palettes hold at most a few hundred
/// colors so a full scan and sort is cheaper than any index. The sort is
/// stable over the palette's canonical order, so equal distances rank by
/// ascending color value.
///
/// The result has `min(n, palette.len())` entries. An empty palette gives
/// an empty result.
///
/// # Example
///
/// ```
/// use shepard_recolor::{find_n_closest, Palette, Rgba};
///
/// let palette = Palette::new(&[
///     Rgba::opaque(0, 0, 0),
///     Rgba::opaque(128, 128, 128),
///     Rgba::opaque(255, 255, 255),
/// ]);
/// let closest = find_n_closest(Rgba::opaque(250, 250, 250), &palette, 2);
/// assert_eq!(closest.len(), 2);
/// assert_eq!(closest[0].color, Rgba::opaque(255, 255, 255));
/// assert_eq!(closest[1].color, Rgba::opaque(128, 128, 128));
/// ```
pub fn find_n_closest(source: Rgba, palette: &Palette, n: usize) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = palette
        .colors()
        .iter()
        .map(|&color| RankedCandidate {
            distance_squared: distance_squared(source, color),
            color,
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_squared.total_cmp(&b.distance_squared));
    ranked.truncate(n);
    ranked
}
