//! Row band partitioning for parallel processing.

use std::ops::Range;

/// Number of workers for an image with `height` rows.
///
/// Bounded by the available execution units, by `limit` when given, and by
/// the row count; never less than one.
pub fn worker_count(height: usize, limit: Option<usize>) -> usize {
    let units = num_cpus::get();
    let cap = limit.map_or(units, |l| l.min(units));
    cap.min(height).max(1)
}

/// Rows per band when `height` rows are shared by `workers` workers.
///
/// Ceiling division, so `workers` bands always suffice.
#[inline]
pub fn rows_per_band(height: usize, workers: usize) -> usize {
    height.div_ceil(workers.max(1)).max(1)
}

/// Split `0..height` into contiguous bands for `workers` workers.
///
/// Every band except possibly the last has [`rows_per_band`] rows; the
/// last absorbs the remainder. Bands never overlap, never leave gaps and
/// are never empty, so there may be fewer bands than workers (e.g. 5 rows
/// over 4 workers gives bands of 2, 2 and 1 rows).
///
/// # Example
///
/// ```
/// use shepard_recolor::raster::row_bands;
///
/// assert_eq!(row_bands(10, 3), vec![0..4, 4..8, 8..10]);
/// ```
pub fn row_bands(height: usize, workers: usize) -> Vec<Range<usize>> {
    let step = rows_per_band(height, workers);
    (0..height)
        .step_by(step)
        .map(|start| start..(start + step).min(height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_cover_every_row_exactly_once() {
        for height in 1..=64 {
            for workers in 1..=height {
                let bands = row_bands(height, workers);
                assert!(bands.len() <= workers);

                let mut hits = vec![0u32; height];
                for band in &bands {
                    assert!(!band.is_empty(), "empty band for H={height} W={workers}");
                    for row in band.clone() {
                        hits[row] += 1;
                    }
                }
                assert!(
                    hits.iter().all(|&h| h == 1),
                    "rows not covered exactly once for H={height} W={workers}: {bands:?}"
                );

                // Contiguous and ordered
                assert_eq!(bands[0].start, 0);
                assert_eq!(bands[bands.len() - 1].end, height);
                for pair in bands.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                }
            }
        }
    }

    #[test]
    fn test_last_band_absorbs_remainder() {
        assert_eq!(row_bands(5, 4), vec![0..2, 2..4, 4..5]);
        assert_eq!(row_bands(7, 2), vec![0..4, 4..7]);
    }

    #[test]
    fn test_single_worker_single_band() {
        assert_eq!(row_bands(100, 1), vec![0..100]);
    }

    #[test]
    fn test_worker_count_bounds() {
        assert_eq!(worker_count(1, None), 1);
        assert_eq!(worker_count(10_000, Some(1)), 1);
        assert!(worker_count(3, None) <= 3);
        assert!(worker_count(10_000, None) >= 1);
        assert_eq!(worker_count(5, Some(0)), 1);
    }
}
