//! Parallel application of Shepard recoloring to a whole image.
//!
//! The image is cut into horizontal row bands, one per worker. The output
//! buffer is split into matching mutable chunks before the workers start,
//! so each worker owns its rows outright and pixel data needs no locking.
//! All workers are scoped threads joined before [`RasterProcessor::run`]
//! returns.

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use super::bands::{row_bands, rows_per_band, worker_count};
use super::config::ProcessingConfig;
use super::grid::PixelGrid;
use super::progress::{NoProgress, ProgressCounter, ProgressSink, DEFAULT_PROGRESS_INTERVAL};
use crate::color::{scale_luminosity, Rgba};
use crate::palette::Palette;
use crate::shepard::interpolate;

/// Rows a worker completes between two progress reports.
const PROGRESS_ROWS: usize = 10;

/// Default bound on memoized colors per worker.
pub const DEFAULT_MEMO_CAPACITY: usize = 1 << 16;

/// Recolor one pixel: transparent pixels stay transparent, everything else
/// is luminosity-scaled and interpolated against the palette.
///
/// # Example
///
/// ```
/// use shepard_recolor::{recolor_pixel, Palette, ProcessingConfig, Rgba};
///
/// let palette = Palette::new(&[Rgba::opaque(255, 0, 0), Rgba::opaque(0, 255, 0)]);
/// let config = ProcessingConfig::default();
/// assert_eq!(recolor_pixel(Rgba::new(9, 9, 9, 0), &palette, &config), Rgba::TRANSPARENT);
/// ```
#[inline]
pub fn recolor_pixel(source: Rgba, palette: &Palette, config: &ProcessingConfig) -> Rgba {
    if source.is_transparent() {
        return Rgba::TRANSPARENT;
    }
    let adjusted = scale_luminosity(source, config.luminosity());
    interpolate(adjusted, palette, config.nearest(), config.power())
}

/// Recolor `source` with default processor settings and no progress.
pub fn process(source: &PixelGrid, palette: &Palette, config: &ProcessingConfig) -> PixelGrid {
    RasterProcessor::new().run(source, palette, config, &NoProgress)
}

/// Recolor `source`, reporting completed pixel counts to `sink`.
pub fn process_with_progress(
    source: &PixelGrid,
    palette: &Palette,
    config: &ProcessingConfig,
    sink: &dyn ProgressSink,
) -> PixelGrid {
    RasterProcessor::new().run(source, palette, config, sink)
}

/// Per-worker cache of adjusted color to recolored result.
///
/// Photographs repeat colors heavily; the interpolation is a pure function
/// of the adjusted color, so a hit returns exactly what a recomputation
/// would. Stops growing once full.
struct ColorMemo {
    entries: HashMap<Rgba, Rgba>,
    capacity: usize,
}

impl ColorMemo {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    #[inline]
    fn get_or_insert_with(&mut self, key: Rgba, compute: impl FnOnce() -> Rgba) -> Rgba {
        if let Some(&hit) = self.entries.get(&key) {
            return hit;
        }
        let value = compute();
        if self.entries.len() < self.capacity {
            self.entries.insert(key, value);
        }
        value
    }
}

/// Settings for the parallel processor.
///
/// # Example
///
/// ```
/// use shepard_recolor::{NoProgress, Palette, PixelGrid, ProcessingConfig, RasterProcessor, Rgba};
///
/// let palette = Palette::new(&[Rgba::opaque(0, 0, 0), Rgba::opaque(255, 255, 255)]);
/// let image = PixelGrid::filled(4, 4, Rgba::opaque(10, 10, 10)).unwrap();
///
/// let output = RasterProcessor::new()
///     .max_workers(2)
///     .run(&image, &palette, &ProcessingConfig::default(), &NoProgress);
/// assert_eq!(output.width(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct RasterProcessor {
    max_workers: Option<usize>,
    progress_interval: Duration,
    memo_capacity: usize,
}

impl Default for RasterProcessor {
    fn default() -> Self {
        Self {
            max_workers: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            memo_capacity: DEFAULT_MEMO_CAPACITY,
        }
    }
}

impl RasterProcessor {
    /// Processor with one worker per execution unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of workers below the execution unit count.
    #[inline]
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Minimum time between two progress updates.
    #[inline]
    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Bound on memoized colors per worker; `0` disables the memo.
    #[inline]
    pub fn memo_capacity(mut self, capacity: usize) -> Self {
        self.memo_capacity = capacity;
        self
    }

    /// Recolor every pixel of `source` against `palette`.
    ///
    /// The output has the bounds of `source`, and each pixel depends only on
    /// the matching source pixel, the palette and the config, so results are
    /// identical for any worker count or scheduling.
    pub fn run(
        &self,
        source: &PixelGrid,
        palette: &Palette,
        config: &ProcessingConfig,
        sink: &dyn ProgressSink,
    ) -> PixelGrid {
        let width = source.width();
        let height = source.height();
        let workers = worker_count(height, self.max_workers);
        let bands = row_bands(height, workers);
        let band_len = rows_per_band(height, workers) * width;

        tracing::debug!(
            width,
            height,
            workers,
            bands = bands.len(),
            palette = palette.len(),
            nearest = config.nearest(),
            power = config.power(),
            luminosity = config.luminosity(),
            "Recoloring image"
        );

        let counter = ProgressCounter::new(sink, source.pixel_count() as u64, self.progress_interval);
        let mut output = vec![Rgba::TRANSPARENT; source.pixel_count()];

        if bands.len() == 1 {
            recolor_band(source.pixels(), &mut output, width, palette, config, &counter, self.memo_capacity);
        } else {
            thread::scope(|scope| {
                for (band, out) in bands.iter().zip(output.chunks_mut(band_len)) {
                    let src = &source.pixels()[band.start * width..band.end * width];
                    let counter = &counter;
                    let memo_capacity = self.memo_capacity;
                    scope.spawn(move || {
                        recolor_band(src, out, width, palette, config, counter, memo_capacity)
                    });
                }
            });
        }

        counter.finish();
        PixelGrid::with_bounds_of(source, output)
    }
}

/// Recolor one band. `src` and `out` cover the same rows.
fn recolor_band(
    src: &[Rgba],
    out: &mut [Rgba],
    width: usize,
    palette: &Palette,
    config: &ProcessingConfig,
    counter: &ProgressCounter<'_>,
    memo_capacity: usize,
) {
    debug_assert_eq!(src.len(), out.len());
    let mut memo = ColorMemo::new(memo_capacity);
    let mut pending = 0u64;

    for (row, (src_row, out_row)) in src.chunks(width).zip(out.chunks_mut(width)).enumerate() {
        for (&pixel, slot) in src_row.iter().zip(out_row.iter_mut()) {
            *slot = if pixel.is_transparent() {
                Rgba::TRANSPARENT
            } else {
                let adjusted = scale_luminosity(pixel, config.luminosity());
                memo.get_or_insert_with(adjusted, || {
                    interpolate(adjusted, palette, config.nearest(), config.power())
                })
            };
        }

        pending += src_row.len() as u64;
        if row % PROGRESS_ROWS == 0 {
            counter.add(pending);
            pending = 0;
        }
    }

    counter.add(pending);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn gradient(width: usize, height: usize) -> PixelGrid {
        let pixels = (0..width * height)
            .map(|i| {
                let x = i % width;
                let y = i / width;
                Rgba::new(
                    (x * 255 / width.max(1)) as u8,
                    (y * 255 / height.max(1)) as u8,
                    ((x + y) % 256) as u8,
                    if (x + y) % 7 == 0 { 0 } else { 255 },
                )
            })
            .collect();
        PixelGrid::new(width, height, pixels).unwrap()
    }

    fn nord_like() -> Palette {
        Palette::from_hex(&[
            "#2e3440", "#3b4252", "#434c5e", "#4c566a", "#d8dee9", "#e5e9f0", "#eceff4",
            "#8fbcbb", "#88c0d0", "#81a1c1", "#5e81ac", "#bf616a", "#d08770", "#ebcb8b",
            "#a3be8c", "#b48ead",
        ])
        .unwrap()
    }

    #[test]
    fn test_matches_pixelwise_reference() {
        let image = gradient(37, 23);
        let palette = nord_like();
        let config = ProcessingConfig::new(1.1, 5, 2.5).unwrap();

        let output = RasterProcessor::new().max_workers(4).run(&image, &palette, &config, &NoProgress);

        let expected: Vec<Rgba> = image
            .pixels()
            .iter()
            .map(|&px| recolor_pixel(px, &palette, &config))
            .collect();
        assert_eq!(output.pixels(), expected.as_slice());
    }

    #[test]
    fn test_worker_count_does_not_change_output() {
        let image = gradient(19, 31);
        let palette = nord_like();
        let config = ProcessingConfig::default();

        let single = RasterProcessor::new().max_workers(1).run(&image, &palette, &config, &NoProgress);
        for workers in [2, 3, 8, 31] {
            let many = RasterProcessor::new()
                .max_workers(workers)
                .run(&image, &palette, &config, &NoProgress);
            assert_eq!(many, single, "output differs with {workers} workers");
        }
    }

    #[test]
    fn test_memo_does_not_change_output() {
        let image = gradient(16, 16);
        let palette = nord_like();
        let config = ProcessingConfig::default();

        let memoized = RasterProcessor::new().run(&image, &palette, &config, &NoProgress);
        let tiny_memo = RasterProcessor::new()
            .memo_capacity(3)
            .run(&image, &palette, &config, &NoProgress);
        let no_memo = RasterProcessor::new()
            .memo_capacity(0)
            .run(&image, &palette, &config, &NoProgress);
        assert_eq!(memoized, no_memo);
        assert_eq!(tiny_memo, no_memo);
    }

    #[test]
    fn test_transparent_pixels_preserved() {
        let image = gradient(10, 10);
        let output = process(&image, &nord_like(), &ProcessingConfig::default());
        for (src, out) in image.pixels().iter().zip(output.pixels()) {
            if src.a == 0 {
                assert_eq!(*out, Rgba::TRANSPARENT);
            } else {
                assert_eq!(out.a, 255);
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        updates: Mutex<Vec<(u64, u64)>>,
        finished: Mutex<Vec<(u64, u64)>>,
    }

    impl ProgressSink for Recorder {
        fn update(&self, completed: u64, total: u64, _elapsed: Duration) {
            self.updates.lock().unwrap().push((completed, total));
        }

        fn finish(&self, completed: u64, total: u64, _elapsed: Duration) {
            self.finished.lock().unwrap().push((completed, total));
        }
    }

    #[test]
    fn test_progress_reaches_total_once() {
        let image = gradient(8, 120);
        let recorder = Recorder::default();
        RasterProcessor::new()
            .max_workers(4)
            .progress_interval(Duration::ZERO)
            .run(&image, &nord_like(), &ProcessingConfig::default(), &recorder);

        let updates = recorder.updates.lock().unwrap();
        assert!(updates.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(updates.iter().all(|&(done, total)| done < total && total == 960));
        assert_eq!(*recorder.finished.lock().unwrap(), vec![(960, 960)]);
    }
}
