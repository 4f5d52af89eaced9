//! Regression tests for recoloring behavior across modules.
//!
//! Each test names the class of bug it guards against.

use pretty_assertions::assert_eq;

use crate::api::Recolorer;
use crate::color::{scale_luminosity, weighted_blend, Rgba};
use crate::palette::{find_n_closest, Palette};
use crate::raster::{process, NoProgress, PixelGrid, ProcessingConfig, RasterProcessor};
use crate::shepard::interpolate;

fn sample_palettes() -> Vec<Palette> {
    vec![
        Palette::new(&[
            Rgba::opaque(0, 0, 0),
            Rgba::opaque(128, 128, 128),
            Rgba::opaque(255, 255, 255),
        ]),
        Palette::from_hex(&[
            "#282a36", "#44475a", "#f8f8f2", "#6272a4", "#8be9fd", "#50fa7b", "#ffb86c",
            "#ff79c6", "#bd93f9", "#ff5555", "#f1fa8c",
        ])
        .unwrap(),
        (0..=255u8)
            .step_by(5)
            .map(|v| Rgba::opaque(v, 255 - v, v / 2))
            .collect(),
    ]
}

/// If this breaks, the exact-match short circuit is gone and palette
/// colors get blended with their neighbors.
#[test]
fn test_palette_colors_are_fixed_points() {
    for palette in sample_palettes() {
        for &color in palette.colors() {
            for nearest in [1, 2, 3, 30, 1000] {
                for power in [0.1, 1.0, 2.5, 10.0] {
                    assert_eq!(interpolate(color, &palette, nearest, power), color);
                }
            }
        }
    }
}

/// If this breaks, a single-entry palette divides by zero or blends with
/// nothing instead of returning its only color.
#[test]
fn test_single_color_palette_maps_everything() {
    let only = Rgba::opaque(46, 52, 64);
    let palette = Palette::new(&[only]);
    for source in [
        Rgba::opaque(0, 0, 0),
        Rgba::opaque(255, 255, 255),
        Rgba::opaque(46, 52, 64),
        Rgba::new(1, 2, 3, 128),
    ] {
        for nearest in [1, 5] {
            assert_eq!(interpolate(source, &palette, nearest, 2.5), only);
        }
    }
}

/// If this breaks, transparent regions get painted with palette colors.
#[test]
fn test_fully_transparent_pixels_stay_transparent() {
    let pixels = vec![
        Rgba::new(255, 0, 0, 0),
        Rgba::new(12, 200, 99, 0),
        Rgba::TRANSPARENT,
        Rgba::new(0, 0, 0, 1),
    ];
    let image = PixelGrid::new(2, 2, pixels).unwrap();
    for palette in sample_palettes() {
        let out = process(&image, &palette, &ProcessingConfig::default());
        assert_eq!(&out.pixels()[..3], &[Rgba::TRANSPARENT; 3][..]);
        assert_eq!(out.pixels()[3].a, 255, "alpha 1 is still recolored");
    }
}

/// If this breaks, luminosity scaling either wraps around or drifts at
/// factor 1.0.
#[test]
fn test_luminosity_identity_and_saturation() {
    for v in (0..=255u8).step_by(17) {
        let color = Rgba::new(v, 255 - v, v / 3, v);
        assert_eq!(scale_luminosity(color, 1.0), color);

        let huge = scale_luminosity(color, 1e12);
        assert!(huge.r == 255 || v == 0);
        assert_eq!(huge.a, v);

        let tiny = scale_luminosity(color, 1e-12);
        assert_eq!(tiny.rgb(), [0, 0, 0]);
    }
}

/// If this breaks, the ranking is unsorted or ignores `n`.
#[test]
fn test_nearest_ranking_sorted_and_sized() {
    let source = Rgba::opaque(100, 60, 200);
    for palette in sample_palettes() {
        for n in [1, 2, 3, 7, 300] {
            let ranked = find_n_closest(source, &palette, n);
            assert_eq!(ranked.len(), n.min(palette.len()));
            assert!(ranked
                .windows(2)
                .all(|w| w[0].distance_squared <= w[1].distance_squared));
        }
    }
}

/// If this breaks, weights are not normalized before blending.
#[test]
fn test_blend_ignores_weight_scale() {
    let colors = [Rgba::opaque(10, 200, 30), Rgba::opaque(240, 0, 90)];
    assert_eq!(
        weighted_blend(&colors, &[1.0, 2.0]),
        weighted_blend(&colors, &[10.0, 20.0])
    );
    assert_eq!(
        weighted_blend(&colors, &[0.3, 0.7]),
        weighted_blend(&colors, &[3e-9, 7e-9])
    );
}

/// If this breaks, the two-pixel walkthrough no longer recolors the red
/// pixel exactly or no longer keeps the transparent one.
#[test]
fn test_red_and_transparent_pair() {
    let palette = Palette::new(&[Rgba::opaque(255, 0, 0), Rgba::opaque(0, 255, 0)]);
    let image = PixelGrid::new(2, 1, vec![Rgba::new(255, 0, 0, 255), Rgba::new(0, 0, 0, 0)]).unwrap();
    let config = ProcessingConfig::new(1.0, 2, 2.5).unwrap();

    let out = process(&image, &palette, &config);
    assert_eq!(out.pixels(), &[Rgba::opaque(255, 0, 0), Rgba::TRANSPARENT]);
}

/// If this breaks, symmetric neighbors are no longer weighted equally.
#[test]
fn test_equidistant_neighbors_average() {
    let palette = Palette::new(&[Rgba::opaque(0, 0, 0), Rgba::opaque(20, 20, 20)]);
    assert_eq!(
        interpolate(Rgba::opaque(10, 10, 10), &palette, 2, 2.0),
        Rgba::opaque(10, 10, 10)
    );
}

/// If this breaks, an empty palette is treated as an error or panics
/// instead of passing pixels through.
#[test]
fn test_empty_palette_passes_through() {
    let palette = Palette::default();
    let source = Rgba::opaque(1, 2, 3);
    assert_eq!(interpolate(source, &palette, 30, 2.5), source);

    let image = PixelGrid::filled(3, 2, source).unwrap();
    assert_eq!(process(&image, &palette, &ProcessingConfig::default()), image);
}

/// If this breaks, output depends on run order or worker scheduling.
#[test]
fn test_repeated_runs_are_identical() {
    let pixels: Vec<Rgba> = (0..64 * 48)
        .map(|i| {
            let i = i as u32;
            Rgba::new(
                (i * 7 % 256) as u8,
                (i * 13 % 256) as u8,
                (i * 29 % 256) as u8,
                if i % 11 == 0 { 0 } else { 255 },
            )
        })
        .collect();
    let image = PixelGrid::new(64, 48, pixels).unwrap();
    let palette = sample_palettes().remove(1);
    let config = ProcessingConfig::new(0.9, 4, 3.0).unwrap();

    let first = process(&image, &palette, &config);
    let second = process(&image, &palette, &config);
    let serial = RasterProcessor::new()
        .max_workers(1)
        .run(&image, &palette, &config, &NoProgress);
    assert_eq!(first.to_rgba_bytes(), second.to_rgba_bytes());
    assert_eq!(first, serial);
}

/// If this breaks, the luminosity factor is applied after matching instead
/// of before.
#[test]
fn test_luminosity_applies_before_matching() {
    let palette = Palette::new(&[
        Rgba::opaque(0, 0, 0),
        Rgba::opaque(100, 100, 100),
        Rgba::opaque(200, 200, 200),
    ]);
    let image = PixelGrid::filled(1, 1, Rgba::opaque(100, 100, 100)).unwrap();
    let out = Recolorer::new(palette)
        .luminosity(2.0)
        .recolor(&image)
        .unwrap();
    assert_eq!(out.get(0, 0), Some(Rgba::opaque(200, 200, 200)));
}
