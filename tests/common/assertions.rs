//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;
use shepard_recolor::{PixelGrid, Rgba};

/// Assert the file at `path` starts with the PNG signature
pub fn assert_png_file(path: &Path) {
    let bytes = std::fs::read(path).expect("read output");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG at {}, got {} bytes starting with {:?}",
        path.display(),
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert the file at `path` starts with the JPEG SOI marker
pub fn assert_jpeg_file(path: &Path) {
    let bytes = std::fs::read(path).expect("read output");
    assert!(
        bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
        "Expected JPEG at {}, got {:?}",
        path.display(),
        &bytes[..3.min(bytes.len())]
    );
}

/// Assert every opaque pixel is one of `allowed` and every transparent
/// source pixel stayed transparent
pub fn assert_only_colors(source: &PixelGrid, output: &PixelGrid, allowed: &[Rgba]) {
    assert_eq!(
        (source.width(), source.height()),
        (output.width(), output.height())
    );
    for (i, (src, out)) in source.pixels().iter().zip(output.pixels()).enumerate() {
        if src.a == 0 {
            assert_eq!(*out, Rgba::TRANSPARENT, "pixel {i} should stay transparent");
        } else {
            assert!(
                allowed.contains(out),
                "pixel {i} = {out} is not in the allowed set"
            );
        }
    }
}
