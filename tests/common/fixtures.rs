//! Test fixtures: scratch directories and generated images.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use shepard_recolor::{PixelGrid, Rgba};
use tempfile::TempDir;
use tint::imaging::save_image;

/// Colors of the bundled monochrome theme, in ascending order.
pub const MONOCHROME: [Rgba; 6] = [
    Rgba::opaque(0x00, 0x00, 0x00),
    Rgba::opaque(0x33, 0x33, 0x33),
    Rgba::opaque(0x66, 0x66, 0x66),
    Rgba::opaque(0x99, 0x99, 0x99),
    Rgba::opaque(0xcc, 0xcc, 0xcc),
    Rgba::opaque(0xff, 0xff, 0xff),
];

/// A temporary directory that is removed when dropped.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `grid` as `name`, encoded by the file extension.
    pub fn write_image(&self, name: &str, grid: &PixelGrid) -> PathBuf {
        let path = self.join(name);
        save_image(grid, &path, ImageFormat::Png).expect("write fixture image");
        path
    }

    /// Write a text file, creating parent directories.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }
}

/// A width x height image with a color gradient and a transparent top-left
/// corner block.
pub fn gradient(width: usize, height: usize) -> PixelGrid {
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            if x < width / 4 && y < height / 4 {
                return Rgba::TRANSPARENT;
            }
            Rgba::opaque(
                (x * 255 / width) as u8,
                (y * 255 / height) as u8,
                ((x + y) * 255 / (width + height)) as u8,
            )
        })
        .collect();
    PixelGrid::new(width, height, pixels).expect("valid gradient")
}

/// A theme YAML document with one flavor per `(flavor, colors)` entry.
pub fn theme_yaml(name: &str, flavors: &[(&str, &[&str])]) -> String {
    let mut out = format!("name: {name}\nflavors:\n");
    for (flavor, colors) in flavors {
        out.push_str(&format!("  {flavor}:\n"));
        for (i, color) in colors.iter().enumerate() {
            out.push_str(&format!("    c{i}: \"{color}\"\n"));
        }
    }
    out
}
