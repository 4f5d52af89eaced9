//! Image file decoding and encoding.
//!
//! Only PNG and JPEG are accepted. Inputs are bounded in file size, side
//! length and pixel count before any recoloring memory is allocated.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageReader};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

use shepard_recolor::{GridError, PixelGrid};

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 10_000;
/// Largest accepted pixel count.
pub const MAX_PIXELS: u64 = 50_000_000;
/// Largest accepted input file size in bytes.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
/// Quality used for JPEG output.
pub const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("input file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("unsupported image format '{0}', only PNG and JPEG are supported")]
    UnsupportedFormat(String),

    #[error("image dimensions too large: {width}x{height} (max {max}x{max})")]
    DimensionsTooLarge { width: u32, height: u32, max: u32 },

    #[error("image too large: {pixels} pixels (max {max})")]
    TooManyPixels { pixels: u64, max: u64 },

    #[error("invalid image: {0}")]
    Grid(#[from] GridError),

    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decode a PNG or JPEG file into RGBA pixels.
///
/// Returns the grid and the detected input format.
pub fn load_image(path: &Path) -> Result<(PixelGrid, ImageFormat), ImageIoError> {
    if !path.exists() {
        return Err(ImageIoError::NotFound(path.to_path_buf()));
    }

    let open_err = |source| ImageIoError::Open {
        path: path.to_path_buf(),
        source,
    };
    let size = fs::metadata(path).map_err(open_err)?.len();
    if size > MAX_FILE_SIZE {
        return Err(ImageIoError::FileTooLarge {
            size,
            max: MAX_FILE_SIZE,
        });
    }

    let file = File::open(path).map_err(open_err)?;
    let reader = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(open_err)?;

    let format = match reader.format() {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => format,
        Some(other) => return Err(ImageIoError::UnsupportedFormat(format!("{other:?}"))),
        None => return Err(ImageIoError::UnsupportedFormat("unknown".to_string())),
    };

    let (width, height) = reader.into_dimensions().map_err(ImageIoError::Decode)?;
    check_dimensions(width, height)?;

    // into_dimensions consumed the reader; decode from a fresh one.
    let file = File::open(path).map_err(open_err)?;
    let mut reader = ImageReader::new(BufReader::new(file));
    reader.set_format(format);
    let decoded = reader.decode().map_err(ImageIoError::Decode)?;

    let rgba = decoded.into_rgba8();
    let grid = PixelGrid::from_rgba_bytes(width as usize, height as usize, rgba.as_raw())?;

    tracing::debug!(path = %path.display(), width, height, ?format, "Decoded image");
    Ok((grid, format))
}

/// Reject images whose sides or pixel count exceed the limits.
pub fn check_dimensions(width: u32, height: u32) -> Result<(), ImageIoError> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ImageIoError::DimensionsTooLarge {
            width,
            height,
            max: MAX_DIMENSION,
        });
    }
    let pixels = u64::from(width) * u64::from(height);
    if pixels > MAX_PIXELS {
        return Err(ImageIoError::TooManyPixels {
            pixels,
            max: MAX_PIXELS,
        });
    }
    Ok(())
}

/// Output extension, including the dot.
///
/// An explicit `.png`, `.jpg` or `.jpeg` on `output` wins (case-insensitive,
/// returned lowercase). Otherwise JPEG input gives `.jpg` and anything else
/// `.png`.
pub fn output_extension(input_format: ImageFormat, output: Option<&Path>) -> String {
    let explicit = output
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|e| matches!(e.as_str(), "png" | "jpg" | "jpeg"));

    match explicit {
        Some(ext) => format!(".{ext}"),
        None if input_format == ImageFormat::Jpeg => ".jpg".to_string(),
        None => ".png".to_string(),
    }
}

/// `<dir>/<stem>_themed_<theme><ext>` next to the input file.
pub fn default_output_path(input: &Path, theme: &str, input_format: ImageFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let name = format!(
        "{stem}_themed_{}{}",
        theme.trim().to_lowercase(),
        output_extension(input_format, None)
    );
    input.parent().unwrap_or(Path::new("")).join(name)
}

/// Encode `grid` to `path`.
///
/// The format follows [`output_extension`]. JPEG drops alpha and uses
/// [`JPEG_QUALITY`]; PNG keeps alpha. Returns the format written.
pub fn save_image(
    grid: &PixelGrid,
    path: &Path,
    input_format: ImageFormat,
) -> Result<ImageFormat, ImageIoError> {
    let format = match output_extension(input_format, Some(path)).as_str() {
        ".png" => ImageFormat::Png,
        _ => ImageFormat::Jpeg,
    };

    let file = File::create(path).map_err(|source| ImageIoError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);
    let width = grid.width() as u32;
    let height = grid.height() as u32;

    let result = match format {
        ImageFormat::Png => PngEncoder::new(writer).write_image(
            &grid.to_rgba_bytes(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        _ => {
            let rgb: Vec<u8> = grid.pixels().iter().flat_map(|px| px.rgb()).collect();
            JpegEncoder::new_with_quality(writer, JPEG_QUALITY).write_image(
                &rgb,
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    };
    result.map_err(|source| ImageIoError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), ?format, "Encoded image");
    Ok(format)
}
