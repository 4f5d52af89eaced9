//! Theme file loading with embedded fallbacks
//!
//! - If `TINT_THEMES_DIR` is NOT set: use embedded themes only (no filesystem access)
//! - If it IS set: read every `*.yaml` file in that directory as well; a file
//!   with the same name as an embedded theme replaces it

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an extra theme directory.
pub const THEMES_DIR_ENV: &str = "TINT_THEMES_DIR";

/// Embedded theme definitions
#[derive(RustEmbed)]
#[folder = "themes/"]
#[include = "*.yaml"]
struct EmbeddedThemes;

/// Where a theme file was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeOrigin {
    Embedded,
    External,
}

/// One raw theme file.
#[derive(Debug, Clone)]
pub struct ThemeAsset {
    /// File name, e.g. `nord.yaml`
    pub file: String,
    pub origin: ThemeOrigin,
    pub data: Cow<'static, [u8]>,
}

/// Theme file loader with optional filesystem override
pub struct ThemeAssets {
    /// External theme directory (from TINT_THEMES_DIR)
    themes_dir: Option<PathBuf>,
}

impl ThemeAssets {
    /// Create a loader.
    ///
    /// `themes_dir` should be `Some` only if the env var was set.
    pub fn new(themes_dir: Option<PathBuf>) -> Self {
        Self { themes_dir }
    }

    /// Create a loader configured from the environment.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os(THEMES_DIR_ENV).map(PathBuf::from))
    }

    /// The configured external directory, if any.
    pub fn themes_dir(&self) -> Option<&Path> {
        self.themes_dir.as_deref()
    }

    /// Names of the embedded theme files, sorted.
    pub fn list_embedded() -> Vec<String> {
        let mut files: Vec<String> = EmbeddedThemes::iter().map(|f| f.to_string()).collect();
        files.sort();
        files
    }

    /// Read all theme files, external ones overriding embedded ones by file
    /// name. Sorted by file name.
    ///
    /// A configured directory that does not exist is an error; unreadable
    /// entries inside it are too.
    pub fn read_all(&self) -> io::Result<Vec<ThemeAsset>> {
        let mut assets: BTreeMap<String, ThemeAsset> = BTreeMap::new();

        for file in EmbeddedThemes::iter() {
            if let Some(embedded) = EmbeddedThemes::get(&file) {
                tracing::trace!(file = %file, "Loading theme from embedded assets");
                assets.insert(
                    file.to_string(),
                    ThemeAsset {
                        file: file.to_string(),
                        origin: ThemeOrigin::Embedded,
                        data: embedded.data,
                    },
                );
            }
        }

        if let Some(ref dir) = self.themes_dir {
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                if !is_theme_file(&path) {
                    continue;
                }
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                tracing::trace!(path = %path.display(), "Loading theme from filesystem");
                let data = fs::read(&path)?;
                assets.insert(
                    name.to_string(),
                    ThemeAsset {
                        file: name.to_string(),
                        origin: ThemeOrigin::External,
                        data: Cow::Owned(data),
                    },
                );
            }
        }

        Ok(assets.into_values().collect())
    }
}

fn is_theme_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}
