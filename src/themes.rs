//! Theme registry
//!
//! Themes are YAML documents of the form
//!
//! ```yaml
//! name: nord
//! title: Nord
//! flavors:
//!   default:
//!     nord0: "#2e3440"
//!     nord1: "#3b4252"
//! ```
//!
//! A theme is selected as `theme` (its `default` flavor) or `theme-flavor`.

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

use shepard_recolor::{Palette, PaletteError};

use crate::assets::{ThemeAssets, ThemeOrigin};

/// Name of the flavor used when none is given.
pub const DEFAULT_FLAVOR: &str = "default";

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme name cannot be empty")]
    EmptyName,

    #[error("invalid theme name '{name}' in {file}: names must be non-empty and cannot contain '-'")]
    InvalidName { file: String, name: String },

    #[error("invalid theme '{name}'. Available themes: {available}")]
    UnknownTheme { name: String, available: String },

    #[error("invalid flavor '{flavor}' for theme '{theme}'. Available flavors: {available}")]
    UnknownFlavor {
        theme: String,
        flavor: String,
        available: String,
    },

    #[error("theme '{theme}' does not have flavors, use just '{theme}'")]
    NoFlavors { theme: String },

    #[error("theme '{theme}' has no defined palettes")]
    NoDefault { theme: String },

    #[error("theme '{theme}' has no flavor definitions")]
    Empty { theme: String },

    #[error("invalid palette for {key}: {source}")]
    InvalidPalette {
        key: String,
        #[source]
        source: PaletteError,
    },

    #[error("failed to parse theme file {file}: {message}")]
    Parse { file: String, message: String },

    #[error("failed to read themes: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    flavors: BTreeMap<String, BTreeMap<String, String>>,
}

/// One theme: named flavors, each a map of color name to hex string.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub title: Option<String>,
    pub flavors: BTreeMap<String, BTreeMap<String, String>>,
}

impl Theme {
    /// Flavor names, sorted, without `default`.
    pub fn flavor_names(&self) -> Vec<&str> {
        self.flavors
            .keys()
            .map(String::as_str)
            .filter(|name| *name != DEFAULT_FLAVOR)
            .collect()
    }

    fn palette_for(&self, flavor: &str, key: &str) -> Result<Palette, ThemeError> {
        let colors = self
            .flavors
            .get(flavor)
            .ok_or_else(|| ThemeError::NoDefault {
                theme: self.name.clone(),
            })?;
        let hex: Vec<&str> = colors.values().map(String::as_str).collect();
        Palette::from_hex(&hex).map_err(|source| ThemeError::InvalidPalette {
            key: key.to_string(),
            source,
        })
    }
}

/// All known themes, keyed by lowercase name.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
}

impl ThemeRegistry {
    /// Load embedded themes plus any from the configured directory.
    pub fn load(assets: &ThemeAssets) -> Result<Self, ThemeError> {
        let mut files = assets.read_all()?;
        // External themes are inserted last so they replace embedded ones.
        files.sort_by_key(|f| f.origin == ThemeOrigin::External);

        let mut registry = Self::default();
        for file in files {
            let text = String::from_utf8_lossy(&file.data);
            registry.insert_yaml(&file.file, &text)?;
        }
        tracing::debug!(themes = registry.themes.len(), "Loaded theme registry");
        Ok(registry)
    }

    /// Registry of the themes compiled into the binary.
    pub fn embedded() -> Result<Self, ThemeError> {
        Self::load(&ThemeAssets::new(None))
    }

    /// Parse one YAML theme document and add it, replacing a theme with the
    /// same name.
    pub fn insert_yaml(&mut self, file: &str, yaml: &str) -> Result<(), ThemeError> {
        let parsed: ThemeFile = serde_yaml::from_str(yaml).map_err(|e| ThemeError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })?;
        let name = parsed.name.trim().to_lowercase();
        // `-` separates theme from flavor in palette keys.
        if name.is_empty() || name.contains('-') {
            return Err(ThemeError::InvalidName {
                file: file.to_string(),
                name,
            });
        }
        let flavors = parsed
            .flavors
            .into_iter()
            .map(|(flavor, colors)| (flavor.trim().to_lowercase(), colors))
            .collect();

        if self.themes.contains_key(&name) {
            tracing::debug!(theme = %name, file, "Replacing theme");
        }
        self.themes.insert(
            name.clone(),
            Theme {
                name,
                title: parsed.title,
                flavors,
            },
        );
        Ok(())
    }

    /// Sorted theme names.
    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    /// Sorted flavor names of `theme`, excluding `default`; empty for an
    /// unknown theme.
    pub fn flavor_names(&self, theme: &str) -> Vec<&str> {
        self.themes
            .get(&theme.trim().to_lowercase())
            .map(Theme::flavor_names)
            .unwrap_or_default()
    }

    pub fn get(&self, theme: &str) -> Option<&Theme> {
        self.themes.get(&theme.trim().to_lowercase())
    }

    /// Resolve `theme` or `theme-flavor` to a validated palette.
    ///
    /// The key is trimmed and lowercased, then split at the first `-`.
    pub fn palette(&self, key: &str) -> Result<Palette, ThemeError> {
        let cleaned = key.trim().to_lowercase();
        if cleaned.is_empty() {
            return Err(ThemeError::EmptyName);
        }

        let (theme_name, flavor) = match cleaned.split_once('-') {
            Some((theme, flavor)) => (theme, flavor),
            None => (cleaned.as_str(), ""),
        };

        let theme = self
            .themes
            .get(theme_name)
            .ok_or_else(|| ThemeError::UnknownTheme {
                name: theme_name.to_string(),
                available: self.theme_names().join(", "),
            })?;

        if flavor.is_empty() {
            return theme.palette_for(DEFAULT_FLAVOR, theme_name);
        }

        if !theme.flavors.contains_key(flavor) {
            let available = theme.flavor_names();
            if available.is_empty() {
                return Err(ThemeError::NoFlavors {
                    theme: theme_name.to_string(),
                });
            }
            return Err(ThemeError::UnknownFlavor {
                theme: theme_name.to_string(),
                flavor: flavor.to_string(),
                available: available.join(", "),
            });
        }

        theme.palette_for(flavor, &cleaned)
    }

    /// Check that every flavor of every theme forms a valid palette.
    pub fn validate_all(&self) -> Result<(), ThemeError> {
        for (name, theme) in &self.themes {
            if theme.flavors.is_empty() {
                return Err(ThemeError::Empty {
                    theme: name.clone(),
                });
            }
            for flavor in theme.flavors.keys() {
                let key = if flavor == DEFAULT_FLAVOR {
                    name.clone()
                } else {
                    format!("{name}-{flavor}")
                };
                theme.palette_for(flavor, &key)?;
            }
        }
        Ok(())
    }

    /// The `--list-themes` listing: every theme with its selectable
    /// `theme-flavor` keys.
    pub fn describe(&self) -> String {
        let mut out = String::from("Available Themes & Flavors:\n");
        for theme in self.themes.values() {
            match theme.title.as_deref() {
                Some(title) if !title.eq_ignore_ascii_case(&theme.name) => {
                    out.push_str(&format!("\n  {} ({title})\n", theme.name));
                }
                _ => out.push_str(&format!("\n  {}\n", theme.name)),
            }
            for flavor in theme.flavor_names() {
                out.push_str(&format!("    - {}-{flavor}\n", theme.name));
            }
        }
        out
    }
}
