//! Site configuration module.
//!
//! Handles loading, validating, and merging the optional `config.toml` at the
//! site root. Stock defaults are the base layer; the user file only needs the
//! keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! gallery_dir = "gallery"          # Base path for images and the manifest
//! manifest_file = "manifest.json"  # Manifest name inside gallery_dir
//!
//! [placeholders]
//! unavailable = "Pour ajouter des images, ..."
//! empty = "Aucune image dans la galerie pour le moment."
//!
//! [viewer]
//! modal_alt = "Image Galerie"
//! tile_alt_prefix = "Galerie"
//! view_label = "Voir"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory (relative to the site root) holding images and the manifest.
    /// Also the URL prefix used for image sources.
    pub gallery_dir: String,
    /// Manifest filename inside `gallery_dir`.
    pub manifest_file: String,
    /// Messages rendered in place of the grid.
    pub placeholders: PlaceholderConfig,
    /// Modal and grid tile text.
    pub viewer: ViewerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            gallery_dir: "gallery".to_string(),
            manifest_file: "manifest.json".to_string(),
            placeholders: PlaceholderConfig::default(),
            viewer: ViewerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gallery_dir must not be empty".into(),
            ));
        }
        if self.manifest_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "manifest_file must not be empty".into(),
            ));
        }
        if self.manifest_file.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "manifest_file must be a plain filename inside gallery_dir".into(),
            ));
        }
        Ok(())
    }

    /// Relative manifest path as fetched by the page, e.g. `gallery/manifest.json`.
    pub fn manifest_url(&self) -> String {
        format!("{}/{}", self.gallery_dir.trim_end_matches('/'), self.manifest_file)
    }

    /// Manifest location on disk for a site rooted at `site_root`.
    pub fn manifest_path(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.gallery_dir).join(&self.manifest_file)
    }

    /// Display source for a manifest entry, e.g. `gallery/photo1.jpg`.
    pub fn image_src(&self, filename: &str) -> String {
        format!("{}/{}", self.gallery_dir.trim_end_matches('/'), filename)
    }
}

/// Placeholder messages shown instead of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderConfig {
    /// The manifest could not be fetched or parsed.
    pub unavailable: String,
    /// The manifest is a valid, empty array.
    pub empty: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            unavailable: "Pour ajouter des images, créez un fichier gallery/manifest.json avec la liste des noms de fichiers.".to_string(),
            empty: "Aucune image dans la galerie pour le moment.".to_string(),
        }
    }
}

/// Text used by the modal viewer and the grid tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Alt text of the image shown in the modal.
    pub modal_alt: String,
    /// Grid tile alt text is `"{tile_alt_prefix} {n}"`, 1-based.
    pub tile_alt_prefix: String,
    /// Label of the overlay button on each tile.
    pub view_label: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            modal_alt: "Image Galerie".to_string(),
            tile_alt_prefix: "Galerie".to_string(),
            view_label: "Voir".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the site root, on top of stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(root = %root.display(), manifest = %config.manifest_url(), "config loaded");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# deeplink-gal configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Directory (relative to the site root) that holds the images and the
# manifest. Also the URL prefix for image sources: gallery/<filename>.
gallery_dir = "gallery"

# Manifest filename inside gallery_dir: a JSON array of image filenames.
# Array order is display order and prev/next order.
manifest_file = "manifest.json"

# ---------------------------------------------------------------------------
# Placeholders shown instead of the grid
# ---------------------------------------------------------------------------
[placeholders]
# Manifest missing, not 2xx, or not a JSON array of strings.
unavailable = "Pour ajouter des images, créez un fichier gallery/manifest.json avec la liste des noms de fichiers."

# Manifest is a valid, empty array.
empty = "Aucune image dans la galerie pour le moment."

# ---------------------------------------------------------------------------
# Viewer text
# ---------------------------------------------------------------------------
[viewer]
# Alt text of the image shown in the modal.
modal_alt = "Image Galerie"

# Grid tiles get "<prefix> <n>" as alt text (n is 1-based).
tile_alt_prefix = "Galerie"

# Label of the overlay button on each tile.
view_label = "Voir"
"##
}
