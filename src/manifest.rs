//! Gallery manifest loading.
//!
//! The manifest is a JSON array of image filenames at `gallery/manifest.json`
//! (configurable). Array order is display order and navigation order:
//!
//! ```json
//! ["001-dawn.webp", "sunset.webp", "IMG_2024_0001.jpeg"]
//! ```
//!
//! Loading has three outcomes the caller must be able to tell apart, because
//! each renders differently:
//!
//! | Outcome | Cause | Rendered as |
//! |---|---|---|
//! | [`LoadOutcome::Loaded`] | non-empty array | the grid |
//! | [`LoadOutcome::Empty`] | `[]` | "no images yet" placeholder |
//! | [`LoadOutcome::Unavailable`] | missing file, read error, bad JSON, not an array of strings | instructional placeholder |
//!
//! Sources sit behind the [`ManifestSource`] trait so the session logic does
//! not care whether the array comes from disk, an HTTP response body, or a
//! test fixture.

use crate::config::SiteConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("manifest is not a JSON array of filenames: {0}")]
    Json(#[from] serde_json::Error),
}

/// An ordered list of image filenames, as supplied by a [`ManifestSource`].
pub type Manifest = Vec<String>;

/// Supplies the manifest for one load. Called once at startup and again on
/// manual reload.
pub trait ManifestSource {
    fn fetch(&self) -> Result<Manifest, ManifestError>;
}

/// Result of a manifest load, as seen by the presentation layer.
#[derive(Debug)]
pub enum LoadOutcome {
    /// No fetch has completed yet. Navigation is a no-op.
    NotLoaded,
    /// The gallery holds `count` images.
    Loaded { count: usize },
    /// The manifest parsed and is empty. Not an error.
    Empty,
    /// The manifest could not be obtained. Gallery state is empty.
    Unavailable(ManifestError),
}

impl LoadOutcome {
    /// The manifest was fetched and parsed, possibly empty.
    pub fn is_available(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. } | LoadOutcome::Empty)
    }

    /// Number of images loaded (0 for empty or unavailable).
    pub fn count(&self) -> usize {
        match self {
            LoadOutcome::Loaded { count } => *count,
            _ => 0,
        }
    }
}

/// Parse a manifest body. Anything other than an array of strings is an error.
pub fn parse_manifest(body: &str) -> Result<Manifest, ManifestError> {
    Ok(serde_json::from_str(body)?)
}

/// Reads the manifest from a site directory on disk.
#[derive(Debug, Clone)]
pub struct FileManifestSource {
    path: PathBuf,
}

impl FileManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Source for the configured manifest of a site rooted at `site_root`.
    pub fn for_site(site_root: &Path, config: &SiteConfig) -> Self {
        Self::new(config.manifest_path(site_root))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestSource for FileManifestSource {
    fn fetch(&self) -> Result<Manifest, ManifestError> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        parse_manifest(&body)
    }
}

/// A manifest held in memory. Useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticManifestSource {
    body: String,
}

impl StaticManifestSource {
    /// Source that returns the given filenames.
    pub fn from_filenames<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = filenames.into_iter().map(Into::into).collect();
        // A Vec<String> always serializes.
        let body = serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string());
        Self { body }
    }

    /// Source that parses the given raw body on every fetch.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl ManifestSource for StaticManifestSource {
    fn fetch(&self) -> Result<Manifest, ManifestError> {
        parse_manifest(&self.body)
    }
}
