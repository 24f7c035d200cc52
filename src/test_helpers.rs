//! Shared test utilities for the deeplink-gal test suite.
//!
//! Provides fixture setup, session builders over the in-memory browser
//! stand-ins, and viewer assertions that print the whole picture on failure.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures("site");
//! let mut session = recording_session("");
//! session.start(&site_source(tmp.path()));
//!
//! session.open_by_filename("sunset.webp");
//! assert_viewing(&session, "sunset.webp");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::{self, SiteConfig};
use crate::fragment::MemoryHistory;
use crate::manifest::{FileManifestSource, StaticManifestSource};
use crate::router::ViewerState;
use crate::session::Session;
use crate::surface::{PresentationSurface, RecordingSurface};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/<name>/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures(name: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name);
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Manifest source for a site root, honoring its `config.toml`.
pub fn site_source(root: &Path) -> FileManifestSource {
    let config = config::load_config(root).unwrap();
    FileManifestSource::for_site(root, &config)
}

// =========================================================================
// Sessions
// =========================================================================

/// The three-image gallery most router tests use.
pub fn abc_source() -> StaticManifestSource {
    StaticManifestSource::from_filenames(["a.png", "b.png", "c.png"])
}

/// A session with default config, recording surface, and a history whose
/// first entry is `initial`.
pub fn recording_session(initial: &str) -> Session<RecordingSurface, MemoryHistory> {
    Session::new(
        SiteConfig::default(),
        RecordingSurface::new(),
        MemoryHistory::new(initial),
    )
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert the modal shows `filename` and the fragment is its alias.
pub fn assert_viewing<S: PresentationSurface>(
    session: &Session<S, MemoryHistory>,
    filename: &str,
) {
    assert_eq!(
        session.current_filename(),
        Some(filename),
        "viewer state {:?}, fragment {:?}",
        session.state(),
        session.fragment()
    );
    assert_eq!(
        session.fragment(),
        crate::alias::encode(filename).as_str(),
        "fragment out of sync with viewer"
    );
}

/// Assert the viewer is closed and the fragment cleared.
pub fn assert_closed<S: PresentationSurface>(session: &Session<S, MemoryHistory>) {
    assert_eq!(
        session.state(),
        ViewerState::Closed,
        "fragment {:?}",
        session.fragment()
    );
    assert_eq!(session.fragment(), "", "closed viewer left a fragment behind");
}
