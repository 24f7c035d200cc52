//! View router: keeps the modal, the URL fragment and the viewer index in sync.
//!
//! ## States
//!
//! ```text
//!            open_by_filename(f) / fragment resolves to f
//!   Closed ─────────────────────────────────────────────▶ Open(i)
//!     ▲                                                   │  ▲
//!     │ close / fragment resolves to nothing              │  │ navigate_prev: (i-1+N) mod N
//!     └───────────────────────────────────────────────────┘  │ navigate_next: (i+1) mod N
//!                                                          ──┘
//! ```
//!
//! The fragment is the source of truth. Every fragment change goes through
//! [`ViewRouter::on_fragment_changed`], whether the router wrote it, the user
//! pasted a link, or the browser went back. Opening writes the alias only
//! when the fragment does not already hold it, which is what stops the
//! "write fragment → fragment changed → open → write fragment" loop.
//!
//! Closing clears the fragment by replacing the current history entry, so a
//! close never leaves a dangling entry behind for the back button.
//!
//! The router never fails. Unknown filenames and aliases are no-ops or
//! closes; navigation on an empty gallery does nothing.

use crate::alias;
use crate::config::SiteConfig;
use crate::fragment::{self, FragmentStore};
use crate::state::GalleryState;
use crate::surface::{ImageRef, PresentationSurface};

/// Viewer state, owned by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open {
        index: usize,
    },
}

impl ViewerState {
    pub fn is_open(&self) -> bool {
        matches!(self, ViewerState::Open { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match self {
            ViewerState::Open { index } => Some(*index),
            ViewerState::Closed => None,
        }
    }
}

pub struct ViewRouter<S, F> {
    config: SiteConfig,
    state: ViewerState,
    surface: S,
    fragment: F,
}

impl<S: PresentationSurface, F: FragmentStore> ViewRouter<S, F> {
    /// A closed router. Call [`check_fragment`](Self::check_fragment) once
    /// the gallery is loaded to honor a deep link.
    pub fn new(config: SiteConfig, surface: S, fragment: F) -> Self {
        Self {
            config,
            state: ViewerState::Closed,
            surface,
            fragment,
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn fragment(&self) -> &F {
        &self.fragment
    }

    pub fn fragment_mut(&mut self) -> &mut F {
        &mut self.fragment
    }

    /// Open `filename` if it is part of the gallery. Returns whether it opened.
    pub fn open_by_filename(&mut self, gallery: &GalleryState, filename: &str) -> bool {
        if filename.is_empty() {
            return false;
        }
        match gallery.index_of(filename) {
            Some(index) => {
                self.open_index(gallery, index);
                true
            }
            None => {
                tracing::trace!(filename, "open ignored: not in gallery");
                false
            }
        }
    }

    /// Show the previous image, wrapping from the first to the last.
    pub fn navigate_prev(&mut self, gallery: &GalleryState) {
        let n = gallery.len();
        if let (ViewerState::Open { index }, true) = (self.state, n > 0) {
            self.open_index(gallery, (index % n + n - 1) % n);
        }
    }

    /// Show the next image, wrapping from the last to the first.
    pub fn navigate_next(&mut self, gallery: &GalleryState) {
        let n = gallery.len();
        if let (ViewerState::Open { index }, true) = (self.state, n > 0) {
            self.open_index(gallery, (index + 1) % n);
        }
    }

    /// Hide the modal and clear the fragment without adding a history entry.
    pub fn close(&mut self) {
        if self.state.is_open() {
            tracing::debug!("viewer closed");
        }
        self.state = ViewerState::Closed;
        self.surface.hide_modal();
        if !self.fragment.fragment().is_empty() {
            self.fragment.replace_fragment("");
        }
    }

    /// React to a fragment change from any origin.
    pub fn on_fragment_changed(&mut self, gallery: &GalleryState, raw: &str) {
        let text = fragment::normalize(raw);
        match gallery.resolve_str(text) {
            Some(filename) => {
                // Already showing it: keep the index, which may be a later
                // occurrence of a repeated filename.
                if let ViewerState::Open { index } = self.state {
                    if gallery.at(index) == Some(filename) {
                        return;
                    }
                }
                self.open_by_filename(gallery, filename);
            }
            None => {
                if !text.is_empty() {
                    tracing::debug!(fragment = text, "fragment does not match any image");
                }
                self.close();
            }
        }
    }

    /// Evaluate the fragment currently in the store, as on page load.
    pub fn check_fragment(&mut self, gallery: &GalleryState) {
        let current = self.fragment.fragment();
        self.on_fragment_changed(gallery, &current);
    }

    fn open_index(&mut self, gallery: &GalleryState, index: usize) {
        let Some(filename) = gallery.at(index) else {
            return;
        };
        let index = index % gallery.len();
        let image = ImageRef {
            filename: filename.to_string(),
            src: self.config.image_src(filename),
            alt: self.config.viewer.modal_alt.clone(),
            index,
        };
        self.state = ViewerState::Open { index };
        self.surface.show_modal(&image);

        let alias = alias::encode(filename);
        if self.fragment.fragment() != alias.as_str() {
            tracing::debug!(%alias, filename, index, "fragment updated");
            self.fragment.push_fragment(alias.as_str());
        }
    }
}
