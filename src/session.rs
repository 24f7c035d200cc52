//! One page session: manifest load, grid render, deep-link evaluation, and
//! event dispatch.
//!
//! ```text
//! Session::new        gallery empty, viewer closed, every navigation a no-op
//!     │
//! start(source)       fetch manifest ─┬─ Ok(non-empty) → GalleryState::load → render_grid
//!     │                               ├─ Ok([])        → render_placeholder(Empty)
//!     │                               └─ Err(_)        → render_placeholder(Unavailable)
//!     ▼
//! check fragment      a shared link opens its image straight away
//!     │
//! dispatch(event)     router transition, then deliver owed fragment changes
//! ```
//!
//! After every transition the session drains [`FragmentStore::take_change`]
//! and feeds each pending change back to the router, standing in for the
//! browser's `hashchange` event. The router's "skip write when equal" guard
//! makes that echo a no-op, so the drain always terminates.

use crate::config::SiteConfig;
use crate::fragment::{FragmentStore, MemoryHistory};
use crate::input::{InputEvent, InputResponse};
use crate::manifest::{LoadOutcome, ManifestSource};
use crate::router::{ViewRouter, ViewerState};
use crate::state::GalleryState;
use crate::surface::{Placeholder, PresentationSurface};

pub struct Session<S, F> {
    gallery: GalleryState,
    router: ViewRouter<S, F>,
    outcome: LoadOutcome,
}

impl<S: PresentationSurface, F: FragmentStore> Session<S, F> {
    /// A session whose manifest has not been loaded yet.
    pub fn new(config: SiteConfig, surface: S, fragment: F) -> Self {
        Self {
            gallery: GalleryState::new(),
            router: ViewRouter::new(config, surface, fragment),
            outcome: LoadOutcome::NotLoaded,
        }
    }

    /// Load the manifest, render, and evaluate the current fragment.
    pub fn start(&mut self, source: &dyn ManifestSource) -> &LoadOutcome {
        self.load(source);
        self.router.check_fragment(&self.gallery);
        self.deliver_fragment_changes();
        self.outcome()
    }

    /// Fetch the manifest again and re-evaluate the fragment, which may now
    /// resolve to a different image or to nothing.
    pub fn reload(&mut self, source: &dyn ManifestSource) -> &LoadOutcome {
        self.start(source)
    }

    fn load(&mut self, source: &dyn ManifestSource) {
        let outcome = match source.fetch() {
            Ok(manifest) if manifest.is_empty() => {
                self.gallery.clear();
                self.router
                    .surface_mut()
                    .render_placeholder(Placeholder::Empty);
                LoadOutcome::Empty
            }
            Ok(manifest) => {
                self.gallery.load(manifest);
                self.router
                    .surface_mut()
                    .render_grid(self.gallery.filenames());
                LoadOutcome::Loaded {
                    count: self.gallery.len(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "gallery manifest unavailable");
                self.gallery.clear();
                self.router
                    .surface_mut()
                    .render_placeholder(Placeholder::Unavailable);
                LoadOutcome::Unavailable(e)
            }
        };
        self.outcome = outcome;
    }

    /// Route one input event and deliver the fragment changes it caused.
    pub fn dispatch(&mut self, event: InputEvent) -> InputResponse {
        let response = self.router.handle_input(&self.gallery, event);
        self.deliver_fragment_changes();
        response
    }

    /// Open `filename` directly.
    pub fn open_by_filename(&mut self, filename: &str) -> bool {
        let opened = self.router.open_by_filename(&self.gallery, filename);
        self.deliver_fragment_changes();
        opened
    }

    pub fn navigate_prev(&mut self) {
        self.router.navigate_prev(&self.gallery);
        self.deliver_fragment_changes();
    }

    pub fn navigate_next(&mut self) {
        self.router.navigate_next(&self.gallery);
        self.deliver_fragment_changes();
    }

    pub fn close(&mut self) {
        self.router.close();
        self.deliver_fragment_changes();
    }

    /// The fragment changed outside the router (pasted link, history move).
    pub fn on_fragment_changed(&mut self, raw: &str) {
        self.router.on_fragment_changed(&self.gallery, raw);
        self.deliver_fragment_changes();
    }

    fn deliver_fragment_changes(&mut self) {
        while let Some(changed) = self.router.fragment_mut().take_change() {
            self.router.on_fragment_changed(&self.gallery, &changed);
        }
    }

    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    pub fn router(&self) -> &ViewRouter<S, F> {
        &self.router
    }

    pub fn state(&self) -> ViewerState {
        self.router.state()
    }

    pub fn surface(&self) -> &S {
        self.router.surface()
    }

    pub fn fragment(&self) -> String {
        self.router.fragment().fragment()
    }

    /// Outcome of the last load; [`LoadOutcome::NotLoaded`] before
    /// [`start`](Self::start).
    pub fn outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    /// Filename currently shown in the modal.
    pub fn current_filename(&self) -> Option<&str> {
        self.state()
            .current_index()
            .and_then(|i| self.gallery.at(i))
    }
}

impl<S: PresentationSurface> Session<S, MemoryHistory> {
    /// Browser back button. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        match self.router.fragment_mut().back() {
            Some(fragment) => {
                self.on_fragment_changed(&fragment);
                true
            }
            None => false,
        }
    }

    /// Browser forward button. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        match self.router.fragment_mut().forward() {
            Some(fragment) => {
                self.on_fragment_changed(&fragment);
                true
            }
            None => false,
        }
    }

    pub fn history(&self) -> &MemoryHistory {
        self.router.fragment()
    }
}
