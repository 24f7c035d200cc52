//! Presentation surface trait and shared types.
//!
//! The [`PresentationSurface`] trait is everything the gallery core needs
//! from the page: show the modal with an image, hide it, render the grid, or
//! render a placeholder instead of the grid. Layout (masonry, CSS) is the
//! surface's business.
//!
//! Two implementations ship with the crate:
//! - [`RecordingSurface`]: records every call; used by the `replay` command
//!   and by tests.
//! - [`HtmlSurface`](crate::html::HtmlSurface): keeps rendered markup for the
//!   `render` command.

/// An image as handed to the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Manifest filename.
    pub filename: String,
    /// Display source, e.g. `gallery/photo1.jpg`.
    pub src: String,
    /// Alt text.
    pub alt: String,
    /// Position in gallery order.
    pub index: usize,
}

/// What to show instead of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// The manifest could not be loaded.
    Unavailable,
    /// The manifest is an empty array.
    Empty,
}

/// Rendering operations driven by the gallery core.
pub trait PresentationSurface {
    /// Reveal the modal displaying `image`.
    fn show_modal(&mut self, image: &ImageRef);

    /// Hide the modal.
    fn hide_modal(&mut self);

    /// Render the grid for `filenames`, in order.
    fn render_grid(&mut self, filenames: &[String]);

    /// Render a placeholder in place of the grid.
    fn render_placeholder(&mut self, placeholder: Placeholder);
}

/// A recorded surface call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    ShowModal(ImageRef),
    HideModal,
    RenderGrid(Vec<String>),
    RenderPlaceholder(Placeholder),
}

/// Surface that records calls and tracks what is currently visible.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    modal: Option<ImageRef>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Image currently shown in the modal, if the modal is visible.
    pub fn modal(&self) -> Option<&ImageRef> {
        self.modal.as_ref()
    }

    pub fn is_modal_visible(&self) -> bool {
        self.modal.is_some()
    }

    /// Most recent grid or placeholder render.
    pub fn last_render(&self) -> Option<&SurfaceOp> {
        self.ops.iter().rev().find(|op| {
            matches!(op, SurfaceOp::RenderGrid(_) | SurfaceOp::RenderPlaceholder(_))
        })
    }
}

impl PresentationSurface for RecordingSurface {
    fn show_modal(&mut self, image: &ImageRef) {
        self.modal = Some(image.clone());
        self.ops.push(SurfaceOp::ShowModal(image.clone()));
    }

    fn hide_modal(&mut self) {
        self.modal = None;
        self.ops.push(SurfaceOp::HideModal);
    }

    fn render_grid(&mut self, filenames: &[String]) {
        self.ops.push(SurfaceOp::RenderGrid(filenames.to_vec()));
    }

    fn render_placeholder(&mut self, placeholder: Placeholder) {
        self.ops.push(SurfaceOp::RenderPlaceholder(placeholder));
    }
}
