//! Input adapter: maps page input events onto router transitions.
//!
//! | Event | Modal open | Modal closed |
//! |---|---|---|
//! | `Escape` | close | ignored |
//! | `ArrowLeft` / `ArrowRight` | prev / next, default suppressed | ignored |
//! | click on modal background | left half → prev, right half → next | n/a |
//! | click on close control | close | n/a |
//! | click on modal image | ignored | n/a |
//! | tile activated | writes the tile alias to the fragment | same |
//! | context menu / drag start on an image | default suppressed | same |
//!
//! A tile activation only writes the fragment. The open happens when the
//! environment reports the fragment change, exactly as for a shared link.

use crate::alias;
use crate::fragment::FragmentStore;
use crate::router::ViewRouter;
use crate::state::GalleryState;
use crate::surface::PresentationSurface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value, including legacy names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Which part of the modal received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Background,
    Image,
    CloseControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Direction for a background click at `x` on a modal spanning
/// `left..left + width`. The center line belongs to the right half.
pub fn click_direction(x: f64, left: f64, width: f64) -> Direction {
    if x < left + width / 2.0 {
        Direction::Prev
    } else {
        Direction::Next
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(Key),
    ModalClick {
        target: ClickTarget,
        x: f64,
        modal_left: f64,
        modal_width: f64,
    },
    /// A grid tile (image or its overlay button) was activated.
    TileActivated(String),
    /// The fragment changed (link pasted, back/forward, or our own write).
    FragmentChanged(String),
    ContextMenu { on_image: bool },
    DragStart { on_image: bool },
}

/// What the adapter asks of the environment after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResponse {
    /// Suppress the browser's default action for the event.
    pub prevent_default: bool,
}

impl InputResponse {
    fn allow() -> Self {
        Self::default()
    }

    fn suppress() -> Self {
        Self {
            prevent_default: true,
        }
    }
}

impl<S: PresentationSurface, F: FragmentStore> ViewRouter<S, F> {
    /// Route one input event.
    pub fn handle_input(&mut self, gallery: &GalleryState, event: InputEvent) -> InputResponse {
        let open = self.state().is_open();
        match event {
            InputEvent::Key(Key::Escape) if open => {
                self.close();
                InputResponse::allow()
            }
            InputEvent::Key(Key::ArrowLeft) if open => {
                self.navigate_prev(gallery);
                InputResponse::suppress()
            }
            InputEvent::Key(Key::ArrowRight) if open => {
                self.navigate_next(gallery);
                InputResponse::suppress()
            }
            InputEvent::Key(key) => {
                tracing::trace!(?key, open, "key ignored");
                InputResponse::allow()
            }
            InputEvent::ModalClick { .. } if !open => InputResponse::allow(),
            InputEvent::ModalClick {
                target: ClickTarget::Background,
                x,
                modal_left,
                modal_width,
            } => {
                match click_direction(x, modal_left, modal_width) {
                    Direction::Prev => self.navigate_prev(gallery),
                    Direction::Next => self.navigate_next(gallery),
                }
                InputResponse::allow()
            }
            InputEvent::ModalClick {
                target: ClickTarget::CloseControl,
                ..
            } => {
                self.close();
                InputResponse::allow()
            }
            InputEvent::ModalClick {
                target: ClickTarget::Image,
                ..
            } => InputResponse::allow(),
            InputEvent::TileActivated(filename) => {
                let alias = alias::encode(&filename);
                self.fragment_mut().push_fragment(alias.as_str());
                InputResponse::allow()
            }
            InputEvent::FragmentChanged(raw) => {
                self.on_fragment_changed(gallery, &raw);
                InputResponse::allow()
            }
            InputEvent::ContextMenu { on_image } | InputEvent::DragStart { on_image } => {
                InputResponse {
                    prevent_default: on_image,
                }
            }
        }
    }
}
