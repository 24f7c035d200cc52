//! # Deeplink Gal
//!
//! A single-page photo gallery whose viewer is addressable by URL fragment.
//! Every image gets a short, stable alias derived from its filename, so
//! `gallery.html#7itsvedo` opens `photo1.jpg` in the modal viewer no matter
//! how the manifest has been reordered since the link was shared.
//!
//! # Architecture: Fragment as Source of Truth
//!
//! The viewer never opens or closes an image without going through the URL
//! fragment. Opening writes the image's alias; a fragment change is what
//! actually shows the modal:
//!
//! ```text
//! click / key / link ─▶ ViewRouter ─▶ fragment.push(alias) ─▶ hashchange
//!                           ▲                                      │
//!                           └──────── on_fragment_changed ◀───────┘
//! ```
//!
//! The router skips the fragment write when the value would not change, which
//! is what stops the loop. Back and forward buttons, pasted links, and page
//! loads all enter through the same `on_fragment_changed` path.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`alias`] | Deterministic filename → 8-character alias codec |
//! | [`manifest`] | Manifest sources (`gallery/manifest.json`) and load outcomes |
//! | [`state`] | Ordered filename list plus alias lookup table |
//! | [`fragment`] | Fragment store trait and an in-memory browser history |
//! | [`surface`] | Presentation surface trait and a recording implementation |
//! | [`router`] | Viewer state machine: open, close, prev/next, fragment sync |
//! | [`input`] | Keyboard, click, and tile events mapped onto router operations |
//! | [`session`] | One page lifetime: load, render, deep link, event dispatch |
//! | [`html`] | Maud markup for the grid, placeholders, and modal |
//! | [`replay`] | Scripted steps for driving a headless session from the CLI |
//! | [`config`] | `config.toml` loading on top of stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Stable Aliases Over Indices
//!
//! A link like `#3` breaks as soon as an image is inserted before it. The
//! alias depends only on the filename, so links survive reordering, additions,
//! and removals of other images. The cost is that two filenames can collide;
//! with 36^8 possible aliases and galleries of a few hundred images this is
//! accepted and not detected (the later manifest entry wins).
//!
//! ## Traits at the Browser Seams
//!
//! [`fragment::FragmentStore`] and [`surface::PresentationSurface`] stand in
//! for `location.hash` and the DOM. Everything above them is plain Rust that
//! tests drive with [`fragment::MemoryHistory`] and
//! [`surface::RecordingSurface`], with no browser involved.

pub mod alias;
pub mod config;
pub mod fragment;
pub mod html;
pub mod input;
pub mod manifest;
pub mod output;
pub mod replay;
pub mod router;
pub mod session;
pub mod state;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_helpers;
