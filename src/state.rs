//! Gallery state: the ordered image list and the alias lookup table.
//!
//! One [`GalleryState`] lives for one manifest load. [`GalleryState::load`]
//! replaces everything; nothing else mutates it. The router only reads from
//! it through [`resolve`](GalleryState::resolve),
//! [`index_of`](GalleryState::index_of) and [`at`](GalleryState::at).
//!
//! Alias collisions are not detected: when two filenames share an alias the
//! later manifest entry owns it.

use crate::alias::{self, Alias};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    order: Vec<String>,
    aliases: HashMap<Alias, String>,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build state directly from a manifest.
    pub fn from_manifest<I, S>(manifest: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self::new();
        state.load(manifest);
        state
    }

    /// Replace the gallery order and rebuild the alias table.
    pub fn load<I, S>(&mut self, manifest: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = manifest.into_iter().map(Into::into).collect();
        self.aliases = self
            .order
            .iter()
            .map(|filename| (alias::encode(filename), filename.clone()))
            .collect();
        tracing::debug!(
            images = self.order.len(),
            aliases = self.aliases.len(),
            "gallery state loaded"
        );
    }

    /// Drop all images, as after a failed manifest fetch.
    pub fn clear(&mut self) {
        self.order.clear();
        self.aliases.clear();
    }

    /// Filename owning `alias`, if any.
    pub fn resolve(&self, alias: &Alias) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Resolve raw fragment text. Text that is not a well-formed alias
    /// resolves to nothing.
    pub fn resolve_str(&self, text: &str) -> Option<&str> {
        Alias::parse(text).ok().and_then(|a| self.resolve(&a))
    }

    /// Position of the first occurrence of `filename` in gallery order.
    pub fn index_of(&self, filename: &str) -> Option<usize> {
        self.order.iter().position(|f| f == filename)
    }

    /// Filename at `index` modulo the gallery length. `None` only when empty.
    pub fn at(&self, index: usize) -> Option<&str> {
        if self.order.is_empty() {
            return None;
        }
        Some(&self.order[index % self.order.len()])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Filenames in gallery order.
    pub fn filenames(&self) -> &[String] {
        &self.order
    }

    /// Number of distinct aliases; less than [`len`](Self::len) when
    /// filenames repeat or collide.
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// `(alias, filename)` pairs in gallery order. Repeated filenames repeat.
    pub fn entries(&self) -> impl Iterator<Item = (Alias, &str)> {
        self.order
            .iter()
            .map(|filename| (alias::encode(filename), filename.as_str()))
    }

}
