//! URL fragment access.
//!
//! The fragment (`location.hash` without the `#`) is the single source of
//! truth for which image is open. The router writes it through a
//! [`FragmentStore`] and reacts to every change of it, whatever caused the
//! change. [`MemoryHistory`] models a browser tab's session history so the
//! router can be driven headless: pushes, replaces, back and forward.

/// Strip a leading `#` from raw fragment text.
pub fn normalize(raw: &str) -> &str {
    raw.strip_prefix('#').unwrap_or(raw)
}

/// Read/write access to the current URL fragment.
pub trait FragmentStore {
    /// Current fragment, without the leading `#`. Empty when there is none.
    fn fragment(&self) -> String;

    /// Set the fragment as a new history entry.
    fn push_fragment(&mut self, fragment: &str);

    /// Set the fragment by rewriting the current history entry.
    fn replace_fragment(&mut self, fragment: &str);

    /// A change notification the environment still owes the page, if any.
    ///
    /// Browsers fire `hashchange` after a push but not after a replace. A
    /// store that delivers events itself keeps the default.
    fn take_change(&mut self) -> Option<String> {
        None
    }
}

/// In-memory session history of fragments with a cursor.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
    pending: Option<String>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryHistory {
    /// History with a single entry, as when a page is opened at `initial`.
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![normalize(initial).to_string()],
            cursor: 0,
            pending: None,
        }
    }

    /// Move back one entry. Returns the new fragment, or `None` at the start.
    pub fn back(&mut self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Move forward one entry. Returns the new fragment, or `None` at the end.
    pub fn forward(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Number of entries in the session history.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl FragmentStore for MemoryHistory {
    fn fragment(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push_fragment(&mut self, fragment: &str) {
        let fragment = normalize(fragment);
        // Assigning the current hash again does not create an entry.
        if self.entries[self.cursor] == fragment {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment.to_string());
        self.cursor += 1;
        self.pending = Some(fragment.to_string());
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.entries[self.cursor] = normalize(fragment).to_string();
    }

    fn take_change(&mut self) -> Option<String> {
        self.pending.take()
    }
}
