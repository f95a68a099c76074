//! Insertion-ordered path store.
//!
//! [`PathStore`] is the single source of truth for the project tree: a map
//! from path string to [`Entry`]. It performs no validation of path shape;
//! [`ProjectFiles`](crate::ProjectFiles) is responsible for normalization and
//! the folder/file invariants.
//!
//! # Examples
//!
//! ```
//! use studio_files::{Entry, PathStore};
//!
//! let mut store = PathStore::new();
//! store.set("b.txt", Entry::file("b"));
//! store.set("a/", Entry::Folder);
//!
//! // Insertion order, not lexicographic order
//! assert_eq!(store.keys(), vec!["b.txt", "a/"]);
//! assert_eq!(store.get("a/"), Some(&Entry::Folder));
//! assert!(store.get("missing").is_none());
//! ```

use crate::types::Entry;
use std::collections::HashMap;

/// An in-memory mapping from path to entry that remembers insertion order.
///
/// Lookups are O(1). Removal is linear in the number of stored paths, which
/// is the same cost as the prefix scans used for cascading deletes.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; callers sharing it across tasks wrap it in
/// a lock.
#[derive(Debug, Clone, Default)]
pub struct PathStore {
    entries: HashMap<String, Entry>,
    order: Vec<String>,
}

impl PathStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry stored at `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Entry> {
        self.entries.get(path)
    }

    /// Returns `true` if anything is stored at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Inserts or overwrites the entry at `path`.
    ///
    /// Overwriting keeps the path at its original position in [`keys`](Self::keys).
    pub fn set(&mut self, path: impl Into<String>, entry: Entry) {
        let path = path.into();
        if !self.entries.contains_key(&path) {
            self.order.push(path.clone());
        }
        self.entries.insert(path, entry);
    }

    /// Removes the entry at `path` and returns it. No-op if absent.
    pub fn delete(&mut self, path: &str) -> Option<Entry> {
        let removed = self.entries.remove(path)?;
        self.order.retain(|stored| stored != path);
        Some(removed)
    }

    /// Keeps only the entries for which `keep` returns `true`.
    ///
    /// Returns the number of removed entries.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Entry) -> bool) -> usize {
        let before = self.order.len();
        let entries = &mut self.entries;
        self.order.retain(|path| {
            let keep_entry = entries.get(path).is_some_and(|entry| keep(path, entry));
            if !keep_entry {
                entries.remove(path);
            }
            keep_entry
        });
        before - self.order.len()
    }

    /// Returns a snapshot of every stored path in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Iterates over `(path, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.order
            .iter()
            .filter_map(|path| self.entries.get(path).map(|entry| (path.as_str(), entry)))
    }

    /// Returns the number of stored paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
