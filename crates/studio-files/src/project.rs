//! Project tree operations.
//!
//! [`ProjectFiles`] translates user-facing file operations into
//! [`PathStore`] mutations while keeping the folder/file invariants:
//!
//! - saving a file or creating a folder creates every missing ancestor folder
//! - folder paths end with `/`, file paths do not
//! - deleting a folder removes every path that has the folder path as a
//!   literal string prefix
//!
//! None of the mutations can fail. Lookups report absence with `Option`.
//!
//! # Examples
//!
//! ```
//! use studio_files::ProjectFiles;
//!
//! let mut files = ProjectFiles::new();
//! files.save_file("a/b/c.txt", "hi");
//!
//! assert_eq!(files.read_file("a/b/c.txt"), Some("hi"));
//! assert_eq!(files.list_files(), vec!["a/", "a/b/", "a/b/c.txt"]);
//!
//! files.delete_path("a/");
//! assert!(files.list_files().is_empty());
//! ```

use crate::store::PathStore;
use crate::types::{
    Entry, FilesError, ProjectSnapshot, Result, ancestor_folders, folder_path, is_folder_path,
};
use tracing::{debug, trace};

/// The virtual project tree and the operations defined on it.
///
/// Construct one per process (or per test) and share it by reference; there
/// is no global instance.
#[derive(Debug, Clone, Default)]
pub struct ProjectFiles {
    store: PathStore,
}

impl ProjectFiles {
    /// Creates an empty project.
    ///
    /// Use [`ProjectBuilder::with_default_project`](crate::ProjectBuilder::with_default_project)
    /// for the seeded starter project.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing store without repairing it.
    #[must_use]
    pub const fn from_store(store: PathStore) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &PathStore {
        &self.store
    }

    /// Saves `content` at `path`, creating missing ancestor folders.
    ///
    /// Overwrites any previous content.
    pub fn save_file(&mut self, path: &str, content: impl Into<String>) {
        let created = self.ensure_ancestors(path);
        self.store.set(path, Entry::file(content));
        debug!(path, created_folders = created, "saved file");
    }

    /// Returns the content of the file at `path`.
    ///
    /// Returns `None` if nothing is stored there or the path is a folder.
    #[must_use]
    pub fn read_file(&self, path: &str) -> Option<&str> {
        let content = self.store.get(path).and_then(Entry::content);
        trace!(path, found = content.is_some(), "read file");
        content
    }

    /// Returns the content of the file at `path`, or why there is none.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::FileNotFound`] if nothing is stored at `path` and
    /// [`FilesError::NotAFile`] if `path` is a folder.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_files::ProjectFiles;
    ///
    /// let mut files = ProjectFiles::new();
    /// files.create_folder("docs");
    ///
    /// let error = files.require_file("docs/").unwrap_err();
    /// assert!(error.is_not_found());
    /// ```
    pub fn require_file(&self, path: &str) -> Result<&str> {
        match self.store.get(path) {
            Some(Entry::File(content)) => Ok(content),
            Some(Entry::Folder) => Err(FilesError::NotAFile {
                path: path.to_string(),
            }),
            None => Err(FilesError::FileNotFound {
                path: path.to_string(),
            }),
        }
    }

    /// Returns every stored path, files and folders, in store order.
    #[must_use]
    pub fn list_files(&self) -> Vec<String> {
        self.store.keys()
    }

    /// Returns every stored path in lexicographic order.
    ///
    /// This is the order the editor's tree view renders.
    #[must_use]
    pub fn list_files_sorted(&self) -> Vec<String> {
        let mut paths = self.store.keys();
        paths.sort_unstable();
        paths
    }

    /// Creates a folder, appending `/` to `path` if it is missing.
    ///
    /// Missing ancestors are created too. Creating an existing folder only
    /// repairs its ancestors.
    pub fn create_folder(&mut self, path: &str) {
        let folder = folder_path(path);
        let created = self.ensure_ancestors(&folder);
        if !self.store.contains(&folder) {
            self.store.set(folder.as_str(), Entry::Folder);
        }
        debug!(path = %folder, created_folders = created, "created folder");
    }

    /// Deletes whatever is stored at `path`.
    ///
    /// A folder is removed together with every path that has `path` as a
    /// literal prefix. A file is removed on its own. Absent paths are ignored.
    pub fn delete_path(&mut self, path: &str) {
        match self.store.get(path) {
            Some(Entry::Folder) => {
                let removed = self.remove_prefixed(path);
                debug!(path, removed, "deleted folder");
            }
            Some(Entry::File(_)) => self.delete_file(path),
            None => trace!(path, "delete of absent path ignored"),
        }
    }

    /// Deletes the file at `path`. Folders and absent paths are left alone.
    pub fn delete_file(&mut self, path: &str) {
        if matches!(self.store.get(path), Some(Entry::File(_))) {
            self.store.delete(path);
            debug!(path, "deleted file");
        }
    }

    /// Deletes a folder and everything beneath it.
    ///
    /// `path` is normalized to end with `/` first, so `"docs"` removes
    /// `"docs/"` and `"docs/a.txt"` but never `"docsX"`.
    pub fn delete_folder(&mut self, path: &str) {
        let prefix = folder_path(path);
        let removed = self.remove_prefixed(&prefix);
        debug!(path = %prefix, removed, "deleted folder");
    }

    /// Returns a full snapshot of the tree for export.
    #[must_use]
    pub fn get_all_files_as_object(&self) -> ProjectSnapshot {
        self.store
            .iter()
            .map(|(path, entry)| (path.to_string(), entry.clone().into_snapshot_value()))
            .collect()
    }

    /// Clears the tree and repopulates it from `snapshot` verbatim.
    ///
    /// No ancestor repair happens: a snapshot holding `"a/b/c.txt"` without
    /// `"a/"` and `"a/b/"` yields a tree without those folders. Call
    /// [`repair_ancestors`](Self::repair_ancestors) afterwards if needed.
    pub fn replace_file_system(&mut self, snapshot: ProjectSnapshot) {
        self.store.clear();
        for (path, value) in snapshot {
            self.store.set(path, Entry::from_snapshot_value(value));
        }
        debug!(entries = self.store.len(), "replaced project tree");
    }

    /// Returns ancestor folders that are referenced but not stored.
    ///
    /// The result is sorted and free of duplicates.
    #[must_use]
    pub fn missing_ancestors(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .store
            .iter()
            .flat_map(|(path, _)| ancestor_folders(path))
            .filter(|folder| !self.store.contains(folder))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Creates every missing ancestor folder and returns how many were added.
    pub fn repair_ancestors(&mut self) -> usize {
        let missing = self.missing_ancestors();
        for folder in &missing {
            self.store.set(folder.as_str(), Entry::Folder);
        }
        if !missing.is_empty() {
            debug!(repaired = missing.len(), "repaired missing folders");
        }
        missing.len()
    }

    /// Returns `true` if anything is stored at `path`.
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    /// Returns `true` if `path` is stored as a folder.
    #[must_use]
    pub fn is_folder(&self, path: &str) -> bool {
        self.store.get(path).is_some_and(Entry::is_folder)
    }

    /// Returns the number of stored files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.store
            .iter()
            .filter(|(_, entry)| !entry.is_folder())
            .count()
    }

    /// Returns the number of stored folders.
    #[must_use]
    pub fn folder_count(&self) -> usize {
        self.store.iter().filter(|(_, entry)| entry.is_folder()).count()
    }

    fn remove_prefixed(&mut self, prefix: &str) -> usize {
        self.store.retain(|stored, _| !stored.starts_with(prefix))
    }

    fn ensure_ancestors(&mut self, path: &str) -> usize {
        let mut created = 0;
        for folder in ancestor_folders(path) {
            // A folder path lists itself last; the caller inserts it.
            if folder == path && is_folder_path(path) {
                break;
            }
            if !self.store.contains(&folder) {
                self.store.set(folder, Entry::Folder);
                created += 1;
            }
        }
        created
    }
}
