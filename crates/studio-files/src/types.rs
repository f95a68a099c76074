//! Core types for the project tree.
//!
//! Defines the stored [`Entry`] value, the path conventions shared by every
//! operation, and the crate error type.
//!
//! # Examples
//!
//! ```
//! use studio_files::{Entry, types::is_folder_path};
//!
//! let file = Entry::file("console.log('hi');");
//! assert_eq!(file.content(), Some("console.log('hi');"));
//!
//! assert!(Entry::Folder.is_folder());
//! assert!(is_folder_path("docs/"));
//! assert!(!is_folder_path("docs/README.md"));
//! ```

use std::collections::BTreeMap;
use thiserror::Error;

/// Separator between path segments. Folder paths end with it.
pub const SEPARATOR: char = '/';

/// Full export of the project tree.
///
/// Folders map to `None`, files to their content. Keys are ordered, so a
/// folder always precedes the entries it contains.
pub type ProjectSnapshot = BTreeMap<String, Option<String>>;

/// Errors produced by project tree lookups and archive handling.
///
/// # Examples
///
/// ```
/// use studio_files::FilesError;
///
/// let error = FilesError::FileNotFound {
///     path: "src/main.js".to_string(),
/// };
///
/// assert!(error.is_not_found());
/// assert_eq!(error.to_string(), "File not found: src/main.js");
/// ```
#[derive(Error, Debug)]
pub enum FilesError {
    /// Nothing is stored at the path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was looked up
        path: String,
    },

    /// The path names a folder where a file was expected
    #[error("Not a file: {path}")]
    NotAFile {
        /// The folder path
        path: String,
    },

    /// The archive is readable but its contents cannot become a project
    #[error("Invalid archive entry '{name}': {reason}")]
    InvalidArchive {
        /// Entry name inside the archive
        name: String,
        /// Why the entry was rejected
        reason: String,
    },

    /// Zip encoding or decoding failed
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// I/O failure while reading or writing an archive
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilesError {
    /// Returns `true` if the lookup found nothing usable at the path.
    ///
    /// Both a missing path and a folder path count as not found, matching
    /// what [`read_file`](crate::ProjectFiles::read_file) reports.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::NotAFile { .. })
    }

    /// Returns `true` if this error came from archive import or export.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_files::FilesError;
    ///
    /// let error = FilesError::InvalidArchive {
    ///     name: "../evil".to_string(),
    ///     reason: "parent directory reference".to_string(),
    /// };
    /// assert!(error.is_archive_error());
    /// assert!(!error.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_archive_error(&self) -> bool {
        matches!(self, Self::InvalidArchive { .. } | Self::Archive(_))
    }
}

/// Result alias for project tree operations.
pub type Result<T> = std::result::Result<T, FilesError>;

/// The value stored for a path.
///
/// A path is a folder if and only if its entry is [`Entry::Folder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A file and its textual content
    File(String),
    /// Folder marker; carries no content
    Folder,
}

impl Entry {
    /// Creates a file entry.
    #[must_use]
    pub fn file(content: impl Into<String>) -> Self {
        Self::File(content.into())
    }

    /// Returns `true` for the folder marker.
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }

    /// Returns the file content, or `None` for a folder.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::File(content) => Some(content),
            Self::Folder => None,
        }
    }

    /// Converts the entry into its snapshot form.
    #[must_use]
    pub fn into_snapshot_value(self) -> Option<String> {
        match self {
            Self::File(content) => Some(content),
            Self::Folder => None,
        }
    }

    /// Builds an entry from its snapshot form.
    #[must_use]
    pub fn from_snapshot_value(value: Option<String>) -> Self {
        value.map_or(Self::Folder, Self::File)
    }
}

/// Returns `true` if `path` follows the folder convention.
#[must_use]
pub fn is_folder_path(path: &str) -> bool {
    path.ends_with(SEPARATOR)
}

/// Appends the separator to `path` unless it already ends with one.
///
/// # Examples
///
/// ```
/// use studio_files::types::folder_path;
///
/// assert_eq!(folder_path("docs"), "docs/");
/// assert_eq!(folder_path("docs/"), "docs/");
/// ```
#[must_use]
pub fn folder_path(path: &str) -> String {
    if is_folder_path(path) {
        path.to_string()
    } else {
        format!("{path}{SEPARATOR}")
    }
}

/// Lists the folder paths that must exist above `path`, outermost first.
///
/// Every segment before the last separator contributes one folder; empty
/// segments (leading or doubled separators) are skipped. A folder path yields
/// its own path as the last element.
///
/// # Examples
///
/// ```
/// use studio_files::types::ancestor_folders;
///
/// assert_eq!(ancestor_folders("a/b/c.txt"), vec!["a/", "a/b/"]);
/// assert_eq!(ancestor_folders("a/b/"), vec!["a/", "a/b/"]);
/// assert!(ancestor_folders("top.txt").is_empty());
/// ```
#[must_use]
pub fn ancestor_folders(path: &str) -> Vec<String> {
    let Some(last) = path.rfind(SEPARATOR) else {
        return Vec::new();
    };

    let mut current = String::with_capacity(last + 1);
    let mut folders = Vec::new();
    for segment in path[..last].split(SEPARATOR) {
        if segment.is_empty() {
            continue;
        }
        current.push_str(segment);
        current.push(SEPARATOR);
        folders.push(current.clone());
    }
    folders
}

/// Returns why `path` cannot be stored in a portable project, if it can't.
///
/// Unsafe paths are empty, absolute, contain a `..` segment, or use a
/// backslash. Archive import rejects them, so the tool bindings and archive
/// export refuse them too.
///
/// # Examples
///
/// ```
/// use studio_files::types::unsafe_path_reason;
///
/// assert_eq!(unsafe_path_reason("src/main.js"), None);
/// assert_eq!(unsafe_path_reason("/etc/passwd"), Some("absolute path"));
/// assert_eq!(unsafe_path_reason("a/../b"), Some("parent directory reference"));
/// ```
#[must_use]
pub fn unsafe_path_reason(path: &str) -> Option<&'static str> {
    if path.is_empty() {
        Some("empty name")
    } else if path.starts_with(SEPARATOR) {
        Some("absolute path")
    } else if path.split(SEPARATOR).any(|segment| segment == "..") {
        Some("parent directory reference")
    } else if path.contains('\\') {
        Some("backslash separator")
    } else {
        None
    }
}

/// Returns `true` if `path` survives an archive export and import.
#[must_use]
pub fn is_safe_path(path: &str) -> bool {
    unsafe_path_reason(path).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_file() {
        let entry = Entry::file("hello");
        assert!(!entry.is_folder());
        assert_eq!(entry.content(), Some("hello"));
    }

    #[test]
    fn test_entry_folder() {
        assert!(Entry::Folder.is_folder());
        assert_eq!(Entry::Folder.content(), None);
    }

    #[test]
    fn test_entry_snapshot_value() {
        assert_eq!(Entry::file("x").into_snapshot_value(), Some("x".to_string()));
        assert_eq!(Entry::Folder.into_snapshot_value(), None);
        assert_eq!(Entry::from_snapshot_value(None), Entry::Folder);
        assert_eq!(
            Entry::from_snapshot_value(Some(String::new())),
            Entry::file("")
        );
    }

    #[test]
    fn test_unsafe_path_reason() {
        assert!(is_safe_path("docs/"));
        assert!(is_safe_path("a/b..c.txt"));
        assert_eq!(unsafe_path_reason(""), Some("empty name"));
        assert_eq!(unsafe_path_reason("/abs.txt"), Some("absolute path"));
        assert_eq!(
            unsafe_path_reason("src/../up.txt"),
            Some("parent directory reference")
        );
        assert_eq!(unsafe_path_reason(".."), Some("parent directory reference"));
        assert_eq!(unsafe_path_reason("a\\b.txt"), Some("backslash separator"));
    }

    #[test]
    fn test_folder_path() {
        assert_eq!(folder_path("utils"), "utils/");
        assert_eq!(folder_path("utils/"), "utils/");
        assert_eq!(folder_path("a/b"), "a/b/");
    }

    #[test]
    fn test_ancestor_folders_nested() {
        assert_eq!(
            ancestor_folders("src/components/button.js"),
            vec!["src/", "src/components/"]
        );
    }

    #[test]
    fn test_ancestor_folders_top_level() {
        assert!(ancestor_folders("script.js").is_empty());
        assert!(ancestor_folders("").is_empty());
    }

    #[test]
    fn test_ancestor_folders_skips_empty_segments() {
        assert_eq!(ancestor_folders("/a//b.txt"), vec!["a/"]);
    }

    #[test]
    fn test_ancestor_folders_of_folder_includes_itself() {
        assert_eq!(ancestor_folders("docs/"), vec!["docs/"]);
    }

    #[test]
    fn test_error_classification() {
        let missing = FilesError::FileNotFound {
            path: "x".to_string(),
        };
        assert!(missing.is_not_found());
        assert!(!missing.is_archive_error());

        let folder = FilesError::NotAFile {
            path: "docs/".to_string(),
        };
        assert!(folder.is_not_found());

        let io = FilesError::Io(std::io::Error::other("boom"));
        assert!(!io.is_not_found());
        assert!(!io.is_archive_error());
    }

    #[test]
    fn test_error_display_matches_model_message() {
        let error = FilesError::FileNotFound {
            path: "notes.md".to_string(),
        };
        assert_eq!(error.to_string(), "File not found: notes.md");
    }
}
