//! Virtual project tree for the code studio.
//!
//! Holds every file and folder of the project being edited in memory and
//! provides the operations shared by the editor UI, the server-side actions
//! and the AI tool bindings.
//!
//! # Features
//!
//! - **Path store**: insertion-ordered map from path to [`Entry`]
//! - **Invariants on write**: saving a file creates its ancestor folders;
//!   folder paths always end with `/`
//! - **Cascading delete**: deleting a folder removes everything under it
//! - **Snapshots and archives**: export and replace the whole tree, as a map
//!   or as a zip archive
//! - **Thread-safe**: all types are `Send + Sync`
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use studio_files::ProjectFiles;
//!
//! let mut files = ProjectFiles::new();
//! files.create_folder("docs");
//! files.save_file("docs/a.txt", "z");
//!
//! assert_eq!(files.read_file("docs/a.txt"), Some("z"));
//! assert_eq!(files.list_files(), vec!["docs/", "docs/a.txt"]);
//!
//! files.delete_path("docs/");
//! assert!(files.list_files().is_empty());
//! ```
//!
//! ## Starter project
//!
//! ```
//! use studio_files::ProjectBuilder;
//!
//! let files = ProjectBuilder::with_default_project().build();
//! assert!(files.read_file("script.js").is_some());
//! assert!(files.is_folder("docs/"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod archive;
pub mod builder;
pub mod project;
pub mod store;
pub mod types;

// Re-export main types
pub use archive::{ArchiveOptions, read_archive, write_archive};
pub use builder::ProjectBuilder;
pub use project::ProjectFiles;
pub use store::PathStore;
pub use types::{Entry, FilesError, ProjectSnapshot, Result};
