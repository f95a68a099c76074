//! Builder pattern for constructing project trees.
//!
//! Provides a fluent API for seeding a [`ProjectFiles`] instance, including
//! the starter project every new studio session opens with.
//!
//! # Examples
//!
//! ```
//! use studio_files::ProjectBuilder;
//!
//! let files = ProjectBuilder::new()
//!     .add_file("src/index.js", "console.log('hi');")
//!     .add_folder("assets")
//!     .build();
//!
//! assert_eq!(files.list_files(), vec!["src/", "src/index.js", "assets/"]);
//! ```

use crate::project::ProjectFiles;

/// Path of the script opened in the editor on first load.
pub const DEFAULT_SCRIPT_PATH: &str = "script.js";

/// Content of the starter script.
pub const DEFAULT_SCRIPT: &str = r#"// Welcome to AI Studio!
// You can write and execute JavaScript code.
// Use the AI tools in the panel on the right to boost your productivity.

function factorial(n) {
  if (n === 0) {
    return 1;
  }
  return n * factorial(n - 1);
}

const num = 5;
console.log(`The factorial of ${num} is ${factorial(num)}`);

// Try asking the AI to "create a new folder named 'utils'"
// or "delete the 'docs' folder".
"#;

/// Content of the starter documentation file.
pub const DEFAULT_README: &str = "# Documentation\n\nThis is a sample documentation file.";

/// Builder for a project tree.
///
/// Files and folders are applied in call order through the regular
/// [`ProjectFiles`] operations, so ancestor folders are created on the way.
#[derive(Debug, Default)]
pub struct ProjectBuilder {
    files: ProjectFiles,
}

impl ProjectBuilder {
    /// Creates a builder for an empty project.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with the starter project.
    ///
    /// The starter project holds `script.js`, the `docs/` folder and
    /// `docs/README.md`.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_files::ProjectBuilder;
    ///
    /// let files = ProjectBuilder::with_default_project().build();
    /// assert_eq!(files.list_files(), vec!["script.js", "docs/", "docs/README.md"]);
    /// ```
    #[must_use]
    pub fn with_default_project() -> Self {
        Self::new()
            .add_file(DEFAULT_SCRIPT_PATH, DEFAULT_SCRIPT)
            .add_folder("docs/")
            .add_file("docs/README.md", DEFAULT_README)
    }

    /// Adds a file, creating its ancestor folders.
    #[must_use]
    pub fn add_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.files.save_file(path, content);
        self
    }

    /// Adds several files at once.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_files::ProjectBuilder;
    ///
    /// let files = ProjectBuilder::new()
    ///     .add_files([("a.js", "a"), ("b.js", "b")])
    ///     .build();
    ///
    /// assert_eq!(files.file_count(), 2);
    /// ```
    #[must_use]
    pub fn add_files<P, C>(mut self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<str>,
        C: Into<String>,
    {
        for (path, content) in files {
            self.files.save_file(path.as_ref(), content);
        }
        self
    }

    /// Adds a folder, appending `/` if missing.
    #[must_use]
    pub fn add_folder(mut self, path: &str) -> Self {
        self.files.create_folder(path);
        self
    }

    /// Returns the number of files added so far.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.file_count()
    }

    /// Consumes the builder and returns the project tree.
    #[must_use]
    pub fn build(self) -> ProjectFiles {
        self.files
    }
}
