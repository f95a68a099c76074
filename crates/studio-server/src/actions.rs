//! Project actions shared by the editor UI and the AI tool bindings.
//!
//! [`ProjectActions`] is the process boundary in front of the project tree.
//! Each method takes the lock for exactly one operation; a sequence of calls
//! is not isolated from concurrent callers, so the last write wins.

use std::sync::Arc;
use studio_files::{ProjectFiles, ProjectSnapshot};
use tokio::sync::RwLock;

/// Shared handle to the project tree.
pub type SharedProject = Arc<RwLock<ProjectFiles>>;

/// Async facade over the project tree.
///
/// Cloning is cheap and every clone operates on the same tree.
///
/// # Examples
///
/// ```
/// use studio_files::ProjectBuilder;
/// use studio_server::ProjectActions;
///
/// # async fn example() {
/// let actions = ProjectActions::new(ProjectBuilder::with_default_project().build());
///
/// actions.save_file("notes.md", "todo").await;
/// assert_eq!(actions.read_file("notes.md").await.as_deref(), Some("todo"));
/// assert_eq!(actions.read_file("docs/").await, None);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectActions {
    files: SharedProject,
}

impl ProjectActions {
    /// Wraps a project tree.
    #[must_use]
    pub fn new(files: ProjectFiles) -> Self {
        Self {
            files: Arc::new(RwLock::new(files)),
        }
    }

    /// Creates actions over an already shared tree.
    #[must_use]
    pub const fn from_shared(files: SharedProject) -> Self {
        Self { files }
    }

    /// Returns the shared tree handle.
    #[must_use]
    pub fn shared(&self) -> SharedProject {
        Arc::clone(&self.files)
    }

    /// Lists every stored path in store order.
    pub async fn list_files(&self) -> Vec<String> {
        self.files.read().await.list_files()
    }

    /// Reads a file; `None` if the path is absent or a folder.
    pub async fn read_file(&self, path: &str) -> Option<String> {
        self.files.read().await.read_file(path).map(str::to_string)
    }

    /// Reads a file, reporting why nothing was found.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the path is absent or a folder.
    pub async fn require_file(&self, path: &str) -> studio_files::Result<String> {
        self.files
            .read()
            .await
            .require_file(path)
            .map(str::to_string)
    }

    /// Saves a file, creating ancestor folders.
    pub async fn save_file(&self, path: &str, content: impl Into<String>) {
        self.files.write().await.save_file(path, content);
    }

    /// Creates a folder and its ancestors.
    pub async fn create_folder(&self, path: &str) {
        self.files.write().await.create_folder(path);
    }

    /// Deletes a file or, for folder paths, the folder and its contents.
    pub async fn delete_path(&self, path: &str) {
        self.files.write().await.delete_path(path);
    }

    /// Deletes a single file.
    pub async fn delete_file(&self, path: &str) {
        self.files.write().await.delete_file(path);
    }

    /// Deletes a folder and its contents.
    pub async fn delete_folder(&self, path: &str) {
        self.files.write().await.delete_folder(path);
    }

    /// Returns a snapshot of the whole project.
    pub async fn get_project_files(&self) -> ProjectSnapshot {
        self.files.read().await.get_all_files_as_object()
    }

    /// Replaces the whole project with `snapshot`.
    pub async fn import_project_files(&self, snapshot: ProjectSnapshot) {
        self.files.write().await.replace_file_system(snapshot);
    }

    /// Exports the project as a zip archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be encoded.
    pub async fn export_archive(&self) -> studio_files::Result<Vec<u8>> {
        self.files.read().await.export_archive()
    }

    /// Replaces the project with the contents of a zip archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be decoded; the project is
    /// left unchanged in that case.
    pub async fn import_archive(&self, bytes: &[u8]) -> studio_files::Result<usize> {
        self.files.write().await.import_archive(bytes)
    }
}
