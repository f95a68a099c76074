//! Zip import and export of whole projects.
//!
//! Export writes one archive entry per stored path: folders become directory
//! entries, files become content entries. Import reads the same layout back
//! into a [`ProjectSnapshot`] and replaces the tree with it.
//!
//! The archive is parsed completely before the tree is touched, so a
//! malformed archive leaves the project unchanged.
//!
//! # Examples
//!
//! ```
//! use studio_files::ProjectBuilder;
//!
//! let source = ProjectBuilder::new()
//!     .add_file("src/main.js", "console.log(1);")
//!     .build();
//! let bytes = source.export_archive().unwrap();
//!
//! let mut target = ProjectBuilder::with_default_project().build();
//! target.import_archive(&bytes).unwrap();
//!
//! assert_eq!(target.list_files(), vec!["src/", "src/main.js"]);
//! ```

use crate::project::ProjectFiles;
use crate::types::{
    FilesError, ProjectSnapshot, Result, folder_path, is_folder_path, unsafe_path_reason,
};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Options for archive export.
///
/// # Examples
///
/// ```
/// use studio_files::ArchiveOptions;
/// use zip::CompressionMethod;
///
/// let options = ArchiveOptions::default().with_compression(CompressionMethod::Stored);
/// assert_eq!(options.compression, CompressionMethod::Stored);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Compression applied to file entries
    pub compression: CompressionMethod,
}

impl ArchiveOptions {
    /// Creates options with deflate compression.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Sets the compression method for file entries.
    #[must_use]
    pub const fn with_compression(mut self, compression: CompressionMethod) -> Self {
        self.compression = compression;
        self
    }

    fn entry_options(self) -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(self.compression)
    }
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes a snapshot as a zip archive.
///
/// Entries are written in snapshot key order, so every folder precedes its
/// contents.
///
/// # Errors
///
/// Returns [`FilesError::InvalidArchive`] if a path could not be imported
/// again, [`FilesError::Archive`] if the zip writer fails and
/// [`FilesError::Io`] if writing entry content fails. Names are checked
/// before anything is written.
pub fn write_archive(snapshot: &ProjectSnapshot, options: ArchiveOptions) -> Result<Vec<u8>> {
    for path in snapshot.keys() {
        validate_entry_name(path)?;
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (path, value) in snapshot {
        match value {
            None => writer.add_directory(path.as_str(), options.entry_options())?,
            Some(content) => {
                writer.start_file(path.as_str(), options.entry_options())?;
                writer.write_all(content.as_bytes())?;
            }
        }
    }

    let bytes = writer.finish()?.into_inner();
    debug!(entries = snapshot.len(), bytes = bytes.len(), "wrote archive");
    Ok(bytes)
}

/// Decodes a zip archive into a snapshot.
///
/// Directory entries become folders (`None`), every other entry becomes a
/// file whose content must be valid UTF-8.
///
/// # Errors
///
/// Returns [`FilesError::Archive`] if the bytes are not a zip archive,
/// [`FilesError::InvalidArchive`] for unsafe entry names or non-UTF-8
/// content, and [`FilesError::Io`] if decompression fails.
pub fn read_archive(bytes: &[u8]) -> Result<ProjectSnapshot> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut snapshot = ProjectSnapshot::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        validate_entry_name(&name)?;

        if entry.is_dir() || is_folder_path(&name) {
            snapshot.insert(folder_path(&name), None);
            continue;
        }

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        let content = String::from_utf8(bytes).map_err(|_| FilesError::InvalidArchive {
            name: name.clone(),
            reason: "content is not valid UTF-8".to_string(),
        })?;
        snapshot.insert(name, Some(content));
    }

    Ok(snapshot)
}

/// Rejects names that would escape the project root.
fn validate_entry_name(name: &str) -> Result<()> {
    match unsafe_path_reason(name) {
        None => Ok(()),
        Some(reason) => Err(FilesError::InvalidArchive {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
    }
}

impl ProjectFiles {
    /// Exports the whole tree as a deflate-compressed zip archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be encoded.
    pub fn export_archive(&self) -> Result<Vec<u8>> {
        self.export_archive_with_options(ArchiveOptions::default())
    }

    /// Exports the whole tree with custom archive options.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be encoded.
    pub fn export_archive_with_options(&self, options: ArchiveOptions) -> Result<Vec<u8>> {
        write_archive(&self.get_all_files_as_object(), options)
    }

    /// Replaces the tree with the contents of a zip archive.
    ///
    /// Archives often omit directory entries, so missing ancestor folders are
    /// created after the replacement. Returns the number of stored paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be decoded; the tree is left
    /// unchanged in that case.
    pub fn import_archive(&mut self, bytes: &[u8]) -> Result<usize> {
        let snapshot = read_archive(bytes)?;
        self.replace_file_system(snapshot);
        let repaired = self.repair_ancestors();
        let total = self.store().len();
        info!(entries = total, repaired, "imported project archive");
        Ok(total)
    }

    /// Reads a zip archive from disk and imports it.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::Io`] if the file cannot be read, or any error
    /// from [`import_archive`](Self::import_archive).
    pub fn import_archive_from(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let bytes = fs::read(path.as_ref())?;
        self.import_archive(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ProjectBuilder;
    use tempfile::TempDir;

    fn archive_with(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            match content {
                None => writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .unwrap(),
                Some(bytes) => {
                    writer
                        .start_file(*name, SimpleFileOptions::default())
                        .unwrap();
                    writer.write_all(bytes).unwrap();
                }
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_export_import_round_trip() {
        let source = ProjectBuilder::with_default_project()
            .add_folder("empty")
            .build();
        let bytes = source.export_archive().unwrap();

        let mut target = ProjectFiles::new();
        target.import_archive(&bytes).unwrap();

        assert_eq!(
            target.get_all_files_as_object(),
            source.get_all_files_as_object()
        );
    }

    #[test]
    fn test_export_stored_compression() {
        let source = ProjectBuilder::new().add_file("a.txt", "aaaa").build();
        let options = ArchiveOptions::default().with_compression(CompressionMethod::Stored);
        let bytes = source.export_archive_with_options(options).unwrap();

        let snapshot = read_archive(&bytes).unwrap();
        assert_eq!(snapshot.get("a.txt"), Some(&Some("aaaa".to_string())));
    }

    #[test]
    fn test_export_folders_as_directory_entries() {
        let source = ProjectBuilder::new().add_file("docs/a.md", "a").build();
        let bytes = source.export_archive().unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let folder = archive.by_name("docs/").unwrap();
        assert!(folder.is_dir());
    }

    #[test]
    fn test_export_rejects_unimportable_paths() {
        let mut files = ProjectFiles::new();
        files.save_file("ok.txt", "fine");
        files.save_file("/abs.txt", "x");

        let error = files.export_archive().unwrap_err();
        assert!(matches!(
            error,
            FilesError::InvalidArchive { ref name, ref reason }
                if name == "/abs.txt" && reason == "absolute path"
        ));

        let mut files = ProjectFiles::new();
        files.save_file("src/../up.txt", "y");
        assert!(files.export_archive().unwrap_err().is_archive_error());
    }

    #[test]
    fn test_exported_archive_always_imports() {
        let source = ProjectBuilder::with_default_project()
            .add_file("a/b..c/d.txt", "dots are fine")
            .build();
        let bytes = source.export_archive().unwrap();

        let mut target = ProjectFiles::new();
        assert_eq!(target.import_archive(&bytes).unwrap(), source.store().len());
    }

    #[test]
    fn test_import_repairs_missing_folders() {
        let bytes = archive_with(&[("src/lib/util.js", Some(b"export {}".as_slice()))]);

        let mut files = ProjectFiles::new();
        let total = files.import_archive(&bytes).unwrap();

        assert_eq!(total, 3);
        assert!(files.is_folder("src/"));
        assert!(files.is_folder("src/lib/"));
        assert_eq!(files.read_file("src/lib/util.js"), Some("export {}"));
    }

    #[test]
    fn test_import_replaces_existing_tree() {
        let bytes = archive_with(&[("new.txt", Some(b"new".as_slice()))]);

        let mut files = ProjectBuilder::with_default_project().build();
        files.import_archive(&bytes).unwrap();

        assert_eq!(files.list_files(), vec!["new.txt"]);
    }

    #[test]
    fn test_import_rejects_parent_reference() {
        let bytes = archive_with(&[("../escape.txt", Some(b"x".as_slice()))]);

        let mut files = ProjectBuilder::with_default_project().build();
        let before = files.get_all_files_as_object();
        let error = files.import_archive(&bytes).unwrap_err();

        assert!(error.is_archive_error());
        assert_eq!(files.get_all_files_as_object(), before);
    }

    #[test]
    fn test_import_rejects_absolute_name() {
        assert!(validate_entry_name("/etc/passwd").is_err());
        assert!(validate_entry_name("").is_err());
        assert!(validate_entry_name("a\\b.txt").is_err());
        assert!(validate_entry_name("a/b..c.txt").is_ok());
    }

    #[test]
    fn test_import_rejects_binary_content() {
        let bytes = archive_with(&[("image.png", Some([0xff_u8, 0xfe, 0x00, 0x80].as_slice()))]);

        let error = read_archive(&bytes).unwrap_err();
        assert!(matches!(
            error,
            FilesError::InvalidArchive { ref name, ref reason }
                if name == "image.png" && reason == "content is not valid UTF-8"
        ));
    }

    #[test]
    fn test_import_rejects_garbage() {
        let error = read_archive(b"not a zip file").unwrap_err();
        assert!(error.is_archive_error());
    }

    #[test]
    fn test_import_archive_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("project.zip");
        let source = ProjectBuilder::new().add_file("main.js", "run()").build();
        fs::write(&archive_path, source.export_archive().unwrap()).unwrap();

        let mut files = ProjectFiles::new();
        files.import_archive_from(&archive_path).unwrap();

        assert_eq!(files.read_file("main.js"), Some("run()"));
    }

    #[test]
    fn test_import_archive_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut files = ProjectFiles::new();

        let error = files
            .import_archive_from(temp_dir.path().join("missing.zip"))
            .unwrap_err();
        assert!(matches!(error, FilesError::Io(_)));
    }

    #[test]
    fn test_empty_project_archive() {
        let bytes = ProjectFiles::new().export_archive().unwrap();
        assert!(read_archive(&bytes).unwrap().is_empty());
    }
}
