//! Parameter types for the project tools.
//!
//! Each type is the input schema of one tool. Schemas are derived with
//! `schemars` and published to the model; incoming arguments are decoded with
//! `serde` before the tool runs, so unknown fields, missing fields and wrong
//! types are rejected without touching the project.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// save_file
// ============================================================================

/// Parameters for saving a file.
///
/// # Examples
///
/// ```
/// use studio_server::types::SaveFileParams;
///
/// let params: SaveFileParams = serde_json::from_value(serde_json::json!({
///     "path": "src/components/button.js",
///     "content": "export const Button = () => null;",
/// }))
/// .unwrap();
///
/// assert_eq!(params.path, "src/components/button.js");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SaveFileParams {
    /// The path of the file to save. e.g., "src/components/button.js"
    pub path: String,

    /// The content to save to the file.
    pub content: String,
}

// ============================================================================
// read_file, create_folder, delete_file, delete_folder
// ============================================================================

/// Parameters for reading a file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ReadFileParams {
    /// The path of the file to read.
    pub path: String,
}

/// Parameters for creating a folder.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateFolderParams {
    /// The path of the folder to create. e.g., "src/new-folder/"
    pub path: String,
}

/// Parameters for deleting a file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeleteFileParams {
    /// The path of the file to delete. e.g., "src/components/button.js"
    pub path: String,
}

/// Parameters for deleting a folder.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeleteFolderParams {
    /// The path of the folder to delete. e.g., "src/old-folder/"
    pub path: String,
}
