//! MCP server exposing the project tree to a language model.
//!
//! The `StudioService` provides six tools:
//! 1. `save_file` - Save or update a file, creating parent folders
//! 2. `read_file` - Read a file's content
//! 3. `list_files` - List every file and folder
//! 4. `create_folder` - Create a folder
//! 5. `delete_file` - Delete a single file
//! 6. `delete_folder` - Delete a folder and everything in it
//!
//! Arguments are decoded against each tool's schema before the handler runs.
//! A malformed call fails with `invalid_params` and never reaches the project.

use crate::actions::ProjectActions;
use crate::types::{
    CreateFolderParams, DeleteFileParams, DeleteFolderParams, ReadFileParams, SaveFileParams,
};
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{ErrorData as McpError, tool, tool_handler, tool_router};
use studio_files::FilesError;
use studio_files::types::{is_folder_path, unsafe_path_reason};
use tracing::{debug, info};

/// MCP server for AI-driven file operations.
///
/// Every tool call goes through the shared [`ProjectActions`], so the editor
/// sees model edits on its next listing.
///
/// # Examples
///
/// ```no_run
/// use studio_files::ProjectBuilder;
/// use studio_server::{ProjectActions, StudioService};
/// use rmcp::ServiceExt;
/// use rmcp::transport::stdio;
///
/// # async fn example() -> anyhow::Result<()> {
/// let actions = ProjectActions::new(ProjectBuilder::with_default_project().build());
/// let service = StudioService::new(actions).serve(stdio()).await?;
/// service.waiting().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StudioService {
    /// Project tree shared with the editor
    actions: ProjectActions,

    /// Tool router for MCP protocol
    tool_router: ToolRouter<Self>,
}

impl StudioService {
    /// Creates a service over the given project actions.
    #[must_use]
    pub fn new(actions: ProjectActions) -> Self {
        Self {
            actions,
            tool_router: Self::tool_router(),
        }
    }

    /// Returns the project actions backing the tools.
    #[must_use]
    pub const fn actions(&self) -> &ProjectActions {
        &self.actions
    }
}

impl Default for StudioService {
    fn default() -> Self {
        Self::new(ProjectActions::default())
    }
}

#[tool_router]
impl StudioService {
    /// Save or update a file.
    #[tool(
        description = "Saves or updates content to a file in the virtual file system. Creates parent directories if they do not exist."
    )]
    async fn save_file(
        &self,
        Parameters(params): Parameters<SaveFileParams>,
    ) -> Result<CallToolResult, McpError> {
        validate_file_path(&params.path)?;
        info!(path = %params.path, bytes = params.content.len(), "save_file");

        self.actions.save_file(&params.path, params.content).await;
        Ok(CallToolResult::success(Vec::new()))
    }

    /// Read a file.
    ///
    /// A missing file or a folder path is not a tool failure: the model
    /// receives the not-found message as the result text.
    #[tool(description = "Reads the content of a file from the virtual file system.")]
    async fn read_file(
        &self,
        Parameters(params): Parameters<ReadFileParams>,
    ) -> Result<CallToolResult, McpError> {
        validate_path(&params.path)?;
        debug!(path = %params.path, "read_file");

        let content = self.actions.read_file(&params.path).await;
        let text = content
            .unwrap_or_else(|| FilesError::FileNotFound { path: params.path }.to_string());
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// List all files and folders.
    #[tool(
        description = "Lists all the files and folders in the virtual file system. Folders will have a trailing slash."
    )]
    async fn list_files(&self) -> Result<CallToolResult, McpError> {
        let paths = self.actions.list_files().await;
        debug!(count = paths.len(), "list_files");

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&paths).map_err(|e| {
                McpError::internal_error(format!("Failed to serialize result: {e}"), None)
            })?,
        )]))
    }

    /// Create a folder.
    #[tool(
        description = "Creates a new folder in the virtual file system. The path should end with a forward slash."
    )]
    async fn create_folder(
        &self,
        Parameters(params): Parameters<CreateFolderParams>,
    ) -> Result<CallToolResult, McpError> {
        validate_path(&params.path)?;
        info!(path = %params.path, "create_folder");

        self.actions.create_folder(&params.path).await;
        Ok(CallToolResult::success(Vec::new()))
    }

    /// Delete a file.
    #[tool(description = "Deletes a file from the virtual file system.")]
    async fn delete_file(
        &self,
        Parameters(params): Parameters<DeleteFileParams>,
    ) -> Result<CallToolResult, McpError> {
        validate_file_path(&params.path)?;
        info!(path = %params.path, "delete_file");

        self.actions.delete_file(&params.path).await;
        Ok(CallToolResult::success(Vec::new()))
    }

    /// Delete a folder and its contents.
    ///
    /// A path without the trailing slash is treated as the folder it names.
    #[tool(
        description = "Deletes a folder and all of its contents from the virtual file system. The path should end with a forward slash."
    )]
    async fn delete_folder(
        &self,
        Parameters(params): Parameters<DeleteFolderParams>,
    ) -> Result<CallToolResult, McpError> {
        validate_path(&params.path)?;
        info!(path = %params.path, "delete_folder");

        self.actions.delete_folder(&params.path).await;
        Ok(CallToolResult::success(Vec::new()))
    }
}

#[tool_handler]
impl ServerHandler for StudioService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Manage the files of the project open in the code studio. \
                 Use list_files to see the tree (folders end with '/'), read_file \
                 before editing, and save_file to write changes."
                    .to_string(),
            ),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Rejects empty paths and paths that would not survive an archive round trip.
fn validate_path(path: &str) -> Result<(), McpError> {
    if path.trim().is_empty() {
        return Err(McpError::invalid_params("path must not be empty", None));
    }
    if let Some(reason) = unsafe_path_reason(path) {
        return Err(McpError::invalid_params(
            format!("'{path}' is not a valid project path: {reason}"),
            None,
        ));
    }
    Ok(())
}

/// Rejects paths that cannot name a file.
fn validate_file_path(path: &str) -> Result<(), McpError> {
    validate_path(path)?;
    if is_folder_path(path) {
        return Err(McpError::invalid_params(
            format!("'{path}' ends with '/' and names a folder, not a file"),
            None,
        ));
    }
    Ok(())
}
