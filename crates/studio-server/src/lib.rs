//! Code studio server.
//!
//! Puts the in-memory project tree from `studio-files` behind two surfaces:
//!
//! 1. **[`ProjectActions`]** - async facade the editor UI calls to list, read,
//!    save and delete paths, and to import or export the whole project
//! 2. **[`StudioService`]** - MCP server exposing the same tree to a language
//!    model as six tools: `save_file`, `read_file`, `list_files`,
//!    `create_folder`, `delete_file` and `delete_folder`
//!
//! Both surfaces share one [`SharedProject`], so an edit made by the model is
//! visible to the editor on its next listing and vice versa.
//!
//! # Examples
//!
//! ```no_run
//! use rmcp::ServiceExt;
//! use rmcp::transport::stdio;
//! use studio_server::{ProjectActions, StudioConfig, StudioService};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = StudioConfig::load(None)?;
//! let actions = ProjectActions::new(config.build_project()?);
//!
//! let service = StudioService::new(actions.clone()).serve(stdio()).await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod config;
pub mod service;
pub mod types;

pub use actions::{ProjectActions, SharedProject};
pub use config::StudioConfig;
pub use service::StudioService;
pub use types::{
    CreateFolderParams, DeleteFileParams, DeleteFolderParams, ReadFileParams, SaveFileParams,
};
