//! Unified workspace context - build once, pass everywhere
//!
//! # Architecture
//!
//! ```text
//! main.rs:
//!   WorkspaceContext::build() -> &WorkspaceContext
//!   |
//!   v
//! commands/classpath.rs, configure.rs, etc:
//!   fn run_*(ctx: &WorkspaceContext, ...)
//! ```

use crate::core::config::JdtConfig;
use crate::core::error::{JdtError, JdtResult, ModelError};
use crate::model::{BuildModel, EclipseWorkspace, JavaProject, project_names};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Workspace-level data shared by all commands.
#[derive(Clone)]
pub struct WorkspaceContext {
  /// Workspace root directory (absolute path)
  pub root: PathBuf,

  /// sonar-jdt.toml, or defaults when absent
  pub config: Arc<JdtConfig>,

  /// Eclipse projects of the workspace
  pub model: Arc<EclipseWorkspace>,
}

impl WorkspaceContext {
  /// Load config, then discover the workspace's projects.
  pub fn build(workspace_root: &Path) -> JdtResult<Self> {
    let config = Arc::new(JdtConfig::load_or_default(workspace_root)?);
    let model = Arc::new(EclipseWorkspace::load(workspace_root, &config)?);

    Ok(Self {
      root: model.root().to_path_buf(),
      config,
      model,
    })
  }

  /// Look a project up by name or fail with the list of known projects.
  pub fn require_project(&self, name: &str) -> JdtResult<&JavaProject> {
    self.model.project(name).ok_or_else(|| {
      JdtError::Model(ModelError::ProjectNotFound {
        name: name.to_string(),
        available: project_names(self.model.as_ref()),
      })
    })
  }

  /// Get workspace root as Path reference (convenience)
  pub fn workspace_root(&self) -> &Path {
    &self.root
  }
}
