//! Per-project server binding
//!
//! Stored in `<project>/.settings/org.sonarlint.eclipse.prefs`:
//!
//! ```text
//! eclipse.preferences.version=1
//! autoEnabled=true
//! moduleKey=org.example:core
//! serverId=local
//! ```
//!
//! Unknown keys in the file are preserved when the binding is saved.

use super::servers::ServerLookup;
use crate::core::error::JdtResult;
use crate::model::{JavaProject, Preferences};
use serde::Serialize;
use std::path::PathBuf;

pub const BINDING_PREFS: &str = "org.sonarlint.eclipse.prefs";
pub const SERVER_ID_KEY: &str = "serverId";
pub const MODULE_KEY_KEY: &str = "moduleKey";
pub const AUTO_ENABLED_KEY: &str = "autoEnabled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBinding {
  pub server_id: String,
  pub module_key: String,
  /// Run the analyzer automatically on changes
  pub auto_enabled: bool,
  prefs: Preferences,
}

impl Default for ProjectBinding {
  fn default() -> Self {
    Self {
      server_id: String::new(),
      module_key: String::new(),
      auto_enabled: true,
      prefs: Preferences::default(),
    }
  }
}

impl ProjectBinding {
  pub fn prefs_path(project: &JavaProject) -> PathBuf {
    project.location.join(".settings").join(BINDING_PREFS)
  }

  /// Load the binding; a project without a prefs file is unbound with auto-run on.
  pub fn load(project: &JavaProject) -> JdtResult<Self> {
    let prefs = Preferences::load(&Self::prefs_path(project))?;
    Ok(Self {
      server_id: prefs.get(SERVER_ID_KEY).unwrap_or_default().to_string(),
      module_key: prefs.get(MODULE_KEY_KEY).unwrap_or_default().to_string(),
      auto_enabled: prefs.get_bool(AUTO_ENABLED_KEY).unwrap_or(true),
      prefs,
    })
  }

  pub fn save(&mut self, project: &JavaProject) -> JdtResult<()> {
    self.prefs.set(SERVER_ID_KEY, self.server_id.clone());
    self.prefs.set(MODULE_KEY_KEY, self.module_key.clone());
    self.prefs.set(AUTO_ENABLED_KEY, self.auto_enabled.to_string());
    self.prefs.save(&Self::prefs_path(project))
  }

  pub fn set_auto_enabled(&mut self, enabled: bool) {
    self.auto_enabled = enabled;
  }
}

/// What the project property page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertiesView {
  pub project: String,
  pub auto_enabled: bool,
  pub server_id: String,
  /// Server name, or `Unknown server: '<id>'`
  pub server_label: String,
  pub module_key: String,
  /// Offer to register the server whenever it is not in the registry
  #[serde(skip_serializing_if = "Option::is_none")]
  pub missing_server: Option<String>,
}

impl PropertiesView {
  pub fn build(project: &JavaProject, binding: &ProjectBinding, servers: &dyn ServerLookup) -> Self {
    let server = servers.server(&binding.server_id);
    let server_label = match server {
      Some(server) => server.name.clone(),
      None => format!("Unknown server: '{}'", binding.server_id),
    };
    let missing_server = server
      .is_none()
      .then(|| format!("Add SonarQube server '{}'", binding.server_id));

    Self {
      project: project.name.clone(),
      auto_enabled: binding.auto_enabled,
      server_id: binding.server_id.clone(),
      server_label,
      module_key: binding.module_key.clone(),
      missing_server,
    }
  }
}
