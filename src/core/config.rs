use crate::core::error::{ConfigError, JdtError, JdtResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for sonar-jdt
/// Searched in order: sonar-jdt.toml, .sonar-jdt.toml, .config/sonar-jdt.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JdtConfig {
  #[serde(default)]
  pub java: JavaConfig,
  /// Classpath variables used to expand `kind="var"` entries (e.g. M2_REPO)
  #[serde(default)]
  pub variables: BTreeMap<String, PathBuf>,
  #[serde(default)]
  pub workspace: WorkspaceConfig,
  #[serde(default)]
  pub servers: Vec<ServerDescriptor>,
}

/// Workspace-wide compiler defaults, used when a project has no
/// `org.eclipse.jdt.core.prefs` override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JavaConfig {
  #[serde(default = "default_java_level")]
  pub source: String,
  #[serde(default = "default_java_level")]
  pub target: String,
}

fn default_java_level() -> String {
  "1.8".to_string()
}

impl Default for JavaConfig {
  fn default() -> Self {
    Self {
      source: default_java_level(),
      target: default_java_level(),
    }
  }
}

impl JavaConfig {
  /// Validate compiler levels ("1.8", "11", "17", ...)
  pub fn validate(&self) -> JdtResult<()> {
    for (field, value) in [("java.source", &self.source), ("java.target", &self.target)] {
      if !is_java_level(value) {
        return Err(JdtError::Config(ConfigError::InvalidValue {
          field: field.to_string(),
          value: value.clone(),
          expected: "a Java level such as '1.8' or '17'".to_string(),
        }));
      }
    }
    Ok(())
  }
}

fn is_java_level(value: &str) -> bool {
  let digits = value.strip_prefix("1.").unwrap_or(value);
  !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
  /// Extra project directories outside the workspace root (relative to the root)
  #[serde(default)]
  pub projects: Vec<PathBuf>,
}

/// A SonarQube server a project can be bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub url: Option<String>,
}

impl JdtConfig {
  /// Find config file in search order: sonar-jdt.toml, .sonar-jdt.toml, .config/sonar-jdt.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("sonar-jdt.toml"),
      path.join(".sonar-jdt.toml"),
      path.join(".config").join("sonar-jdt.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, or defaults when no config file exists
  pub fn load_or_default(path: &Path) -> JdtResult<Self> {
    match Self::find_config_path(path) {
      Some(config_path) => Self::load_from(&config_path),
      None => Ok(Self::default()),
    }
  }

  /// Load and validate a specific config file
  pub fn load_from(config_path: &Path) -> JdtResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: JdtConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate()?;
    Ok(config)
  }

  /// Save config to sonar-jdt.toml (default location)
  pub fn save(&self, path: &Path) -> JdtResult<()> {
    self.save_to(&path.join("sonar-jdt.toml"))
  }

  /// Save config to a specific file
  pub fn save_to(&self, config_path: &Path) -> JdtResult<()> {
    if let Some(parent) = config_path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  pub fn validate(&self) -> JdtResult<()> {
    self.java.validate()?;

    let mut seen = HashSet::new();
    for server in &self.servers {
      if server.id.trim().is_empty() {
        return Err(JdtError::Config(ConfigError::MissingField {
          field: format!("id for server '{}'", server.name),
        }));
      }
      if !seen.insert(server.id.as_str()) {
        return Err(JdtError::Config(ConfigError::DuplicateServer { id: server.id.clone() }));
      }
    }

    Ok(())
  }
}
