//! `sonar-jdt init` - Write a starter sonar-jdt.toml

use crate::core::config::JdtConfig;
use crate::core::error::{JdtError, JdtResult};
use std::path::Path;

/// Run the init command
///
/// With `--force` an existing config is overwritten where it was found, so a
/// `.config/sonar-jdt.toml` is never shadowed by a new root file.
pub fn run_init(workspace_root: &Path, force: bool) -> JdtResult<()> {
  let existing = JdtConfig::find_config_path(workspace_root);
  if let Some(existing) = &existing
    && !force
  {
    return Err(JdtError::with_help(
      format!("Configuration already exists at {}", existing.display()),
      "Pass --force to overwrite it",
    ));
  }

  let config = JdtConfig::default();
  let written = match existing {
    Some(path) => {
      config.save_to(&path)?;
      path
    }
    None => {
      config.save(workspace_root)?;
      workspace_root.join("sonar-jdt.toml")
    }
  };
  println!("Wrote {}", written.display());

  Ok(())
}
