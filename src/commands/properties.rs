//! `sonar-jdt properties` - Show or update a project's server binding
//!
//! Without `--auto-run` this prints the binding (server, module key, automatic
//! analysis flag). With `--auto-run on|off` the flag is written back to the
//! project's `.settings/org.sonarlint.eclipse.prefs`.

use crate::core::context::WorkspaceContext;
use crate::core::error::JdtResult;
use crate::settings::{ProjectBinding, PropertiesView};
use clap::ValueEnum;

/// Value of `--auto-run`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
  On,
  Off,
}

impl Switch {
  pub fn enabled(self) -> bool {
    self == Switch::On
  }
}

/// Run the properties command
pub fn run_properties(
  ctx: &WorkspaceContext,
  project_name: &str,
  auto_run: Option<Switch>,
  json: bool,
) -> JdtResult<()> {
  let project = ctx.require_project(project_name)?;
  let mut binding = ProjectBinding::load(project)?;

  if let Some(switch) = auto_run {
    binding.set_auto_enabled(switch.enabled());
    binding.save(project)?;
    tracing::info!("Automatic analysis for {} set to {}", project.name, switch.enabled());
  }

  let view = PropertiesView::build(project, &binding, ctx.config.as_ref());

  if json {
    println!("{}", serde_json::to_string_pretty(&view)?);
    return Ok(());
  }

  println!("Project: {}", view.project);
  println!("Run analysis automatically: {}", if view.auto_enabled { "yes" } else { "no" });
  println!("Server: {}", view.server_label);
  println!("Module key: {}", view.module_key);
  if let Some(hint) = &view.missing_server {
    println!();
    println!("hint: {} to sonar-jdt.toml under [[servers]]", hint);
  }

  Ok(())
}
