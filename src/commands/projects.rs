//! `sonar-jdt projects` - List the projects of the workspace

use crate::core::context::WorkspaceContext;
use crate::core::error::JdtResult;
use crate::model::BuildModel;
use serde_json::json;

/// Run the projects command
pub fn run_projects(ctx: &WorkspaceContext, json: bool) -> JdtResult<()> {
  let projects = ctx.model.projects();

  if json {
    let output: Vec<_> = projects
      .iter()
      .map(|p| {
        json!({
          "name": p.name,
          "location": p.location,
          "java": p.java_nature,
        })
      })
      .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    return Ok(());
  }

  println!("Workspace: {}", ctx.workspace_root().display());
  println!("Projects: {}", projects.len());
  for project in projects {
    let nature = if project.java_nature { "java" } else { "-" };
    println!("  {:<5} {:<24} {}", nature, project.name, project.location.display());
  }

  Ok(())
}
