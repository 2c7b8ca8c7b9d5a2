//! `sonar-jdt classpath` - Show what the analyzer would see for a project
//!
//! Resolves the project's classpath (following project references) and prints
//! source dirs, binary dirs and libraries. Resolution problems are reported
//! but never fail the command.

use crate::classpath::{ClasspathResolver, ProjectDefinition, ResolveReport};
use crate::core::context::WorkspaceContext;
use crate::core::error::JdtResult;
use serde_json::json;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Run the classpath command
pub fn run_classpath(ctx: &WorkspaceContext, project_name: &str, json: bool) -> JdtResult<()> {
  let project = ctx.require_project(project_name)?;

  let mut definition = ProjectDefinition::new();
  let report = ClasspathResolver::new(ctx.model.as_ref()).resolve(project, &mut definition);

  if json {
    let output = json!({
      "project": project.name,
      "source_dirs": definition.source_dirs(),
      "binary_dirs": definition.binary_dirs(),
      "libraries": definition.libraries(),
      "projects": report.projects,
      "issues": report.issues,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    return Ok(());
  }

  println!("Classpath of {}", project.name);
  println!("==============={}", "=".repeat(project.name.len()));
  println!();
  print_section("Source directories", definition.source_dirs());
  print_section("Binary directories", definition.binary_dirs());
  print_section("Libraries", definition.libraries());
  print_report(&report);

  Ok(())
}

pub(crate) fn print_section(title: &str, paths: &BTreeSet<PathBuf>) {
  println!("{}: {}", title, paths.len());
  for path in paths {
    println!("  {}", path.display());
  }
  println!();
}

pub(crate) fn print_report(report: &ResolveReport) {
  println!("Projects walked: {}", report.projects.join(" -> "));
  if !report.is_clean() {
    println!();
    println!("Issues: {}", report.issues.len());
    for issue in &report.issues {
      println!("  warning: {}", issue);
    }
  }
}
