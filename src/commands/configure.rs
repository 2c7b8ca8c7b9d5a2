//! `sonar-jdt configure` - Build the full analysis definition for a project
//!
//! Java language properties plus the resolved classpath, rendered as the flat
//! property list the analyzer consumes.

use super::classpath::print_report;
use crate::classpath::sink::{JAVA_SOURCE_PROPERTY, JAVA_TARGET_PROPERTY};
use crate::classpath::{JavaProjectConfigurator, ProjectDefinition};
use crate::core::context::WorkspaceContext;
use crate::core::error::JdtResult;
use serde_json::json;

/// Run the configure command
pub fn run_configure(ctx: &WorkspaceContext, project_name: &str, json: bool) -> JdtResult<()> {
  let project = ctx.require_project(project_name)?;

  let mut definition = ProjectDefinition::new();
  let report = JavaProjectConfigurator::new(ctx.model.as_ref(), &ctx.config.java).configure(project, &mut definition);
  let properties = definition.to_properties();

  if json {
    let output = json!({
      "project": project.name,
      "java": report.is_some(),
      "properties": properties,
      "issues": report.map(|r| r.issues).unwrap_or_default(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    return Ok(());
  }

  let Some(report) = report else {
    println!("{} is not a Java project; nothing to configure", project.name);
    return Ok(());
  };

  println!(
    "{}: Java source {}, target {}",
    project.name,
    definition.property(JAVA_SOURCE_PROPERTY).unwrap_or("-"),
    definition.property(JAVA_TARGET_PROPERTY).unwrap_or("-")
  );
  println!();
  for (key, value) in &properties {
    println!("{}={}", key, value);
  }
  println!();
  print_report(&report);

  Ok(())
}
