//! Tests for the `classpath` command

use crate::helpers::*;
use anyhow::Result;

fn web_and_core() -> Result<TestWorkspace> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[("src", "src"), ("output", "bin")])?;
  workspace.add_project(
    "web",
    true,
    &[("src", "src"), ("src", "/core"), ("lib", "lib/servlet-api.jar"), ("output", "bin")],
  )?;
  workspace.write_file("web/lib/servlet-api.jar", "")?;
  Ok(workspace)
}

#[test]
fn test_classpath_includes_referenced_outputs_only() -> Result<()> {
  let workspace = web_and_core()?;

  let output = run_json(&workspace.path, &["classpath", "web"])?;

  assert_eq!(strings(&output["source_dirs"]), vec![ws_path(&workspace, "web/src")]);

  let binaries = strings(&output["binary_dirs"]);
  assert!(binaries.contains(&ws_path(&workspace, "web/bin")));
  assert!(binaries.contains(&ws_path(&workspace, "core/bin")));
  assert_eq!(binaries.len(), 2);

  assert_eq!(
    strings(&output["libraries"]),
    vec![ws_path(&workspace, "web/lib/servlet-api.jar")]
  );
  assert_eq!(strings(&output["projects"]), vec!["web", "core"]);
  assert!(output["issues"].as_array().is_some_and(|issues| issues.is_empty()));

  Ok(())
}

#[test]
fn test_classpath_source_output_folders() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[])?;
  workspace.write_file(
    "core/.classpath",
    r#"<?xml version="1.0" encoding="UTF-8"?>
<classpath>
  <classpathentry kind="src" path="src/main/java" output="target/classes"/>
  <classpathentry kind="src" path="src/test/java" output="target/test-classes"/>
  <classpathentry kind="output" path="bin"/>
</classpath>
"#,
  )?;

  let output = run_json(&workspace.path, &["classpath", "core"])?;

  let sources = strings(&output["source_dirs"]);
  assert_eq!(sources.len(), 2);
  assert!(sources.contains(&ws_path(&workspace, "core/src/main/java")));

  let binaries = strings(&output["binary_dirs"]);
  assert_eq!(binaries.len(), 3);
  assert!(binaries.contains(&ws_path(&workspace, "core/bin")));
  assert!(binaries.contains(&ws_path(&workspace, "core/target/classes")));
  assert!(binaries.contains(&ws_path(&workspace, "core/target/test-classes")));

  Ok(())
}

#[test]
fn test_classpath_terminates_on_reference_cycle() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("a", true, &[("src", "src"), ("src", "/b")])?;
  workspace.add_project("b", true, &[("src", "src"), ("src", "/a")])?;

  let output = run_json(&workspace.path, &["classpath", "a"])?;

  assert_eq!(strings(&output["projects"]), vec!["a", "b"]);
  assert_eq!(strings(&output["source_dirs"]), vec![ws_path(&workspace, "a/src")]);

  Ok(())
}

#[test]
fn test_classpath_reports_missing_project() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("web", true, &[("src", "src"), ("src", "/gone")])?;

  let output = run_json(&workspace.path, &["classpath", "web"])?;

  let issues = output["issues"].as_array().cloned().unwrap_or_default();
  assert_eq!(issues.len(), 1);
  assert_eq!(issues[0]["kind"], "missing_project");
  assert_eq!(issues[0]["name"], "gone");

  Ok(())
}

#[test]
fn test_classpath_skips_referenced_non_java_project() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("web", true, &[("src", "src"), ("src", "/docs")])?;
  workspace.add_project("docs", false, &[])?;

  let output = run_json(&workspace.path, &["classpath", "web"])?;

  assert_eq!(strings(&output["binary_dirs"]), vec![ws_path(&workspace, "web/bin")]);
  let issues = output["issues"].as_array().cloned().unwrap_or_default();
  assert_eq!(issues.len(), 1);
  assert_eq!(issues[0]["kind"], "not_java");
  assert_eq!(issues[0]["project"], "docs");

  Ok(())
}

#[test]
fn test_classpath_expands_variables() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("sonar-jdt.toml", "[variables]\nM2_REPO = \"/opt/m2\"\n")?;
  workspace.add_project(
    "core",
    true,
    &[
      ("var", "M2_REPO/junit/junit.jar"),
      ("var", "IVY_HOME/ivy.jar"),
      ("con", "org.eclipse.jdt.launching.JRE_CONTAINER"),
    ],
  )?;

  let output = run_json(&workspace.path, &["classpath", "core"])?;

  assert_eq!(strings(&output["libraries"]), vec!["/opt/m2/junit/junit.jar"]);

  let issues = output["issues"].as_array().cloned().unwrap_or_default();
  let kinds: Vec<_> = issues.iter().filter_map(|i| i["entry_kind"].as_str()).collect();
  assert_eq!(kinds, vec!["var", "con"]);

  Ok(())
}

#[test]
fn test_classpath_broken_file_is_reported() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[])?;
  workspace.write_file("core/.classpath", "<classpath><classpathentry")?;

  let output = run_json(&workspace.path, &["classpath", "core"])?;

  assert_eq!(strings(&output["binary_dirs"]), vec![ws_path(&workspace, "core/bin")]);
  let issues = output["issues"].as_array().cloned().unwrap_or_default();
  assert_eq!(issues.len(), 1);
  assert_eq!(issues[0]["kind"], "resolution");

  Ok(())
}

#[test]
fn test_classpath_unknown_project_fails() -> Result<()> {
  let workspace = web_and_core()?;

  let output = sonar_jdt_output(&workspace.path, &["classpath", "mobile"])?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Project 'mobile' not found"));
  assert!(stderr.contains("core, web"));

  Ok(())
}

#[test]
fn test_classpath_text_output() -> Result<()> {
  let workspace = web_and_core()?;

  let output = run_sonar_jdt(&workspace.path, &["classpath", "web"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Classpath of web"));
  assert!(stdout.contains("Source directories: 1"));
  assert!(stdout.contains("Binary directories: 2"));
  assert!(stdout.contains("Projects walked: web -> core"));

  Ok(())
}
