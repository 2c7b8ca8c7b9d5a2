//! Tests for the `projects` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_projects_lists_sorted_projects() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("web", true, &[])?;
  workspace.add_project("core", true, &[])?;
  workspace.add_project("docs", false, &[])?;
  std::fs::create_dir_all(workspace.path.join("not-a-project"))?;

  let output = run_json(&workspace.path, &["projects"])?;

  let projects = output.as_array().cloned().unwrap_or_default();
  let names: Vec<_> = projects.iter().filter_map(|p| p["name"].as_str()).collect();
  assert_eq!(names, vec!["core", "docs", "web"]);
  assert_eq!(projects[1]["java"], false);
  assert_eq!(projects[0]["location"], ws_path(&workspace, "core").as_str());

  Ok(())
}

#[test]
fn test_projects_name_comes_from_descriptor() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file(
    "checkout/.project",
    "<projectDescription><name>core</name><natures></natures></projectDescription>",
  )?;

  let output = run_json(&workspace.path, &["projects"])?;

  assert_eq!(output[0]["name"], "core");
  assert_eq!(output[0]["location"], ws_path(&workspace, "checkout").as_str());

  Ok(())
}

#[test]
fn test_projects_skips_broken_descriptor() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[])?;
  workspace.write_file("broken/.project", "<projectDescription>")?;

  let output = run_json(&workspace.path, &["projects"])?;

  assert_eq!(output.as_array().map(Vec::len), Some(1));

  Ok(())
}

#[test]
fn test_projects_extra_directories_from_config() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[])?;
  workspace.write_file(
    "modules/shared/.project",
    "<projectDescription><name>shared</name><natures></natures></projectDescription>",
  )?;
  workspace.write_file("sonar-jdt.toml", "[workspace]\nprojects = [\"modules/shared\"]\n")?;

  let output = run_json(&workspace.path, &["projects"])?;

  let names: Vec<_> = output
    .as_array()
    .map(|items| items.iter().filter_map(|p| p["name"].as_str()).collect())
    .unwrap_or_default();
  assert_eq!(names, vec!["core", "shared"]);

  Ok(())
}

#[test]
fn test_projects_workspace_option() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[])?;
  let elsewhere = tempfile::TempDir::new()?;
  let root = workspace.path.display().to_string();

  let output = run_sonar_jdt(elsewhere.path(), &["--workspace", &root, "projects"])?;

  assert!(String::from_utf8_lossy(&output.stdout).contains("Projects: 1"));

  Ok(())
}

#[test]
fn test_projects_missing_workspace_fails() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  let missing = temp.path().join("nowhere").display().to_string();

  let output = sonar_jdt_output(temp.path(), &["--workspace", &missing, "projects"])?;

  assert!(!output.status.success());

  Ok(())
}
