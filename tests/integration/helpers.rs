//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const JAVA_NATURE: &str = "org.eclipse.jdt.core.javanature";

/// A throwaway Eclipse workspace
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create an empty workspace directory
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    // Projects are reported with canonical locations
    let path = root.path().canonicalize()?;
    Ok(Self { _root: root, path })
  }

  /// Add a project directory with a `.project` file and, for Java projects,
  /// a `.classpath` built from `entries` (`(kind, path)` pairs).
  pub fn add_project(&self, name: &str, java: bool, entries: &[(&str, &str)]) -> Result<PathBuf> {
    let project_path = self.path.join(name);
    std::fs::create_dir_all(&project_path)?;

    let natures = if java {
      format!("<nature>{}</nature>", JAVA_NATURE)
    } else {
      String::new()
    };
    std::fs::write(
      project_path.join(".project"),
      format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<projectDescription>
  <name>{}</name>
  <comment></comment>
  <projects></projects>
  <natures>{}</natures>
</projectDescription>
"#,
        name, natures
      ),
    )?;

    if java {
      let mut classpath = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<classpath>\n");
      for (kind, path) in entries {
        classpath.push_str(&format!("  <classpathentry kind=\"{}\" path=\"{}\"/>\n", kind, path));
      }
      classpath.push_str("</classpath>\n");
      std::fs::write(project_path.join(".classpath"), classpath)?;
    }

    Ok(project_path)
  }

  /// Write a file relative to the workspace root, creating parent dirs
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run sonar-jdt CLI command, failing on a non-zero exit
pub fn run_sonar_jdt(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = sonar_jdt_output(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "sonar-jdt command failed: sonar-jdt {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run sonar-jdt CLI command and return its output whatever the exit status
pub fn sonar_jdt_output(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_sonar-jdt");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run sonar-jdt")
}

/// Run a command with `--json` and parse stdout
pub fn run_json(cwd: &Path, args: &[&str]) -> Result<serde_json::Value> {
  let mut args = args.to_vec();
  args.push("--json");
  let output = run_sonar_jdt(cwd, &args)?;
  serde_json::from_slice(&output.stdout).context("sonar-jdt did not print valid JSON")
}

/// String values of a JSON array
pub fn strings(value: &serde_json::Value) -> Vec<String> {
  value
    .as_array()
    .map(|items| items.iter().filter_map(|v| v.as_str().map(String::from)).collect())
    .unwrap_or_default()
}

/// Path inside the workspace, as the CLI prints it
pub fn ws_path(workspace: &TestWorkspace, relative: &str) -> String {
  workspace.path.join(relative).display().to_string()
}
