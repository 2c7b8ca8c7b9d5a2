//! Tests for the `properties` command

use crate::helpers::*;
use anyhow::Result;

const SERVERS: &str = r#"[[servers]]
id = "local"
name = "Local SonarQube"
url = "http://localhost:9000"
"#;

#[test]
fn test_properties_unbound_project() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[])?;

  let output = run_json(&workspace.path, &["properties", "core"])?;

  assert_eq!(output["project"], "core");
  assert_eq!(output["auto_enabled"], true);
  assert_eq!(output["server_id"], "");
  assert_eq!(output["server_label"], "Unknown server: ''");
  assert_eq!(output["missing_server"], "Add SonarQube server ''");

  Ok(())
}

#[test]
fn test_properties_bound_to_known_server() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("sonar-jdt.toml", SERVERS)?;
  workspace.add_project("core", true, &[])?;
  workspace.write_file(
    "core/.settings/org.sonarlint.eclipse.prefs",
    "eclipse.preferences.version=1\nautoEnabled=false\nmoduleKey=org.example\\:core\nserverId=local\n",
  )?;

  let output = run_json(&workspace.path, &["properties", "core"])?;

  assert_eq!(output["auto_enabled"], false);
  assert_eq!(output["server_label"], "Local SonarQube");
  assert_eq!(output["module_key"], "org.example:core");
  assert!(output.get("missing_server").is_none());

  Ok(())
}

#[test]
fn test_properties_bound_to_unknown_server() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[])?;
  workspace.write_file(
    "core/.settings/org.sonarlint.eclipse.prefs",
    "serverId=remote\nmoduleKey=core\n",
  )?;

  let output = run_json(&workspace.path, &["properties", "core"])?;
  assert_eq!(output["server_label"], "Unknown server: 'remote'");
  assert_eq!(output["missing_server"], "Add SonarQube server 'remote'");

  let text = run_sonar_jdt(&workspace.path, &["properties", "core"])?;
  assert!(String::from_utf8_lossy(&text.stdout).contains("hint: Add SonarQube server 'remote'"));

  Ok(())
}

#[test]
fn test_properties_toggle_auto_run_persists() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[])?;
  workspace.write_file(
    "core/.settings/org.sonarlint.eclipse.prefs",
    "eclipse.preferences.version=1\nserverId=local\nextraSetting=kept\n",
  )?;

  run_sonar_jdt(&workspace.path, &["properties", "core", "--auto-run", "off"])?;

  let prefs = workspace.read_file("core/.settings/org.sonarlint.eclipse.prefs")?;
  assert!(prefs.contains("autoEnabled=false"));
  assert!(prefs.contains("serverId=local"));
  assert!(prefs.contains("extraSetting=kept"));

  let output = run_json(&workspace.path, &["properties", "core"])?;
  assert_eq!(output["auto_enabled"], false);

  run_sonar_jdt(&workspace.path, &["properties", "core", "--auto-run", "on"])?;
  let output = run_json(&workspace.path, &["properties", "core"])?;
  assert_eq!(output["auto_enabled"], true);

  Ok(())
}

#[test]
fn test_properties_creates_settings_dir() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[])?;

  run_sonar_jdt(&workspace.path, &["properties", "core", "--auto-run", "off"])?;

  assert!(workspace.file_exists("core/.settings/org.sonarlint.eclipse.prefs"));

  Ok(())
}

#[test]
fn test_properties_rejects_bad_switch() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_project("core", true, &[])?;

  let output = sonar_jdt_output(&workspace.path, &["properties", "core", "--auto-run", "sometimes"])?;

  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("possible values: on, off"));
  assert!(!workspace.file_exists("core/.settings/org.sonarlint.eclipse.prefs"));

  Ok(())
}
