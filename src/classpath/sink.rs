//! Analysis sink: where resolved classpath paths end up

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub const LANGUAGE_PROPERTY: &str = "sonar.language";
pub const JAVA_SOURCE_PROPERTY: &str = "sonar.java.source";
pub const JAVA_TARGET_PROPERTY: &str = "sonar.java.target";
pub const SOURCES_PROPERTY: &str = "sonar.sources";
pub const BINARIES_PROPERTY: &str = "sonar.binaries";
pub const LIBRARIES_PROPERTY: &str = "sonar.libraries";

/// Destination of a classpath walk. Every method is idempotent.
pub trait AnalysisSink {
  fn add_source_dir(&mut self, path: PathBuf);
  fn add_binary_dir(&mut self, path: PathBuf);
  fn add_library(&mut self, path: PathBuf);
}

/// Analysis project definition: the three path sets plus string properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectDefinition {
  source_dirs: BTreeSet<PathBuf>,
  binary_dirs: BTreeSet<PathBuf>,
  libraries: BTreeSet<PathBuf>,
  properties: BTreeMap<String, String>,
}

impl ProjectDefinition {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn source_dirs(&self) -> &BTreeSet<PathBuf> {
    &self.source_dirs
  }

  pub fn binary_dirs(&self) -> &BTreeSet<PathBuf> {
    &self.binary_dirs
  }

  pub fn libraries(&self) -> &BTreeSet<PathBuf> {
    &self.libraries
  }

  pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.properties.insert(key.into(), value.into());
  }

  pub fn property(&self, key: &str) -> Option<&str> {
    self.properties.get(key).map(String::as_str)
  }

  /// Flat property view handed to the analyzer; path sets are comma-joined.
  pub fn to_properties(&self) -> BTreeMap<String, String> {
    let mut properties = self.properties.clone();
    properties.insert(SOURCES_PROPERTY.to_string(), join_paths(&self.source_dirs));
    properties.insert(BINARIES_PROPERTY.to_string(), join_paths(&self.binary_dirs));
    properties.insert(LIBRARIES_PROPERTY.to_string(), join_paths(&self.libraries));
    properties
  }
}

impl AnalysisSink for ProjectDefinition {
  fn add_source_dir(&mut self, path: PathBuf) {
    self.source_dirs.insert(path);
  }

  fn add_binary_dir(&mut self, path: PathBuf) {
    self.binary_dirs.insert(path);
  }

  fn add_library(&mut self, path: PathBuf) {
    self.libraries.insert(path);
  }
}

fn join_paths(paths: &BTreeSet<PathBuf>) -> String {
  paths
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(",")
}
