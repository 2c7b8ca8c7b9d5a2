//! Java project configuration: language properties + classpath
//!
//! Compiler levels come from the project's `org.eclipse.jdt.core.prefs` and fall
//! back to the workspace defaults from `sonar-jdt.toml`.

use super::resolver::{ClasspathResolver, ResolveReport};
use super::sink::{JAVA_SOURCE_PROPERTY, JAVA_TARGET_PROPERTY, LANGUAGE_PROPERTY, ProjectDefinition};
use crate::core::config::JavaConfig;
use crate::model::{BuildModel, JavaProject};

pub const COMPILER_SOURCE: &str = "org.eclipse.jdt.core.compiler.source";
pub const COMPILER_TARGET: &str = "org.eclipse.jdt.core.compiler.codegen.targetPlatform";
pub const JAVA_LANGUAGE: &str = "java";

/// Configures analysis definitions for Java projects.
pub struct JavaProjectConfigurator<'a, M: BuildModel + ?Sized> {
  model: &'a M,
  defaults: &'a JavaConfig,
}

impl<'a, M: BuildModel + ?Sized> JavaProjectConfigurator<'a, M> {
  pub fn new(model: &'a M, defaults: &'a JavaConfig) -> Self {
    Self { model, defaults }
  }

  /// Fill `definition` for `project`. Returns `None` for non-Java projects,
  /// which are left untouched.
  pub fn configure(&self, project: &JavaProject, definition: &mut ProjectDefinition) -> Option<ResolveReport> {
    if !project.java_nature {
      tracing::info!("{} is not a Java project, skipping", project.name);
      return None;
    }

    let java_source = self
      .model
      .compiler_option(project, COMPILER_SOURCE)
      .unwrap_or_else(|| self.defaults.source.clone());
    let java_target = self
      .model
      .compiler_option(project, COMPILER_TARGET)
      .unwrap_or_else(|| self.defaults.target.clone());

    definition.set_property(LANGUAGE_PROPERTY, JAVA_LANGUAGE);
    tracing::info!("Source Java version: {}", java_source);
    definition.set_property(JAVA_SOURCE_PROPERTY, java_source);
    tracing::info!("Target Java version: {}", java_target);
    definition.set_property(JAVA_TARGET_PROPERTY, java_target);

    Some(ClasspathResolver::new(self.model).resolve(project, definition))
  }
}
