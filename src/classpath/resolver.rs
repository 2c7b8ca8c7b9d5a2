//! Classpath resolution: flatten a project's classpath into an analysis sink
//!
//! # Algorithm
//!
//! 1. Skip projects without the Java nature, they have no output folder or classpath
//! 2. Add the project's default output folder as a binary dir
//! 3. Walk its resolved classpath:
//!    - source folder: source dir (top-level project only) + its output folder, if any
//!    - library: real location of the workspace member, else the declared path made absolute
//!    - project reference: queue the referenced project with source dirs disabled
//!    - anything else: warn and skip
//! 4. Repeat for queued projects until the worklist is empty
//!
//! The walk is an explicit worklist with a visited set, so reference cycles
//! terminate and each project contributes once. Source dirs are suppressed at
//! every depth below the top-level project.
//!
//! Nothing here returns an error: problems are logged and collected in the
//! `ResolveReport`, and the sink keeps whatever was added before them.

use super::sink::AnalysisSink;
use crate::model::{BuildModel, ClasspathEntry, JavaProject, make_absolute};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// A non-fatal problem met during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveIssue {
  /// The build model could not produce the project's classpath; its walk stopped there
  Resolution { project: String, message: String },
  /// Entry kind the resolver does not handle; the entry was skipped
  UnhandledEntry { project: String, entry_kind: String, path: PathBuf },
  /// Project reference to a project the model does not know
  MissingProject { from: String, name: String },
  /// Project without the Java nature; it contributed nothing
  NotJava { project: String },
}

impl fmt::Display for ResolveIssue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ResolveIssue::Resolution { project, message } => {
        write!(f, "{}: classpath could not be resolved: {}", project, message)
      }
      ResolveIssue::UnhandledEntry {
        project,
        entry_kind,
        path,
      } => write!(
        f,
        "{}: unhandled classpath entry '{}' ({})",
        project,
        entry_kind,
        path.display()
      ),
      ResolveIssue::MissingProject { from, name } => {
        write!(f, "{}: referenced project '{}' not found", from, name)
      }
      ResolveIssue::NotJava { project } => write!(f, "{}: not a Java project, skipped", project),
    }
  }
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveReport {
  /// Projects walked, in visiting order (top-level project first)
  pub projects: Vec<String>,
  pub issues: Vec<ResolveIssue>,
}

impl ResolveReport {
  pub fn is_clean(&self) -> bool {
    self.issues.is_empty()
  }
}

/// Walks classpaths through an injected `BuildModel`.
pub struct ClasspathResolver<'a, M: BuildModel + ?Sized> {
  model: &'a M,
}

impl<'a, M: BuildModel + ?Sized> ClasspathResolver<'a, M> {
  pub fn new(model: &'a M) -> Self {
    Self { model }
  }

  /// Resolve `project` and everything it references into `sink`.
  pub fn resolve(&self, project: &JavaProject, sink: &mut dyn AnalysisSink) -> ResolveReport {
    let mut report = ResolveReport::default();
    let mut visited: HashSet<String> = HashSet::new();
    let mut worklist: Vec<(&JavaProject, bool)> = vec![(project, true)];
    visited.insert(project.name.clone());

    while let Some((current, include_source_dirs)) = worklist.pop() {
      report.projects.push(current.name.clone());
      let references = self.add_project(current, include_source_dirs, sink, &mut report);

      // Reversed so that pops follow declaration order
      for name in references.into_iter().rev() {
        if visited.contains(&name) {
          tracing::debug!("Project {} already on the classpath, skipping", name);
          continue;
        }
        match self.model.project(&name) {
          Some(referenced) => {
            tracing::debug!("Adding project: {}", referenced.name);
            visited.insert(name);
            worklist.push((referenced, false));
          }
          None => {
            tracing::warn!("Referenced project '{}' not found in workspace", name);
            report.issues.push(ResolveIssue::MissingProject {
              from: current.name.clone(),
              name,
            });
          }
        }
      }
    }

    report
  }

  /// Add one project's own contributions; returns the projects it references.
  fn add_project(
    &self,
    project: &JavaProject,
    include_source_dirs: bool,
    sink: &mut dyn AnalysisSink,
    report: &mut ResolveReport,
  ) -> Vec<String> {
    if !project.java_nature {
      tracing::warn!("{} is not a Java project, skipping", project.name);
      report.issues.push(ResolveIssue::NotJava {
        project: project.name.clone(),
      });
      return Vec::new();
    }

    let default_bin_dir = project.absolute_path(&self.model.output_location(project));
    tracing::debug!("Default binary directory: {}", default_bin_dir.display());
    sink.add_binary_dir(default_bin_dir);

    let entries = match self.model.resolved_classpath(project) {
      Ok(entries) => entries,
      Err(e) => {
        tracing::error!("Failed to resolve classpath of {}: {}", project.name, e);
        report.issues.push(ResolveIssue::Resolution {
          project: project.name.clone(),
          message: e.to_string(),
        });
        return Vec::new();
      }
    };

    let mut references = Vec::new();

    for entry in entries {
      match entry {
        ClasspathEntry::Source { path, output } => {
          if include_source_dirs {
            let src_dir = project.absolute_path(&path);
            tracing::debug!("Source directory: {}", src_dir.display());
            sink.add_source_dir(src_dir);
          }
          if let Some(output) = output {
            let bin_dir = project.absolute_path(&output);
            tracing::debug!("Binary directory: {}", bin_dir.display());
            sink.add_binary_dir(bin_dir);
          }
        }
        ClasspathEntry::Library { path } => {
          let library = self.resolve_library(project, &path);
          tracing::debug!("Library: {}", library.display());
          sink.add_library(library);
        }
        ClasspathEntry::Project { name } => references.push(name),
        ClasspathEntry::Other { kind, path } => {
          tracing::warn!("Unhandled classpath entry in {}: {} {}", project.name, kind, path.display());
          report.issues.push(ResolveIssue::UnhandledEntry {
            project: project.name.clone(),
            entry_kind: kind,
            path,
          });
        }
      }
    }

    references
  }

  /// Workspace member location when the library lives in the workspace,
  /// otherwise the declared path itself.
  fn resolve_library(&self, project: &JavaProject, path: &Path) -> PathBuf {
    match self.model.find_member(project, path) {
      Some(location) => {
        tracing::debug!("Found member: {}", location.display());
        location
      }
      None => make_absolute(path),
    }
  }
}
