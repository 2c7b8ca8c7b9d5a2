//! Build model: the project/classpath view the resolver walks
//!
//! - **eclipse**: `EclipseWorkspace`, a `BuildModel` read from `.project` / `.classpath` files
//! - **prefs**: Eclipse preference files (`.settings/*.prefs`, Java properties syntax)
//!
//! Paths inside the model are *workspace paths* (`/core/src`): the first segment is
//! the owning project's name. `JavaProject::absolute_path` maps them to disk.

pub mod eclipse;
pub mod prefs;

pub use eclipse::EclipseWorkspace;
pub use prefs::Preferences;

use crate::core::error::JdtResult;
use std::fmt;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

/// One entry of a project's resolved classpath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClasspathEntry {
  /// Source folder, optionally compiled into its own output folder
  Source { path: PathBuf, output: Option<PathBuf> },
  /// Jar or class folder, either a workspace path or an OS path
  Library { path: PathBuf },
  /// Reference to another project in the workspace
  Project { name: String },
  /// Anything the resolver does not know how to handle (containers, unbound variables)
  Other { kind: String, path: PathBuf },
}

impl fmt::Display for ClasspathEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ClasspathEntry::Source { path, output: Some(output) } => {
        write!(f, "src {} (output {})", path.display(), output.display())
      }
      ClasspathEntry::Source { path, output: None } => write!(f, "src {}", path.display()),
      ClasspathEntry::Library { path } => write!(f, "lib {}", path.display()),
      ClasspathEntry::Project { name } => write!(f, "project /{}", name),
      ClasspathEntry::Other { kind, path } => write!(f, "{} {}", kind, path.display()),
    }
  }
}

/// Read-only snapshot of a workspace project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaProject {
  pub name: String,
  /// Declared workspace path (`/<name>`)
  pub path: PathBuf,
  /// Base directory on disk
  pub location: PathBuf,
  pub java_nature: bool,
}

impl JavaProject {
  pub fn new(name: impl Into<String>, location: impl Into<PathBuf>, java_nature: bool) -> Self {
    let name = name.into();
    Self {
      path: Path::new(MAIN_SEPARATOR_STR).join(&name),
      name,
      location: location.into(),
      java_nature,
    }
  }

  /// Resolve a workspace path against this project's base directory.
  ///
  /// The path is made relative to the project's declared path and joined onto
  /// its location, so `/core/bin` in project `core` at `/ws/core` becomes
  /// `/ws/core/bin`. Paths that are not under `/<name>` climb out with `..`.
  pub fn absolute_path(&self, path: &Path) -> PathBuf {
    let relative = if path.has_root() {
      pathdiff::diff_paths(path, &self.path).unwrap_or_else(|| strip_root(path))
    } else {
      path.to_path_buf()
    };
    normalize(&self.location.join(relative))
  }
}

/// Project model the classpath resolver walks.
///
/// Implementations are read-only lookups; nothing here mutates the workspace.
pub trait BuildModel {
  /// Look a project up by name.
  fn project(&self, name: &str) -> Option<&JavaProject>;

  /// All projects, sorted by name.
  fn projects(&self) -> Vec<&JavaProject>;

  /// Default output folder of `project` as a workspace path.
  fn output_location(&self, project: &JavaProject) -> PathBuf;

  /// Classpath of `project` with variables and paths resolved.
  fn resolved_classpath(&self, project: &JavaProject) -> JdtResult<Vec<ClasspathEntry>>;

  /// Real on-disk location of a workspace resource, if it exists.
  fn find_member(&self, project: &JavaProject, path: &Path) -> Option<PathBuf>;

  /// Project-specific compiler option (`org.eclipse.jdt.core.compiler.*`).
  fn compiler_option(&self, _project: &JavaProject, _key: &str) -> Option<String> {
    None
  }
}

/// Names of all projects the model knows, sorted.
pub fn project_names<M: BuildModel + ?Sized>(model: &M) -> Vec<String> {
  model.projects().into_iter().map(|p| p.name.clone()).collect()
}

/// Make a path absolute the way a workspace path is: prefix the root when missing.
pub fn make_absolute(path: &Path) -> PathBuf {
  if path.has_root() || path.is_absolute() {
    normalize(path)
  } else {
    normalize(&Path::new(MAIN_SEPARATOR_STR).join(path))
  }
}

/// Lexical normalisation: drops `.` and folds `..` without touching the filesystem.
/// The path does not have to exist. `..` stops at the root; leading `..` of a
/// relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match out.components().next_back() {
        Some(Component::Normal(_)) => {
          out.pop();
        }
        Some(Component::RootDir | Component::Prefix(_)) => {}
        _ => out.push(component),
      },
      other => out.push(other),
    }
  }
  out
}

/// Normal (name) segments of a path.
pub fn segments(path: &Path) -> Vec<&std::ffi::OsStr> {
  path
    .components()
    .filter_map(|c| match c {
      Component::Normal(s) => Some(s),
      _ => None,
    })
    .collect()
}

fn strip_root(path: &Path) -> PathBuf {
  segments(path).into_iter().collect()
}
