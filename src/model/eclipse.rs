//! On-disk Eclipse workspace as a `BuildModel`
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   core/
//!     .project        <projectDescription><name>core</name><natures>...</natures>
//!     .classpath      <classpath><classpathentry kind="src" path="src"/>...
//!     .settings/org.eclipse.jdt.core.prefs
//!   web/
//!     ...
//! ```
//!
//! Projects are the direct children of the root that hold a `.project` file, plus
//! any extra directories listed under `[workspace] projects` in the config.
//!
//! `.classpath` is read on demand, so a broken file only affects the project that
//! owns it.

use super::prefs::Preferences;
use super::{BuildModel, ClasspathEntry, JavaProject, normalize, segments};
use crate::core::config::JdtConfig;
use crate::core::error::{JdtError, JdtResult, ModelError, ResultExt};
use roxmltree::{Document, Node};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub const PROJECT_FILE: &str = ".project";
pub const CLASSPATH_FILE: &str = ".classpath";
pub const JAVA_NATURE: &str = "org.eclipse.jdt.core.javanature";
pub const JDT_CORE_PREFS: &str = "org.eclipse.jdt.core.prefs";

/// Default output folder when `.classpath` declares none
const DEFAULT_OUTPUT: &str = "bin";

/// Eclipse workspace loaded from disk.
pub struct EclipseWorkspace {
  root: PathBuf,
  /// Sorted by name
  projects: Vec<JavaProject>,
  index: HashMap<String, usize>,
  /// Classpath variables (`kind="var"` entries)
  variables: BTreeMap<String, PathBuf>,
}

/// Parsed `.classpath` file
#[derive(Debug, Default)]
struct ClasspathFile {
  output: Option<PathBuf>,
  entries: Vec<ClasspathEntry>,
}

impl EclipseWorkspace {
  /// Discover the projects of a workspace.
  ///
  /// Unreadable `.project` files are logged and skipped; only a missing root is an error.
  pub fn load(root: &Path, config: &JdtConfig) -> JdtResult<Self> {
    if !root.is_dir() {
      return Err(JdtError::Model(ModelError::WorkspaceNotFound {
        root: root.to_path_buf(),
      }));
    }
    let root = root
      .canonicalize()
      .with_context(|| format!("Failed to resolve workspace root {}", root.display()))?;

    let mut candidates = Vec::new();
    let mut children: Vec<PathBuf> = fs::read_dir(&root)
      .with_context(|| format!("Failed to list workspace {}", root.display()))?
      .filter_map(|entry| entry.ok().map(|e| e.path()))
      .filter(|path| path.join(PROJECT_FILE).is_file())
      .collect();
    children.sort();
    candidates.extend(children);

    for extra in &config.workspace.projects {
      let dir = root.join(extra);
      if dir.join(PROJECT_FILE).is_file() {
        candidates.push(dir);
      } else {
        tracing::warn!("Configured project directory has no .project file: {}", dir.display());
      }
    }

    let mut projects: Vec<JavaProject> = Vec::new();
    let mut index = HashMap::new();

    for dir in candidates {
      let project = match read_project(&dir) {
        Ok(project) => project,
        Err(e) => {
          tracing::warn!("Skipping project at {}: {}", dir.display(), e);
          continue;
        }
      };
      if index.contains_key(&project.name) {
        tracing::warn!(
          "Duplicate project name '{}' at {}, keeping the first one",
          project.name,
          dir.display()
        );
        continue;
      }
      tracing::debug!("Found project {} at {}", project.name, project.location.display());
      index.insert(project.name.clone(), projects.len());
      projects.push(project);
    }

    // Keep the index valid after sorting
    projects.sort_by(|a, b| a.name.cmp(&b.name));
    let index = projects.iter().enumerate().map(|(i, p)| (p.name.clone(), i)).collect();

    Ok(Self {
      root,
      projects,
      index,
      variables: config.variables.clone(),
    })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// `None` when the project has no `.classpath` (not configured for Java yet).
  fn read_classpath_file(&self, project: &JavaProject) -> JdtResult<Option<ClasspathFile>> {
    let path = project.location.join(CLASSPATH_FILE);
    if !path.is_file() {
      return Ok(None);
    }
    let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_classpath(&content, project, &self.variables)
      .map(Some)
      .map_err(|reason| {
        JdtError::Model(ModelError::InvalidMetadata {
          path: path.clone(),
          reason,
        })
      })
  }
}

impl BuildModel for EclipseWorkspace {
  fn project(&self, name: &str) -> Option<&JavaProject> {
    self.index.get(name).map(|&i| &self.projects[i])
  }

  fn projects(&self) -> Vec<&JavaProject> {
    self.projects.iter().collect()
  }

  fn output_location(&self, project: &JavaProject) -> PathBuf {
    match self.read_classpath_file(project) {
      Ok(Some(ClasspathFile { output: Some(output), .. })) => output,
      _ => project.path.join(DEFAULT_OUTPUT),
    }
  }

  fn resolved_classpath(&self, project: &JavaProject) -> JdtResult<Vec<ClasspathEntry>> {
    let entries = self.read_classpath_file(project)?.map(|file| file.entries).unwrap_or_default();
    for entry in &entries {
      tracing::trace!("{}: {}", project.name, entry);
    }
    Ok(entries)
  }

  /// Looked up inside the project first, then as a workspace path `/<project>/...`.
  fn find_member(&self, project: &JavaProject, path: &Path) -> Option<PathBuf> {
    let path = &normalize(path);
    let parts = segments(path);
    if parts.is_empty() {
      return None;
    }

    let relative: PathBuf = parts.iter().collect();
    let in_project = project.location.join(&relative);
    if in_project.exists() {
      return Some(normalize(&in_project));
    }

    if !path.has_root() {
      return None;
    }
    let owner = self.project(parts[0].to_str()?)?;
    let in_workspace: PathBuf = std::iter::once(owner.location.as_os_str())
      .chain(parts[1..].iter().copied())
      .collect();
    in_workspace.exists().then(|| normalize(&in_workspace))
  }

  fn compiler_option(&self, project: &JavaProject, key: &str) -> Option<String> {
    let path = project.location.join(".settings").join(JDT_CORE_PREFS);
    match Preferences::load(&path) {
      Ok(prefs) => prefs.get(key).map(str::to_string),
      Err(e) => {
        tracing::warn!("Ignoring compiler settings of {}: {}", project.name, e);
        None
      }
    }
  }
}

fn read_project(dir: &Path) -> JdtResult<JavaProject> {
  let path = dir.join(PROJECT_FILE);
  let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
  let (name, java_nature) = parse_project_description(&content).map_err(|reason| {
    JdtError::Model(ModelError::InvalidMetadata {
      path: path.clone(),
      reason,
    })
  })?;
  let location = dir
    .canonicalize()
    .with_context(|| format!("Failed to resolve project directory {}", dir.display()))?;
  Ok(JavaProject::new(name, location, java_nature))
}

/// Name and Java nature from a `.project` file.
fn parse_project_description(xml: &str) -> Result<(String, bool), String> {
  let doc = Document::parse(xml).map_err(|e| e.to_string())?;
  let root = doc.root_element();
  if !root.has_tag_name("projectDescription") {
    return Err(format!("expected <projectDescription>, found <{}>", root.tag_name().name()));
  }

  let name = child_text(root, "name")
    .filter(|n| !n.is_empty())
    .ok_or_else(|| "missing <name>".to_string())?;

  let java_nature = root
    .children()
    .filter(|n| n.has_tag_name("natures"))
    .flat_map(|natures| natures.children().filter(|n| n.has_tag_name("nature")))
    .any(|nature| nature.text().map(str::trim) == Some(JAVA_NATURE));

  Ok((name, java_nature))
}

/// Entries and default output of a `.classpath` file, with paths resolved.
fn parse_classpath(
  xml: &str,
  project: &JavaProject,
  variables: &BTreeMap<String, PathBuf>,
) -> Result<ClasspathFile, String> {
  let doc = Document::parse(xml).map_err(|e| e.to_string())?;
  let root = doc.root_element();
  if !root.has_tag_name("classpath") {
    return Err(format!("expected <classpath>, found <{}>", root.tag_name().name()));
  }

  let mut file = ClasspathFile::default();

  for node in root.children().filter(|n| n.has_tag_name("classpathentry")) {
    let kind = node.attribute("kind").ok_or("classpathentry without kind")?;
    let raw = node
      .attribute("path")
      .ok_or_else(|| format!("classpathentry of kind '{}' without path", kind))?;

    match kind {
      "src" if raw.starts_with('/') => {
        let name = raw.trim_start_matches('/').split('/').next().unwrap_or_default();
        if name.is_empty() {
          return Err(format!("invalid project reference '{}'", raw));
        }
        file.entries.push(ClasspathEntry::Project { name: name.to_string() });
      }
      "src" => file.entries.push(ClasspathEntry::Source {
        path: project_path(project, raw),
        output: node.attribute("output").map(|o| project_path(project, o)),
      }),
      "lib" => file.entries.push(ClasspathEntry::Library {
        path: project_path(project, raw),
      }),
      "var" => file.entries.push(resolve_variable(raw, variables)),
      "output" => file.output = Some(project_path(project, raw)),
      other => file.entries.push(ClasspathEntry::Other {
        kind: other.to_string(),
        path: PathBuf::from(raw),
      }),
    }
  }

  Ok(file)
}

/// Relative paths in `.classpath` are relative to the project; rooted ones are kept.
fn project_path(project: &JavaProject, raw: &str) -> PathBuf {
  let path = Path::new(raw);
  if path.has_root() || path.is_absolute() {
    path.to_path_buf()
  } else {
    project.path.join(path)
  }
}

/// `M2_REPO/junit/junit.jar` → `<M2_REPO>/junit/junit.jar`, or `Other` when unbound.
fn resolve_variable(raw: &str, variables: &BTreeMap<String, PathBuf>) -> ClasspathEntry {
  let mut parts = raw.splitn(2, '/');
  let name = parts.next().unwrap_or_default();
  let rest = parts.next().unwrap_or_default();

  match variables.get(name) {
    Some(base) => ClasspathEntry::Library {
      path: if rest.is_empty() { base.clone() } else { base.join(rest) },
    },
    None => ClasspathEntry::Other {
      kind: "var".to_string(),
      path: PathBuf::from(raw),
    },
  }
}

fn child_text(node: Node, tag: &str) -> Option<String> {
  node
    .children()
    .find(|n| n.has_tag_name(tag))
    .and_then(|n| n.text())
    .map(|t| t.trim().to_string())
}
