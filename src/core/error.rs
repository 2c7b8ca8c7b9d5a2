//! Error types for sonar-jdt with contextual messages and exit codes
//!
//! Application-level failures (bad configuration, unknown projects, unreadable
//! metadata) surface as `JdtError`. Classpath resolution problems are NOT errors
//! at this level: the resolver records them as `ResolveIssue`s and keeps going.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for sonar-jdt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unknown project)
  User = 1,
  /// System error (I/O, unreadable metadata)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for sonar-jdt
#[derive(Debug)]
pub enum JdtError {
  /// Configuration errors
  Config(ConfigError),

  /// Build model errors (workspace and project metadata)
  Model(ModelError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl JdtError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    JdtError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    JdtError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      JdtError::Message { message, context, help } => JdtError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      JdtError::Io(e) => JdtError::Message {
        message: format!("I/O error: {}", e),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      JdtError::Config(_) => ExitCode::User,
      JdtError::Model(ModelError::ProjectNotFound { .. }) => ExitCode::User,
      JdtError::Model(_) => ExitCode::System,
      JdtError::Io(_) => ExitCode::System,
      JdtError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      JdtError::Config(e) => e.help_message(),
      JdtError::Model(e) => e.help_message(),
      JdtError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for JdtError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      JdtError::Config(e) => write!(f, "{}", e),
      JdtError::Model(e) => write!(f, "{}", e),
      JdtError::Io(e) => write!(f, "I/O error: {}", e),
      JdtError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for JdtError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      JdtError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for JdtError {
  fn from(err: io::Error) -> Self {
    JdtError::Io(err)
  }
}

impl From<String> for JdtError {
  fn from(msg: String) -> Self {
    JdtError::message(msg)
  }
}

impl From<&str> for JdtError {
  fn from(msg: &str) -> Self {
    JdtError::message(msg)
  }
}

impl From<ConfigError> for JdtError {
  fn from(err: ConfigError) -> Self {
    JdtError::Config(err)
  }
}

impl From<ModelError> for JdtError {
  fn from(err: ModelError) -> Self {
    JdtError::Model(err)
  }
}

impl From<toml_edit::de::Error> for JdtError {
  fn from(err: toml_edit::de::Error) -> Self {
    JdtError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for JdtError {
  fn from(err: toml_edit::ser::Error) -> Self {
    JdtError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for JdtError {
  fn from(err: serde_json::Error) -> Self {
    JdtError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Field has a value we cannot use
  InvalidValue { field: String, value: String, expected: String },

  /// Two servers share the same id
  DuplicateServer { id: String },

  /// Missing required field
  MissingField { field: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::DuplicateServer { .. } => {
        Some("Each [[servers]] entry in sonar-jdt.toml needs a unique id.".to_string())
      }
      ConfigError::MissingField { field } => Some(format!("Add '{}' to sonar-jdt.toml.", field)),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidValue { field, value, expected } => {
        write!(f, "Invalid value '{}' for {}. Expected {}", value, field, expected)
      }
      ConfigError::DuplicateServer { id } => write!(f, "Server '{}' is defined more than once", id),
      ConfigError::MissingField { field } => write!(f, "Missing required field in config: {}", field),
    }
  }
}

/// Build model errors
#[derive(Debug)]
pub enum ModelError {
  /// Workspace root does not exist or is not a directory
  WorkspaceNotFound { root: PathBuf },

  /// No project with this name in the workspace
  ProjectNotFound { name: String, available: Vec<String> },

  /// A project metadata file could not be parsed
  InvalidMetadata { path: PathBuf, reason: String },
}

impl ModelError {
  fn help_message(&self) -> Option<String> {
    match self {
      ModelError::WorkspaceNotFound { .. } => {
        Some("Pass the Eclipse workspace directory with --workspace <dir>.".to_string())
      }
      ModelError::ProjectNotFound { available, .. } if available.is_empty() => Some(
        "No projects were found. Each project directory needs a .project file.".to_string(),
      ),
      ModelError::ProjectNotFound { .. } => Some("List workspace projects with `sonar-jdt projects`.".to_string()),
      ModelError::InvalidMetadata { .. } => None,
    }
  }
}

impl fmt::Display for ModelError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ModelError::WorkspaceNotFound { root } => {
        write!(f, "Workspace not found at: {}", root.display())
      }
      ModelError::ProjectNotFound { name, available } => {
        write!(f, "Project '{}' not found", name)?;
        if !available.is_empty() {
          write!(f, ". Available projects: {}", available.join(", "))?;
        }
        Ok(())
      }
      ModelError::InvalidMetadata { path, reason } => {
        write!(f, "Invalid project metadata in {}: {}", path.display(), reason)
      }
    }
  }
}

/// Result type alias for sonar-jdt
pub type JdtResult<T> = Result<T, JdtError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> JdtResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> JdtResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<JdtError>,
{
  fn context(self, ctx: impl Into<String>) -> JdtResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> JdtResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &JdtError) {
  eprintln!("\nerror: {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("help: {}\n", help);
  }
}
