//! CLI commands for sonar-jdt
//!
//! - **init**: Write a starter sonar-jdt.toml
//! - **projects**: List workspace projects
//! - **classpath**: Resolved source/binary/library paths of a project
//! - **configure**: Full analysis properties of a project
//! - **properties**: Show or update a project's server binding
//! - **graph**: Project references and cycles
//!
//! All commands except init accept `&WorkspaceContext` to avoid redundant workspace loads.

pub mod classpath;
pub mod configure;
pub mod graph;
pub mod init;
pub mod projects;
pub mod properties;

pub use classpath::run_classpath;
pub use configure::run_configure;
pub use graph::run_graph;
pub use init::run_init;
pub use projects::run_projects;
pub use properties::run_properties;
