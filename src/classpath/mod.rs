//! Classpath extraction for the analyzer
//!
//! - **resolver**: walks a project's classpath (and referenced projects) into a sink
//! - **sink**: `AnalysisSink` trait and the `ProjectDefinition` it fills
//! - **configurator**: Java language properties + classpath for one project

pub mod configurator;
pub mod resolver;
pub mod sink;

pub use configurator::JavaProjectConfigurator;
pub use resolver::{ClasspathResolver, ResolveReport};
pub use sink::ProjectDefinition;
