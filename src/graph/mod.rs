//! Graph-aware workspace analysis
//!
//! Built on the build model + petgraph: project references as a digraph.

pub mod project_graph;

pub use project_graph::ProjectGraph;
