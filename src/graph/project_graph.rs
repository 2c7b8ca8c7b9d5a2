//! Project reference graph built from the build model + petgraph
//!
//! ## Graph Structure
//!
//! - **Directed Graph**: `A → B` means "A's classpath references project B"
//! - **Nodes**: workspace projects
//! - **Index**: project name → node
//! - **Algorithms**: reachability (DFS), SCC for reference cycles
//!
//! The resolver does its own cycle-safe walk; this graph exists for reporting.

use crate::model::{BuildModel, ClasspathEntry};
use petgraph::Direction;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct ProjectNode {
  pub name: String,
  pub java_nature: bool,
}

pub struct ProjectGraph {
  graph: DiGraph<ProjectNode, ()>,
  name_to_node: HashMap<String, NodeIndex>,
  /// References to projects the model does not know: (from, to)
  dangling: Vec<(String, String)>,
}

impl ProjectGraph {
  /// Build the graph from every project's classpath.
  ///
  /// Projects whose classpath cannot be read get a node and no edges.
  pub fn build<M: BuildModel + ?Sized>(model: &M) -> Self {
    let mut graph = DiGraph::new();
    let mut name_to_node = HashMap::new();

    for project in model.projects() {
      let idx = graph.add_node(ProjectNode {
        name: project.name.clone(),
        java_nature: project.java_nature,
      });
      name_to_node.insert(project.name.clone(), idx);
    }

    let mut dangling = Vec::new();

    for project in model.projects() {
      let from_idx = name_to_node[&project.name];
      let entries = match model.resolved_classpath(project) {
        Ok(entries) => entries,
        Err(e) => {
          tracing::warn!("Skipping references of {}: {}", project.name, e);
          continue;
        }
      };

      for entry in entries {
        if let ClasspathEntry::Project { name } = entry {
          match name_to_node.get(&name) {
            Some(to_idx) => {
              graph.update_edge(from_idx, *to_idx, ());
            }
            None => dangling.push((project.name.clone(), name)),
          }
        }
      }
    }

    Self {
      graph,
      name_to_node,
      dangling,
    }
  }

  /// Direct references of a project, sorted.
  pub fn direct_references(&self, name: &str) -> Vec<String> {
    let Some(&idx) = self.name_to_node.get(name) else {
      return Vec::new();
    };
    let mut refs: Vec<String> = self
      .graph
      .neighbors_directed(idx, Direction::Outgoing)
      .map(|n| self.graph[n].name.clone())
      .collect();
    refs.sort();
    refs
  }

  /// Every project reachable from `name` (excluding itself unless it is on a cycle), sorted.
  pub fn references(&self, name: &str) -> Vec<String> {
    let Some(&start) = self.name_to_node.get(name) else {
      return Vec::new();
    };

    let mut visited = HashSet::new();
    let mut stack: Vec<NodeIndex> = self.graph.neighbors_directed(start, Direction::Outgoing).collect();
    let mut reached = Vec::new();

    while let Some(idx) = stack.pop() {
      if !visited.insert(idx) {
        continue;
      }
      reached.push(self.graph[idx].name.clone());
      stack.extend(self.graph.neighbors_directed(idx, Direction::Outgoing));
    }

    reached.sort();
    reached
  }

  /// Reference cycles (Tarjan SCC), each sorted, plus projects referencing themselves.
  pub fn find_cycles(&self) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = algo::tarjan_scc(&self.graph)
      .into_iter()
      .filter(|component| {
        component.len() > 1 || self.graph.contains_edge(component[0], component[0])
      })
      .map(|component| {
        let mut names: Vec<String> = component.into_iter().map(|idx| self.graph[idx].name.clone()).collect();
        names.sort();
        names
      })
      .collect();
    cycles.sort();
    cycles
  }

  /// References to projects missing from the workspace.
  pub fn dangling_references(&self) -> &[(String, String)] {
    &self.dangling
  }

  /// Projects in name order with their Java nature.
  pub fn nodes(&self) -> Vec<&ProjectNode> {
    let mut nodes: Vec<&ProjectNode> = self.graph.node_weights().collect();
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    nodes
  }
}
