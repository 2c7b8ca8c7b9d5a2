//! `sonar-jdt graph` - Project references and reference cycles

use crate::core::context::WorkspaceContext;
use crate::core::error::JdtResult;
use crate::graph::ProjectGraph;
use serde_json::json;

/// Run the graph command
pub fn run_graph(ctx: &WorkspaceContext, json: bool) -> JdtResult<()> {
  let graph = ProjectGraph::build(ctx.model.as_ref());
  let cycles = graph.find_cycles();

  if json {
    let projects: Vec<_> = graph
      .nodes()
      .into_iter()
      .map(|node| {
        json!({
          "name": node.name,
          "java": node.java_nature,
          "references": graph.direct_references(&node.name),
          "transitive": graph.references(&node.name),
        })
      })
      .collect();
    let dangling: Vec<_> = graph
      .dangling_references()
      .iter()
      .map(|(from, to)| json!({ "from": from, "to": to }))
      .collect();
    let output = json!({
      "projects": projects,
      "cycles": cycles,
      "dangling": dangling,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    return Ok(());
  }

  println!("Project references");
  println!("==================");
  println!();
  for node in graph.nodes() {
    let refs = graph.direct_references(&node.name);
    if refs.is_empty() {
      println!("  {}", node.name);
    } else {
      println!("  {} -> {}", node.name, refs.join(", "));
    }
  }
  println!();

  if cycles.is_empty() {
    println!("No reference cycles detected");
  } else {
    println!("Reference cycles: {}", cycles.len());
    for (i, cycle) in cycles.iter().enumerate() {
      println!("  Cycle {}: {}", i + 1, cycle.join(" -> "));
    }
  }

  for (from, to) in graph.dangling_references() {
    println!("warning: {} references missing project '{}'", from, to);
  }

  Ok(())
}
