use crate::core::workflow::flow::{self, FlowGraph};
use crate::core::workflow::schema::WorkflowDocument;
use petgraph::dot::Dot;
use petgraph::visit::Bfs;
use std::collections::HashSet;

/// Render the workflow connection graph as a Graphviz DOT string using petgraph.
pub fn workflow_to_dot(document: &WorkflowDocument) -> String {
    let flow = FlowGraph::from_document(document);
    format!("{}", Dot::new(flow.graph()))
}

/// Returns the labels of declared nodes that no process-flow source reaches.
pub fn unreachable_labels(document: &WorkflowDocument) -> Vec<String> {
    let flow = FlowGraph::from_document(document);
    let graph = flow.graph();
    let starts: HashSet<String> = flow::summarize(document).sources.into_iter().collect();

    let mut reachable = HashSet::new();
    for start in graph.node_indices().filter(|&nx| starts.contains(&graph[nx].label)) {
        let mut bfs = Bfs::new(graph, start);
        while let Some(nx) = bfs.next(graph) {
            reachable.insert(nx);
        }
    }

    graph
        .node_indices()
        .filter(|nx| !reachable.contains(nx))
        .map(|nx| graph[nx].label.clone())
        .collect()
}
