use crate::core::workflow::schema::{Connection, WorkflowDocument};
use indexmap::{IndexMap, IndexSet};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::fmt;

/// Node weight: the resolved display label.
#[derive(Debug, Clone)]
pub struct FlowNode {
    pub label: String,
}

impl fmt::Display for FlowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Edge weight carrying the port names of a link.
#[derive(Debug, Clone)]
pub struct FlowEdge {
    pub source_port: String,
    pub target_port: String,
}

impl fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.source_port.is_empty(), self.target_port.is_empty()) {
            (true, true) => Ok(()),
            (false, true) => write!(f, "{}", self.source_port),
            (true, false) => write!(f, "{}", self.target_port),
            (false, false) => write!(f, "{} / {}", self.source_port, self.target_port),
        }
    }
}

/// Directed graph of workflow labels, with nodes kept in first-seen order.
pub struct FlowGraph {
    graph: DiGraph<FlowNode, FlowEdge>,
    nodes: IndexMap<String, NodeIndex>,
}

impl FlowGraph {
    /// Graph over the labels that appear in links.
    pub fn from_connections(connections: &[Connection]) -> Self {
        let mut flow = FlowGraph {
            graph: DiGraph::new(),
            nodes: IndexMap::new(),
        };
        for connection in connections {
            flow.add_connection(connection);
        }
        flow
    }

    /// Graph over every declared node plus the labels that appear in links.
    pub fn from_document(document: &WorkflowDocument) -> Self {
        let mut flow = FlowGraph {
            graph: DiGraph::new(),
            nodes: IndexMap::new(),
        };
        for feature_type in document.source_feature_types() {
            flow.node(&feature_type.node_label());
        }
        for transformer in &document.transformers {
            flow.node(&transformer.node_label());
        }
        for feature_type in document.destination_feature_types() {
            flow.node(&feature_type.node_label());
        }
        for connection in &document.connections {
            flow.add_connection(connection);
        }
        flow
    }

    fn add_connection(&mut self, connection: &Connection) {
        let from = self.node(&connection.source_node);
        let to = self.node(&connection.target_node);
        self.graph.add_edge(
            from,
            to,
            FlowEdge {
                source_port: connection.source_port.clone(),
                target_port: connection.target_port.clone(),
            },
        );
    }

    fn node(&mut self, label: &str) -> NodeIndex {
        if let Some(&index) = self.nodes.get(label) {
            return index;
        }
        let index = self.graph.add_node(FlowNode {
            label: label.to_string(),
        });
        self.nodes.insert(label.to_string(), index);
        index
    }

    pub fn graph(&self) -> &DiGraph<FlowNode, FlowEdge> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Labels with no incoming link.
    pub fn roots(&self) -> Vec<&str> {
        self.without_neighbors(Direction::Incoming)
    }

    /// Labels with no outgoing link.
    pub fn leaves(&self) -> Vec<&str> {
        self.without_neighbors(Direction::Outgoing)
    }

    fn without_neighbors(&self, direction: Direction) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, &index)| {
                self.graph
                    .neighbors_directed(index, direction)
                    .next()
                    .is_none()
            })
            .map(|(label, _)| label.as_str())
            .collect()
    }
}

/// Three-step summary of a workflow: sources read, transformers applied,
/// destinations written. Transformers are listed in declaration order, not by
/// their position in the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessFlow {
    pub sources: Vec<String>,
    pub transformers: Vec<String>,
    pub destinations: Vec<String>,
}

impl ProcessFlow {
    pub fn is_determined(&self) -> bool {
        !self.sources.is_empty()
    }
}

pub fn summarize(document: &WorkflowDocument) -> ProcessFlow {
    let graph = FlowGraph::from_connections(&document.connections);

    let declared_sources: IndexSet<String> = document
        .source_feature_types()
        .map(|ft| ft.node_label())
        .collect();
    let sources: Vec<String> = if declared_sources.is_empty() {
        graph.roots().into_iter().map(str::to_string).collect()
    } else {
        declared_sources.into_iter().collect()
    };

    let declared_destinations: IndexSet<String> = document
        .destination_feature_types()
        .map(|ft| ft.node_label())
        .collect();
    let destinations: Vec<String> = if declared_destinations.is_empty() {
        graph.leaves().into_iter().map(str::to_string).collect()
    } else {
        declared_destinations.into_iter().collect()
    };

    let transformers = document
        .transformers
        .iter()
        .map(|transformer| transformer.display_name())
        .collect();

    tracing::debug!(
        sources = sources.len(),
        destinations = destinations.len(),
        nodes = graph.node_count(),
        "summarized process flow"
    );

    ProcessFlow {
        sources,
        transformers,
        destinations,
    }
}
