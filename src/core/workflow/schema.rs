use indexmap::IndexMap;
use serde::Serialize;

/// Structured view of one FME workspace, built once by the model builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowDocument {
    pub metadata: IndexMap<String, String>,
    pub datasets: Vec<DatasetRef>,
    pub transformers: Vec<TransformerNode>,
    pub connections: Vec<Connection>,
    pub feature_types: Vec<FeatureTypeNode>,
    pub parameters: Vec<GlobalParameter>,
}

impl WorkflowDocument {
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Datasets the workspace reads from.
    pub fn readers(&self) -> impl Iterator<Item = &DatasetRef> {
        self.datasets.iter().filter(|dataset| dataset.is_source)
    }

    /// Datasets the workspace writes to.
    pub fn writers(&self) -> impl Iterator<Item = &DatasetRef> {
        self.datasets.iter().filter(|dataset| !dataset.is_source)
    }

    pub fn source_feature_types(&self) -> impl Iterator<Item = &FeatureTypeNode> {
        self.feature_types.iter().filter(|ft| ft.is_source)
    }

    pub fn destination_feature_types(&self) -> impl Iterator<Item = &FeatureTypeNode> {
        self.feature_types.iter().filter(|ft| !ft.is_source)
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
            && self.datasets.is_empty()
            && self.transformers.is_empty()
            && self.connections.is_empty()
            && self.feature_types.is_empty()
            && self.parameters.is_empty()
    }
}

/// Reader or writer dataset declared by the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRef {
    pub is_source: bool,
    pub role: String,
    pub format: String,
    pub dataset: String,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformerNode {
    pub identifier: String,
    #[serde(rename = "type")]
    pub transformer_type: String,
    pub parameters: IndexMap<String, String>,
    pub output_ports: Vec<String>,
}

impl TransformerNode {
    /// Heading used wherever the transformer is listed.
    pub fn display_name(&self) -> String {
        format!("{} (ID: {})", self.transformer_type, self.identifier)
    }

    /// Resolver label for this transformer.
    pub fn node_label(&self) -> String {
        transformer_label(&self.transformer_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureTypeNode {
    pub name: String,
    pub is_source: bool,
    pub attributes: Vec<FeatureAttribute>,
}

impl FeatureTypeNode {
    /// Resolver label for this feature type.
    pub fn node_label(&self) -> String {
        feature_type_label(&self.name)
    }
}

pub fn transformer_label(transformer_type: &str) -> String {
    format!("Transformer: {}", transformer_type)
}

pub fn feature_type_label(name: &str) -> String {
    format!("Feature Type: {}", name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: String,
}

/// Directed link between two nodes. Node fields carry resolved labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub source_node: String,
    pub target_node: String,
    pub source_port: String,
    pub target_port: String,
}

impl Connection {
    /// Display-only classification derived from port names.
    pub fn kind(&self) -> ConnectionKind {
        if self.source_port.contains("REJECTED") || self.target_port.contains("REJECTED") {
            ConnectionKind::Rejected
        } else if self.source_port.contains("DUPLICATE") {
            ConnectionKind::Duplicate
        } else if self.source_port.contains("UNIQUE") {
            ConnectionKind::Unique
        } else {
            ConnectionKind::Standard
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    Standard,
    Rejected,
    Duplicate,
    Unique,
}

impl std::fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionKind::Standard => write!(f, "Standard"),
            ConnectionKind::Rejected => write!(f, "Rejected Features"),
            ConnectionKind::Duplicate => write!(f, "Duplicate Features"),
            ConnectionKind::Unique => write!(f, "Unique Features"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalParameter {
    pub name: String,
    pub value: String,
}
