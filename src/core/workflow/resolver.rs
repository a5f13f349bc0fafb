use crate::core::workflow::schema::{feature_type_label, transformer_label};
use crate::core::workflow::tags::{Declaration, DeclarationKind, TagScanner};
use std::collections::HashMap;

/// Maps the opaque node ids used by `FEAT_LINK` to readable labels.
///
/// Built once from every node declaration in the document before any link is
/// resolved, so declaration order relative to the links does not matter.
#[derive(Debug, Clone, Default)]
pub struct NodeResolver {
    labels: HashMap<String, String>,
}

impl NodeResolver {
    pub fn from_scanner(scanner: &TagScanner<'_>) -> Self {
        Self::from_declarations(
            scanner.declarations(DeclarationKind::FeatureType),
            scanner.declarations(DeclarationKind::Transformer),
        )
    }

    /// Feature types are registered first; a transformer sharing an id replaces the label.
    pub fn from_declarations(
        feature_types: impl IntoIterator<Item = Declaration>,
        transformers: impl IntoIterator<Item = Declaration>,
    ) -> Self {
        let mut labels = HashMap::new();

        for declaration in feature_types {
            if let (Some(node_id), Some(name)) = (declaration.attr("NODE_ID"), declaration.attr("NAME"))
            {
                labels.insert(node_id.to_string(), feature_type_label(name));
            }
        }

        for declaration in transformers {
            if let (Some(identifier), Some(transformer_type)) =
                (declaration.attr("IDENTIFIER"), declaration.attr("TYPE"))
            {
                labels.insert(identifier.to_string(), transformer_label(transformer_type));
            }
        }

        tracing::debug!(nodes = labels.len(), "built node resolver");
        NodeResolver { labels }
    }

    /// Label for `raw_id`, or the `Node {id}` placeholder when it was never declared.
    pub fn resolve(&self, raw_id: &str) -> String {
        match self.labels.get(raw_id) {
            Some(label) => label.clone(),
            None => {
                tracing::debug!(node_id = raw_id, "link references an undeclared node");
                format!("Node {}", raw_id)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
