#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::workflow::resolver::NodeResolver;
use crate::core::workflow::schema::{
    Connection, DatasetRef, FeatureAttribute, FeatureTypeNode, GlobalParameter, TransformerNode,
    WorkflowDocument,
};
use crate::core::workflow::tags::{Declaration, DeclarationKind, TagScanner};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Read a workspace file and build its document model.
pub fn parse_workflow_file(path: &Path) -> Result<WorkflowDocument, AppError> {
    let content = fs::read_to_string(path).map_err(|err| AppError::input(path, err))?;
    let _span = tracing::debug_span!("parse", file = %path.display()).entered();
    Ok(build_document(&content))
}

/// Build the document model from raw workspace text.
///
/// Stages run in a fixed order: metadata, datasets, transformers and feature
/// types, then the node resolver, then links, then global parameters. Links are
/// resolved only once every node declaration has been registered.
pub fn build_document(content: &str) -> WorkflowDocument {
    let scanner = TagScanner::new(content);

    let metadata = extract_metadata(&scanner);
    let datasets = extract_datasets(&scanner);
    let transformers = extract_transformers(&scanner);
    let feature_types = extract_feature_types(&scanner);
    let resolver = NodeResolver::from_scanner(&scanner);
    let connections = extract_connections(&scanner, &resolver);
    let parameters = extract_parameters(&scanner);

    tracing::info!(
        datasets = datasets.len(),
        transformers = transformers.len(),
        feature_types = feature_types.len(),
        connections = connections.len(),
        parameters = parameters.len(),
        "parsed workflow"
    );

    WorkflowDocument {
        metadata,
        datasets,
        transformers,
        connections,
        feature_types,
        parameters,
    }
}

fn extract_metadata(scanner: &TagScanner<'_>) -> IndexMap<String, String> {
    scanner
        .declarations(DeclarationKind::Workspace)
        .next()
        .map(|declaration| declaration.attributes)
        .unwrap_or_default()
}

fn extract_datasets(scanner: &TagScanner<'_>) -> Vec<DatasetRef> {
    scanner
        .declarations(DeclarationKind::Dataset)
        .filter_map(|declaration| keep_or_log(dataset_from(&declaration), &declaration))
        .collect()
}

fn dataset_from(declaration: &Declaration) -> Option<DatasetRef> {
    Some(DatasetRef {
        is_source: parse_flag(declaration.attr("IS_SOURCE")?),
        role: declaration.attr("ROLE")?.to_string(),
        format: declaration.attr("FORMAT")?.to_string(),
        dataset: declaration.attr("DATASET")?.to_string(),
        keyword: declaration.attr("KEYWORD")?.to_string(),
    })
}

fn extract_transformers(scanner: &TagScanner<'_>) -> Vec<TransformerNode> {
    scanner
        .declarations(DeclarationKind::Transformer)
        .filter_map(|declaration| keep_or_log(transformer_from(&declaration), &declaration))
        .collect()
}

fn transformer_from(declaration: &Declaration) -> Option<TransformerNode> {
    let identifier = declaration.attr("IDENTIFIER")?.to_string();
    let transformer_type = declaration.attr("TYPE")?.to_string();

    let mut parameters = IndexMap::new();
    for param in declaration.children_named("XFORM_PARM") {
        // Empty values carry no information for the report.
        if let (Some(name), Some(value)) = (param.attr("NAME"), param.attr("VALUE")) {
            parameters
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    let output_ports = declaration
        .children_named("OUTPUT_PORT")
        .filter_map(|port| port.attr("NAME"))
        .map(str::to_string)
        .collect();

    Some(TransformerNode {
        identifier,
        transformer_type,
        parameters,
        output_ports,
    })
}

fn extract_feature_types(scanner: &TagScanner<'_>) -> Vec<FeatureTypeNode> {
    scanner
        .declarations(DeclarationKind::FeatureType)
        .filter_map(|declaration| keep_or_log(feature_type_from(&declaration), &declaration))
        .collect()
}

fn feature_type_from(declaration: &Declaration) -> Option<FeatureTypeNode> {
    let name = declaration.attr("NAME")?.to_string();
    let is_source = parse_flag(declaration.attr("IS_SOURCE")?);
    let attributes = declaration
        .children_named("FEAT_ATTRIBUTE")
        .filter_map(|attribute| {
            Some(FeatureAttribute {
                name: attribute.attr("NAME")?.to_string(),
                attribute_type: attribute.attr("TYPE")?.to_string(),
            })
        })
        .collect();

    Some(FeatureTypeNode {
        name,
        is_source,
        attributes,
    })
}

fn extract_connections(scanner: &TagScanner<'_>, resolver: &NodeResolver) -> Vec<Connection> {
    scanner
        .declarations(DeclarationKind::Link)
        .filter_map(|declaration| {
            keep_or_log(connection_from(&declaration, resolver), &declaration)
        })
        .collect()
}

fn connection_from(declaration: &Declaration, resolver: &NodeResolver) -> Option<Connection> {
    let source_id = declaration.attr("SOURCE_NODE")?;
    let target_id = declaration.attr("TARGET_NODE")?;
    Some(Connection {
        source_node: resolver.resolve(source_id),
        target_node: resolver.resolve(target_id),
        source_port: declaration.value("SOURCE_PORT").unwrap_or_default().to_string(),
        target_port: declaration.value("TARGET_PORT").unwrap_or_default().to_string(),
    })
}

fn extract_parameters(scanner: &TagScanner<'_>) -> Vec<GlobalParameter> {
    scanner
        .declarations(DeclarationKind::GlobalParameter)
        .filter_map(|declaration| keep_or_log(parameter_from(&declaration), &declaration))
        .collect()
}

fn parameter_from(declaration: &Declaration) -> Option<GlobalParameter> {
    Some(GlobalParameter {
        name: declaration.attr("NAME")?.to_string(),
        value: declaration.value("VALUE")?.to_string(),
    })
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn keep_or_log<T>(parsed: Option<T>, declaration: &Declaration) -> Option<T> {
    if parsed.is_none() {
        tracing::debug!(
            tag = declaration.kind.tag_name(),
            attributes = ?declaration.attributes.keys().collect::<Vec<_>>(),
            "skipping declaration with missing required attributes"
        );
    }
    parsed
}
