use crate::core::workflow::flow::{self, ProcessFlow};
use crate::core::workflow::render::RenderOptions;
use crate::core::workflow::schema::{
    DatasetRef, FeatureTypeNode, TransformerNode, WorkflowDocument,
};

const DEFAULT_TITLE: &str = "FME Workflow";
const OVERVIEW: &str = "This document provides a comprehensive description of the FME workflow components and their interactions.";

/// Markdown text assembled from blank-line separated blocks.
#[derive(Default)]
struct MarkdownDocument {
    blocks: Vec<String>,
}

impl MarkdownDocument {
    fn heading(&mut self, level: usize, text: &str) {
        self.blocks
            .push(format!("{} {}", "#".repeat(level), inline_text(text)));
    }

    fn paragraph(&mut self, text: impl Into<String>) {
        self.blocks.push(text.into());
    }

    fn list(&mut self, lead: &str, items: &[String], indent: &str) {
        let mut block = lead.to_string();
        for item in items {
            block.push('\n');
            block.push_str(&format!("{}- {}", indent, inline_text(item)));
        }
        self.blocks.push(block);
    }

    fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) {
        let mut block = format!("| {} |\n", headers.join(" | "));
        block.push_str(&format!("|{}", " --- |".repeat(headers.len())));
        for row in rows {
            let cells: Vec<String> = row.iter().map(|value| table_cell(value)).collect();
            block.push_str(&format!("\n| {} |", cells.join(" | ")));
        }
        self.blocks.push(block);
    }

    fn finish(self) -> String {
        let mut text = self.blocks.join("\n\n");
        text.push('\n');
        text
    }
}

/// Workspace values may carry decoded line breaks; a value placed inside a
/// heading, list item or table cell must stay on one line.
fn inline_text(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn table_cell(value: &str) -> String {
    inline_text(value).replace('|', "\\|")
}

/// Render the full Markdown report. Every section heading is always present.
pub fn render_markdown(document: &WorkflowDocument, options: &RenderOptions) -> String {
    let mut md = MarkdownDocument::default();
    build_overview_section(&mut md, document);
    build_parameters_section(&mut md, document);
    build_datasets_section(&mut md, document);
    build_feature_types_section(&mut md, document);
    build_transformers_section(&mut md, document, options);
    build_connections_section(&mut md, document);
    build_process_flow_section(&mut md, &flow::summarize(document));
    md.finish()
}

fn build_overview_section(md: &mut MarkdownDocument, document: &WorkflowDocument) {
    let title = document
        .metadata_value("WORKSPACE_FILE")
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_TITLE);
    md.heading(1, &format!("{} Documentation", title));
    md.paragraph(format!("## Overview\n{}", OVERVIEW));

    let labelled = [
        ("DESCRIPTION", "Workflow Description"),
        ("LAST_SAVE_DATE", "Last Saved"),
        ("LAST_SAVE_BUILD", "FME Version"),
    ];
    for (key, label) in labelled {
        if let Some(value) = document.metadata_value(key).filter(|v| !v.is_empty()) {
            md.paragraph(format!("**{}**: {}", label, inline_text(value)));
        }
    }
}

fn build_parameters_section(md: &mut MarkdownDocument, document: &WorkflowDocument) {
    md.heading(2, "Parameters");
    if document.parameters.is_empty() {
        md.paragraph("No parameters defined in the workflow.");
        return;
    }
    md.paragraph("The workflow uses the following parameters:");
    md.table(
        &["Parameter", "Value"],
        document
            .parameters
            .iter()
            .map(|param| vec![param.name.clone(), param.value.clone()])
            .collect(),
    );
}

fn build_datasets_section(md: &mut MarkdownDocument, document: &WorkflowDocument) {
    md.heading(2, "Datasets");
    dataset_table(md, "Reader Datasets", "reader", document.readers().collect());
    dataset_table(md, "Writer Datasets", "writer", document.writers().collect());
}

fn dataset_table(md: &mut MarkdownDocument, heading: &str, noun: &str, datasets: Vec<&DatasetRef>) {
    md.heading(3, heading);
    if datasets.is_empty() {
        md.paragraph(format!("No {} datasets identified in the workflow.", noun));
        return;
    }
    md.table(
        &["Name", "Format", "Dataset"],
        datasets
            .into_iter()
            .map(|d| vec![d.keyword.clone(), d.format.clone(), d.dataset.clone()])
            .collect(),
    );
}

fn build_feature_types_section(md: &mut MarkdownDocument, document: &WorkflowDocument) {
    md.heading(2, "Feature Types");
    feature_type_group(
        md,
        "Source Feature Types",
        "source",
        document.source_feature_types().collect(),
    );
    feature_type_group(
        md,
        "Destination Feature Types",
        "destination",
        document.destination_feature_types().collect(),
    );
}

fn feature_type_group(
    md: &mut MarkdownDocument,
    heading: &str,
    noun: &str,
    feature_types: Vec<&FeatureTypeNode>,
) {
    md.heading(3, heading);
    if feature_types.is_empty() {
        md.paragraph(format!("No {} feature types identified in the workflow.", noun));
        return;
    }
    for feature_type in feature_types {
        md.heading(4, &feature_type.name);
        if feature_type.attributes.is_empty() {
            md.paragraph("No attributes declared.");
            continue;
        }
        md.paragraph("**Attributes**:");
        md.table(
            &["Name", "Type"],
            feature_type
                .attributes
                .iter()
                .map(|attr| vec![attr.name.clone(), attr.attribute_type.clone()])
                .collect(),
        );
    }
}

fn build_transformers_section(
    md: &mut MarkdownDocument,
    document: &WorkflowDocument,
    options: &RenderOptions,
) {
    md.heading(2, "Transformers");
    if document.transformers.is_empty() {
        md.paragraph("No transformers identified in the workflow.");
        return;
    }

    for transformer in ordered_transformers(&document.transformers, options.sort_transformers) {
        md.heading(3, &transformer.display_name());

        let visible: Vec<String> = transformer
            .parameters
            .iter()
            .filter(|(name, _)| !options.is_hidden_parameter(name))
            .map(|(name, value)| format!("**{}**: {}", name, value))
            .collect();
        if !visible.is_empty() {
            md.list("**Parameters**:", &visible, "");
        }

        if !transformer.output_ports.is_empty() {
            md.list("**Output Ports**:", &transformer.output_ports, "");
        }
    }
}

/// Numeric order by identifier when every identifier is an integer, otherwise
/// declaration order.
fn ordered_transformers(transformers: &[TransformerNode], sort: bool) -> Vec<&TransformerNode> {
    let mut ordered: Vec<&TransformerNode> = transformers.iter().collect();
    if !sort {
        return ordered;
    }
    let keys: Option<Vec<i64>> = transformers
        .iter()
        .map(|t| t.identifier.trim().parse::<i64>().ok())
        .collect();
    match keys {
        Some(keys) => {
            let mut keyed: Vec<(i64, &TransformerNode)> = keys.into_iter().zip(ordered).collect();
            keyed.sort_by_key(|(key, _)| *key);
            ordered = keyed.into_iter().map(|(_, transformer)| transformer).collect();
        }
        None => {
            tracing::debug!("transformer identifiers are not all numeric; keeping declaration order");
        }
    }
    ordered
}

fn build_connections_section(md: &mut MarkdownDocument, document: &WorkflowDocument) {
    md.heading(2, "Workflow Connections");
    if document.connections.is_empty() {
        md.paragraph("No connections identified in the workflow.");
        return;
    }
    md.paragraph("The workflow has the following connections between components:");
    md.table(
        &["From", "To", "From Port", "To Port", "Type"],
        document
            .connections
            .iter()
            .map(|conn| {
                vec![
                    conn.source_node.clone(),
                    conn.target_node.clone(),
                    conn.source_port.clone(),
                    conn.target_port.clone(),
                    conn.kind().to_string(),
                ]
            })
            .collect(),
    );
}

fn build_process_flow_section(md: &mut MarkdownDocument, flow: &ProcessFlow) {
    md.heading(2, "Workflow Process Flow");
    if !flow.is_determined() {
        md.paragraph(
            "Unable to determine the workflow process flow due to missing connection information.",
        );
        return;
    }

    md.paragraph("The workflow process follows these steps:");
    md.list(
        "1. **Data Source Reading**: The workflow reads data from the following sources:",
        &flow.sources,
        "   ",
    );
    if !flow.transformers.is_empty() {
        md.list(
            "2. **Data Processing**: The workflow processes the data through the following transformers:",
            &flow.transformers,
            "   ",
        );
    }
    if !flow.destinations.is_empty() {
        md.list(
            "3. **Data Output**: The workflow writes data to the following destinations:",
            &flow.destinations,
            "   ",
        );
    }
}
