//! FME workspace documentation pipeline.
//!
//! A workspace file is scanned for tagged declarations (`tags`), node ids are
//! mapped to readable labels (`resolver`), the declarations are assembled into
//! a [`WorkflowDocument`] (`builder`) and finally rendered as Markdown, JSON or
//! Graphviz DOT (`render`).
pub mod builder;
pub mod dot;
pub mod flow;
pub mod markdown;
pub mod render;
pub mod resolver;
pub mod schema;
pub mod tags;

pub use builder::{build_document, parse_workflow_file};
pub use flow::{summarize, FlowGraph, ProcessFlow};
pub use render::{DocumentationRenderer, RenderOptions};
pub use resolver::NodeResolver;
pub use schema::{
    Connection, ConnectionKind, DatasetRef, FeatureAttribute, FeatureTypeNode, GlobalParameter,
    TransformerNode, WorkflowDocument,
};
pub use tags::{Declaration, DeclarationKind, TagScanner};
