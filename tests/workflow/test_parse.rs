use fmwdoc::core::workflow::{build_document, parse_workflow_file, ConnectionKind, TagScanner};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_fixture_workspace_is_fully_extracted() {
    let document = parse_workflow_file(&fixture("treefarm.fmw")).unwrap();

    assert_eq!(document.metadata_value("WORKSPACE_FILE"), Some("treefarm"));
    assert_eq!(
        document.metadata_value("DESCRIPTION"),
        Some("Loads tree farm parcels & sorts them by id")
    );
    assert_eq!(document.datasets.len(), 2);
    assert_eq!(document.transformers.len(), 2);
    assert_eq!(document.feature_types.len(), 2);
    assert_eq!(document.connections.len(), 4);
    assert_eq!(document.parameters.len(), 2);

    let sorter = &document.transformers[0];
    assert_eq!(sorter.display_name(), "Sorter (ID: 5)");
    // Empty SORT_ORDER is dropped at extraction, XFORMER_NAME is kept for JSON.
    assert_eq!(
        sorter.parameters.keys().collect::<Vec<_>>(),
        vec!["XFORMER_NAME", "SORT_FIELD"]
    );
    assert_eq!(document.transformers[1].output_ports, vec!["UNIQUE", "DUPLICATE"]);
}

#[test]
fn test_datasets_are_partitioned_by_source_flag() {
    let text = r#"
<DATASET IS_SOURCE="true" ROLE="READER" FORMAT="SHAPEFILE" DATASET="a.shp" KEYWORD="R1"/>
<DATASET IS_SOURCE="false" ROLE="WRITER" FORMAT="CSV2" DATASET="b.csv" KEYWORD="W1"/>
<DATASET IS_SOURCE="true" ROLE="READER" FORMAT="GEOJSON" DATASET="c.json" KEYWORD="R2"/>
"#;
    let document = build_document(text);
    assert_eq!(document.datasets.len(), 3);

    let readers: Vec<_> = document.readers().map(|d| d.keyword.as_str()).collect();
    let writers: Vec<_> = document.writers().map(|d| d.keyword.as_str()).collect();
    assert_eq!(readers, vec!["R1", "R2"]);
    assert_eq!(writers, vec!["W1"]);
}

#[test]
fn test_links_resolve_nodes_declared_after_them() {
    let text = r#"
<FEAT_LINK SOURCE_NODE="2" TARGET_NODE="5" SOURCE_PORT="" TARGET_PORT=""/>
<TRANSFORMER IDENTIFIER="5" TYPE="Sorter"></TRANSFORMER>
<FEATURE_TYPE NODE_ID="2" NAME="treefarm" IS_SOURCE="true"></FEATURE_TYPE>
"#;
    let document = build_document(text);
    assert_eq!(document.connections[0].source_node, "Feature Type: treefarm");
    assert_eq!(document.connections[0].target_node, "Transformer: Sorter");
}

#[test]
fn test_undeclared_nodes_use_placeholder_labels() {
    let text = r#"<FEAT_LINK SOURCE_NODE="41" TARGET_NODE="42" SOURCE_PORT="REJECTED" TARGET_PORT=""/>"#;
    let document = build_document(text);
    let connection = &document.connections[0];
    assert_eq!(connection.source_node, "Node 41");
    assert_eq!(connection.target_node, "Node 42");
    assert_eq!(connection.kind(), ConnectionKind::Rejected);
}

#[test]
fn test_nested_same_kind_blocks_keep_their_own_children() {
    let text = r#"
<TRANSFORMER IDENTIFIER="1" TYPE="Custom">
  <XFORM_PARM NAME="OUTER" VALUE="a"/>
  <TRANSFORMER IDENTIFIER="2" TYPE="Inner">
    <XFORM_PARM NAME="INNER" VALUE="b"/>
  </TRANSFORMER>
  <OUTPUT_PORT NAME="OUTPUT"/>
</TRANSFORMER>
"#;
    let document = build_document(text);
    assert_eq!(document.transformers.len(), 2);

    let outer = &document.transformers[0];
    assert_eq!(outer.parameters.len(), 1);
    assert_eq!(outer.parameters["OUTER"], "a");
    assert_eq!(outer.output_ports, vec!["OUTPUT"]);

    let inner = &document.transformers[1];
    assert_eq!(inner.parameters["INNER"], "b");
    assert!(inner.output_ports.is_empty());
}

#[test]
fn test_scanner_tolerates_arbitrary_text() {
    let text = "FACTORY_DEF * TeeFactory <<< not markup >>> < > </> <1BAD/>";
    let scanner = TagScanner::new(text);
    assert_eq!(scanner.tag_count(), 0);
    assert!(build_document(text).is_empty());
}
