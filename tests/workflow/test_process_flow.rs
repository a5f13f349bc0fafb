use fmwdoc::core::workflow::dot::unreachable_labels;
use fmwdoc::core::workflow::{build_document, summarize, FlowGraph};

#[test]
fn test_declared_sources_and_destinations_take_precedence() {
    let text = r#"
<FEATURE_TYPE NODE_ID="1" NAME="roads" IS_SOURCE="true"></FEATURE_TYPE>
<FEATURE_TYPE NODE_ID="1" NAME="roads" IS_SOURCE="true"></FEATURE_TYPE>
<FEATURE_TYPE NODE_ID="8" NAME="clean_roads" IS_SOURCE="false"></FEATURE_TYPE>
<TRANSFORMER IDENTIFIER="4" TYPE="Tester"></TRANSFORMER>
<FEAT_LINK SOURCE_NODE="1" TARGET_NODE="4"/>
"#;
    let flow = summarize(&build_document(text));

    assert!(flow.is_determined());
    // Duplicate declarations collapse into one start.
    assert_eq!(flow.sources, vec!["Feature Type: roads"]);
    // A declared destination is listed even when nothing links to it.
    assert_eq!(flow.destinations, vec!["Feature Type: clean_roads"]);
    assert_eq!(flow.transformers, vec!["Tester (ID: 4)"]);
}

#[test]
fn test_graph_fallbacks_when_no_feature_types_are_declared() {
    let text = r#"
<TRANSFORMER IDENTIFIER="2" TYPE="Creator"></TRANSFORMER>
<TRANSFORMER IDENTIFIER="3" TYPE="Tester"></TRANSFORMER>
<FEAT_LINK SOURCE_NODE="2" TARGET_NODE="3" SOURCE_PORT="CREATED"/>
<FEAT_LINK SOURCE_NODE="3" TARGET_NODE="99" SOURCE_PORT="PASSED"/>
<FEAT_LINK SOURCE_NODE="3" TARGET_NODE="98" SOURCE_PORT="FAILED"/>
"#;
    let flow = summarize(&build_document(text));

    assert_eq!(flow.sources, vec!["Transformer: Creator"]);
    assert_eq!(flow.destinations, vec!["Node 99", "Node 98"]);
}

#[test]
fn test_cycle_without_declared_sources_is_undetermined() {
    let text = r#"
<TRANSFORMER IDENTIFIER="1" TYPE="Looper"></TRANSFORMER>
<TRANSFORMER IDENTIFIER="2" TYPE="Tester"></TRANSFORMER>
<FEAT_LINK SOURCE_NODE="1" TARGET_NODE="2"/>
<FEAT_LINK SOURCE_NODE="2" TARGET_NODE="1"/>
"#;
    let document = build_document(text);
    let flow = summarize(&document);

    assert!(!flow.is_determined());
    assert!(flow.destinations.is_empty());
    assert_eq!(FlowGraph::from_connections(&document.connections).node_count(), 2);
}

#[test]
fn test_nodes_outside_the_flow_are_reported_unreachable() {
    let text = r#"
<FEATURE_TYPE NODE_ID="1" NAME="parcels" IS_SOURCE="true"></FEATURE_TYPE>
<TRANSFORMER IDENTIFIER="2" TYPE="Tester"></TRANSFORMER>
<TRANSFORMER IDENTIFIER="3" TYPE="Logger"></TRANSFORMER>
<FEAT_LINK SOURCE_NODE="1" TARGET_NODE="2"/>
"#;
    let unreachable = unreachable_labels(&build_document(text));
    assert_eq!(unreachable, vec!["Transformer: Logger"]);
}
