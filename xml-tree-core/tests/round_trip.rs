use pretty_assertions::assert_eq;
use std::fs;

use xml_tree_core::{parse, parse_file, write, XmlNode};

#[test]
fn parse_write_parse_round_trip_preserves_tree_shape() {
    let source = br#"<config version="9.1.0"><shared><tag><entry name="prod"><comments>a &lt; b</comments></entry><entry name="dev"/></tag></shared></config>"#;
    let first = parse(source).expect("initial parse should succeed");

    let written = write(&first).expect("write should succeed");
    let second = parse(&written).expect("re-parse should succeed");

    assert_eq!(first, second);
}

#[test]
fn written_document_reads_back_from_disk() {
    let node = XmlNode::new("rules")
        .with_child(XmlNode::new("entry").with_attr("name", "allow-web"))
        .with_child(XmlNode::new("entry").with_attr("name", "deny-all"));
    let out_dir = tempfile::tempdir().expect("tempdir should be created");
    let out_path = out_dir.path().join("roundtrip.xml");

    fs::write(&out_path, write(&node).expect("write should succeed")).expect("save");

    let reparsed = parse_file(&out_path).expect("parse_file should succeed");
    assert_eq!(node, reparsed);
}
