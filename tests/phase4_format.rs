//! Phase 4 tests: JSON schema, .brain container, configuration.

use neuron_memory::config::NeuronConfig;
use neuron_memory::format::{
    node_from_json, to_json_string, tree_from_json, BrainReader, BrainWriter,
};
use neuron_memory::memory::{default_brain, MemoryFacade};
use neuron_memory::tree::NeuronTree;
use neuron_memory::types::error::NeuronError;
use neuron_memory::types::header::{BrainHeader, HEADER_SIZE};
use neuron_memory::types::{MemoryTag, NeuronNode, NodeData, NodeType};

use rand::Rng;
use serde_json::json;
use std::io::Cursor;
use tempfile::NamedTempFile;

// ==================== Helper ====================

fn populated_brain() -> NeuronTree {
    let facade = MemoryFacade::new();
    let mut tree = default_brain(&facade).unwrap();
    facade
        .update_memory(&mut tree, MemoryTag::Work, &json!({"note": "promoted"}))
        .unwrap();
    facade
        .add_new_chat(&mut tree, &json!({"title": "hello", "messages": ["hi"]}))
        .unwrap();
    tree.add_child(
        "modelState",
        NeuronNode::new("shard", NodeData::new("\"raw\"", NodeType::from_name("Shard"))),
    )
    .unwrap();
    tree
}

/// A single chain `n0 -> n1 -> ... -> n{depth}` built with `add_child`.
fn chain(depth: usize) -> NeuronTree {
    let mut tree =
        NeuronTree::new(NeuronNode::new("n0", NodeData::new("", NodeType::Root))).unwrap();
    for i in 1..=depth {
        let node = NeuronNode::new(
            format!("n{}", i),
            NodeData::new(format!("{{\"depth\":{}}}", i), NodeType::Holder),
        );
        tree.add_child(&format!("n{}", i - 1), node).unwrap();
    }
    tree
}

/// Run `f` on a thread with room for deep recursive walks.
fn with_big_stack<F: FnOnce() + Send + 'static>(f: F) {
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap();
}

// ==================== JSON Schema Tests ====================

#[test]
fn test_json_schema_shape() {
    let root = NeuronNode::new("root", NodeData::new("", NodeType::Root)).with_child(
        NeuronNode::new("work", NodeData::new("{\"a\":1}", NodeType::Steam)),
    );
    let text = to_json_string(&root, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "root",
            "type": "ROOT",
            "content": "",
            "children": [
                {"id": "work", "type": "STEAM", "content": "{\"a\":1}", "children": []}
            ]
        })
    );
}

#[test]
fn test_json_roundtrip_is_lossless() {
    let tree = populated_brain();
    let text = to_json_string(tree.root(), true).unwrap();
    let back = tree_from_json(text.as_bytes()).unwrap();
    assert_eq!(back.root(), tree.root());
    assert_eq!(back.ids(), tree.ids());
}

#[test]
fn test_json_roundtrip_random_depths() {
    with_big_stack(|| {
        let mut rng = rand::thread_rng();
        let types = ["LEAF", "STEAM", "steam", "Holder", "OPERATOR", "custom"];
        for _ in 0..10 {
            let mut tree =
                NeuronTree::new(NeuronNode::new("n0", NodeData::new("", NodeType::Root))).unwrap();
            let mut deepest = 0;
            for i in 1..200 {
                // Lean towards the latest node so some trees grow past 100 levels.
                let parent = if rng.gen_bool(0.7) { deepest } else { rng.gen_range(0..i) };
                let name = types[rng.gen_range(0..types.len())];
                let node = NeuronNode::new(
                    format!("n{}", i),
                    NodeData::new(format!("{{\"i\":{}}}", i), NodeType::from_name(name)),
                );
                tree.add_child(&format!("n{}", parent), node).unwrap();
                deepest = i;
            }

            let text = to_json_string(tree.root(), false).unwrap();
            let back = tree_from_json(text.as_bytes()).unwrap();
            assert_eq!(back.root(), tree.root());
            for node in &tree {
                assert_eq!(
                    back.get_node(node.id()).unwrap().node_type().name(),
                    node.node_type().name()
                );
            }
            assert_eq!(to_json_string(back.root(), false).unwrap(), text);
        }
    });
}

#[test]
fn test_deep_chain_survives_brain_file() {
    with_big_stack(|| {
        let tree = chain(300);
        let mut buf = Vec::new();
        BrainWriter::new(true).write_to(tree.root(), &mut buf).unwrap();
        let loaded = BrainReader::read_from_bytes(&buf).unwrap();
        assert_eq!(loaded.len(), 301);
        assert_eq!(loaded.root(), tree.root());
        assert_eq!(loaded.node_path("n300"), tree.node_path("n300"));
    });
}

#[test]
fn test_type_case_is_preserved() {
    let text = r#"{"id":"root","type":"ROOT","content":"","children":[
        {"id":"a","type":"steam","content":"{}","children":[]},
        {"id":"b","type":"Leaf","content":"{}","children":[]},
        {"id":"c","type":"STEAM","content":"{}","children":[]}
    ]}"#;
    let tree = tree_from_json(text.as_bytes()).unwrap();
    assert_eq!(tree.get_node("a").unwrap().node_type().name(), "steam");
    assert!(!tree.get_node("b").unwrap().node_type().is_known());
    assert_eq!(tree.get_node("c").unwrap().node_type(), &NodeType::Steam);

    let out = to_json_string(tree.root(), false).unwrap();
    assert!(out.contains("\"type\":\"steam\""));
    assert!(out.contains("\"type\":\"Leaf\""));
    assert!(out.contains("\"type\":\"STEAM\""));
}

#[test]
fn test_other_with_builtin_name_roundtrips_equal() {
    let root = NeuronNode::new("root", NodeData::new("", NodeType::Root)).with_child(
        NeuronNode::new("w", NodeData::new("{}", NodeType::Other("STEAM".to_string()))),
    );
    let back = node_from_json(to_json_string(&root, false).unwrap().as_bytes()).unwrap();
    assert_eq!(back, root);
    assert_eq!(back.children()[0].node_type(), &NodeType::Steam);
}

#[test]
fn test_unknown_type_preserved() {
    let text = r#"{"id":"root","type":"ROOT","content":"","children":[
        {"id":"x","type":"Embedding","content":"[1,2]","children":[]}
    ]}"#;
    let tree = tree_from_json(text.as_bytes()).unwrap();
    assert_eq!(
        tree.get_node("x").unwrap().node_type(),
        &NodeType::Other("Embedding".to_string())
    );
    let out = to_json_string(tree.root(), false).unwrap();
    assert!(out.contains("\"type\":\"Embedding\""));
}

#[test]
fn test_missing_children_and_content_default() {
    let node = node_from_json(br#"{"id":"solo","type":"LEAF"}"#).unwrap();
    assert_eq!(node.id(), "solo");
    assert_eq!(node.content(), "");
    assert!(node.children().is_empty());
}

#[test]
fn test_malformed_json_is_corrupt() {
    match tree_from_json(b"{\"id\": 5}") {
        Err(NeuronError::CorruptData(_)) => {}
        other => panic!("Expected CorruptData, got {:?}", other),
    }
    assert!(matches!(
        tree_from_json(b"not json"),
        Err(NeuronError::CorruptData(_))
    ));
}

#[test]
fn test_duplicate_ids_in_json_are_corrupt() {
    let text = r#"{"id":"root","type":"ROOT","content":"","children":[
        {"id":"a","type":"LEAF","content":""},
        {"id":"a","type":"LEAF","content":""}
    ]}"#;
    match tree_from_json(text.as_bytes()) {
        Err(NeuronError::CorruptData(msg)) => assert!(msg.contains("'a'")),
        other => panic!("Expected CorruptData, got {:?}", other),
    }
}

// ==================== Brain File Tests ====================

#[test]
fn test_brain_file_roundtrip_compressed() {
    let tree = populated_brain();
    let tmp = NamedTempFile::new().unwrap();

    BrainWriter::new(true)
        .write_to_file(tree.root(), tmp.path())
        .unwrap();
    let header = BrainReader::read_header(tmp.path()).unwrap();
    assert!(header.is_compressed());
    assert_eq!(header.node_count, tree.len() as u64);
    assert!(header.saved_at > 0);

    let loaded = BrainReader::read_from_file(tmp.path()).unwrap();
    assert_eq!(loaded.root(), tree.root());
}

#[test]
fn test_brain_file_roundtrip_plain() {
    let tree = populated_brain();
    let tmp = NamedTempFile::new().unwrap();

    BrainWriter::new(false)
        .write_to_file(tree.root(), tmp.path())
        .unwrap();
    let bytes = std::fs::read(tmp.path()).unwrap();
    let payload = &bytes[HEADER_SIZE as usize..];
    assert_eq!(payload[0], b'{');

    let loaded = BrainReader::read_from_file(tmp.path()).unwrap();
    assert_eq!(loaded.root(), tree.root());
    assert_eq!(
        MemoryFacade::new()
            .read_memory(&loaded, MemoryTag::Work)
            .unwrap(),
        json!({"note": "promoted"})
    );
}

#[test]
fn test_brain_in_memory_roundtrip() {
    let tree = populated_brain();
    let mut buf = Vec::new();
    BrainWriter::default().write_to(tree.root(), &mut buf).unwrap();
    let loaded = BrainReader::read_from(&mut Cursor::new(buf)).unwrap();
    assert_eq!(loaded.root(), tree.root());
}

#[test]
fn test_empty_file_truncated() {
    let tmp = NamedTempFile::new().unwrap();
    assert!(matches!(
        BrainReader::read_from_file(tmp.path()),
        Err(NeuronError::Truncated)
    ));
}

#[test]
fn test_truncated_payload() {
    let tree = populated_brain();
    let mut buf = Vec::new();
    BrainWriter::new(false).write_to(tree.root(), &mut buf).unwrap();
    buf.truncate(buf.len() - 10);
    assert!(matches!(
        BrainReader::read_from_bytes(&buf),
        Err(NeuronError::Truncated)
    ));
}

#[test]
fn test_bad_compressed_payload() {
    let header = BrainHeader {
        node_count: 1,
        payload_len: 5,
        ..BrainHeader::new(true)
    };
    let mut buf = Vec::new();
    header.write_to(&mut buf).unwrap();
    // Declares 16 decompressed bytes, then a token promising literals that never come.
    buf.extend_from_slice(&[0x10, 0x00, 0x00, 0x00, 0xFF]);
    assert!(matches!(
        BrainReader::read_from_bytes(&buf),
        Err(NeuronError::Compression(_))
    ));
}

#[test]
fn test_node_count_mismatch_is_corrupt() {
    let root = NeuronNode::new("root", NodeData::new("", NodeType::Root));
    let mut buf = Vec::new();
    BrainWriter::new(false).write_to(&root, &mut buf).unwrap();
    // Patch node_count (bytes 16..24) to a wrong value.
    buf[16..24].copy_from_slice(&7u64.to_le_bytes());
    assert!(matches!(
        BrainReader::read_from_bytes(&buf),
        Err(NeuronError::CorruptData(_))
    ));
}

#[test]
fn test_invalid_magic_file() {
    let tmp = NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), vec![0u8; 64]).unwrap();
    assert!(matches!(
        BrainReader::read_from_file(tmp.path()),
        Err(NeuronError::InvalidMagic)
    ));
}

// ==================== Config Tests ====================

#[test]
fn test_config_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = NeuronConfig {
        brain_path: dir.path().join("me.brain"),
        compress: false,
        migrate_on_load: false,
        pretty_export: true,
    };
    config.save(&path).unwrap();
    assert_eq!(NeuronConfig::load(&path).unwrap(), config);
}

#[test]
fn test_config_partial_file_uses_defaults() {
    let tmp = NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "compress = false\n").unwrap();
    let config = NeuronConfig::load(tmp.path()).unwrap();
    assert!(!config.compress);
    assert_eq!(config.brain_path, NeuronConfig::default().brain_path);
    assert!(config.migrate_on_load);
}

#[test]
fn test_config_invalid_toml() {
    let tmp = NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "compress = = yes").unwrap();
    assert!(matches!(
        NeuronConfig::load(tmp.path()),
        Err(NeuronError::Config(_))
    ));
}
