//! Criterion benchmarks for NeuronMemory.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::Rng;

use neuron_memory::format::{BrainReader, BrainWriter};
use neuron_memory::memory::{default_brain, MemoryFacade};
use neuron_memory::tree::NeuronTree;
use neuron_memory::types::{MemoryTag, NeuronNode, NodeData, NodeType};

/// Build a random tree of `node_count` nodes with ids `n0..nN`.
fn make_random_tree(node_count: usize) -> NeuronTree {
    let mut rng = rand::thread_rng();
    let root = NeuronNode::new("n0", NodeData::new("", NodeType::Root));
    let mut tree = NeuronTree::new(root).unwrap();
    for i in 1..node_count {
        let parent = format!("n{}", rng.gen_range(0..i));
        let node = NeuronNode::new(
            format!("n{}", i),
            NodeData::new(format!("{{\"seq\":{}}}", i), NodeType::Leaf),
        );
        tree.add_child(&parent, node).unwrap();
    }
    tree
}

fn bench_lookup(c: &mut Criterion) {
    let tree = make_random_tree(10_000);
    let mut rng = rand::thread_rng();
    c.bench_function("get_node_10k", |b| {
        b.iter(|| {
            let id = format!("n{}", rng.gen_range(0..10_000));
            criterion::black_box(tree.get_node(&id));
        })
    });
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("add_child_1k", |b| {
        b.iter(|| make_random_tree(1_000));
    });
}

fn bench_index_build(c: &mut Criterion) {
    let root = make_random_tree(10_000).into_root();
    c.bench_function("index_build_10k", |b| {
        b.iter_batched(
            || root.clone(),
            |root| NeuronTree::new(root).unwrap(),
            BatchSize::LargeInput,
        )
    });
}

fn bench_update_memory(c: &mut Criterion) {
    let facade = MemoryFacade::new();
    let mut tree = default_brain(&facade).unwrap();
    let data = serde_json::json!({"messages": ["a", "b", "c"]});
    c.bench_function("update_memory", |b| {
        b.iter(|| facade.update_memory(&mut tree, MemoryTag::Work, &data).unwrap());
    });
}

fn bench_file_roundtrip(c: &mut Criterion) {
    let tree = make_random_tree(10_000);
    let writer = BrainWriter::new(true);
    c.bench_function("brain_roundtrip_10k", |b| {
        b.iter(|| {
            let mut buf = Vec::new();
            writer.write_to(tree.root(), &mut buf).unwrap();
            BrainReader::read_from_bytes(&buf).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_lookup,
    bench_insert,
    bench_index_build,
    bench_update_memory,
    bench_file_roundtrip
);
criterion_main!(benches);
