//! CLI command implementations.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::format::{to_json_string, tree_from_json, BrainReader, BrainWriter};
use crate::memory::{default_brain, migrate_brain, MemoryFacade};
use crate::tree::NeuronTree;
use crate::types::{MemoryTag, NeuronError, NeuronNode, NeuronResult, NodeType};

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// The .brain file to operate on.
    pub path: PathBuf,
    /// LZ4-compress when writing.
    pub compress: bool,
    /// Migrate the brain right after loading it.
    pub migrate_on_load: bool,
    /// Pretty-print exported JSON.
    pub pretty: bool,
    /// Emit JSON instead of text.
    pub json: bool,
}

impl CliContext {
    fn load(&self) -> NeuronResult<NeuronTree> {
        let mut tree = BrainReader::read_from_file(&self.path)?;
        if self.migrate_on_load {
            migrate_brain(&mut tree, &MemoryFacade::new())?;
        }
        Ok(tree)
    }

    fn save(&self, tree: &NeuronTree) -> NeuronResult<()> {
        BrainWriter::new(self.compress).write_to_file(tree.root(), &self.path)
    }
}

/// Create a new brain file with the default layout.
pub fn cmd_init(ctx: &CliContext) -> NeuronResult<()> {
    if let Some(parent) = ctx.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tree = default_brain(&MemoryFacade::new())?;
    ctx.save(&tree)?;
    println!("Created {} ({} nodes)", ctx.path.display(), tree.len());
    Ok(())
}

/// Display information about a brain file.
pub fn cmd_info(ctx: &CliContext) -> NeuronResult<()> {
    let header = BrainReader::read_header(&ctx.path)?;
    let tree = BrainReader::read_from_file(&ctx.path)?;
    let file_size = std::fs::metadata(&ctx.path)?.len();

    let mut type_counts: Vec<(String, usize)> = Vec::new();
    for node in &tree {
        let name = node.node_type().name();
        match type_counts.iter_mut().find(|(n, _)| n == name) {
            Some((_, count)) => *count += 1,
            None => type_counts.push((name.to_string(), 1)),
        }
    }
    let tags_present: Vec<&str> = MemoryTag::ALL
        .iter()
        .filter(|tag| tree.contains(tag.node_id()))
        .map(|tag| tag.name())
        .collect();

    if ctx.json {
        let types: serde_json::Map<String, Value> = type_counts
            .iter()
            .map(|(name, count)| (name.clone(), Value::from(*count)))
            .collect();
        let info = serde_json::json!({
            "file": ctx.path.display().to_string(),
            "version": header.version,
            "compressed": header.is_compressed(),
            "saved_at": header.saved_at,
            "nodes": tree.len(),
            "file_size": file_size,
            "node_types": types,
            "tags": tags_present,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        println!("File: {}", ctx.path.display());
        println!("Version: {}", header.version);
        println!("Compressed: {}", header.is_compressed());
        println!("Saved: {}", format_timestamp(header.saved_at));
        println!("Nodes: {}", tree.len());
        println!("File size: {}", format_size(file_size));
        println!("Node types:");
        for (name, count) in &type_counts {
            println!("  {}: {}", name, count);
        }
        println!("Tags: {}", tags_present.join(", "));
    }
    Ok(())
}

/// Print the tree as an indented outline.
pub fn cmd_tree(ctx: &CliContext) -> NeuronResult<()> {
    let tree = ctx.load()?;
    if ctx.json {
        println!("{}", to_json_string(tree.root(), true)?);
    } else {
        print!("{}", tree.render());
    }
    Ok(())
}

/// List every registered id with its positional path.
pub fn cmd_ids(ctx: &CliContext) -> NeuronResult<()> {
    let tree = ctx.load()?;
    let rows: Vec<(&str, String)> = tree
        .ids()
        .into_iter()
        .map(|id| (id, tree.node_path(id).unwrap_or_default()))
        .collect();

    if ctx.json {
        let list: Vec<Value> = rows
            .iter()
            .map(|(id, path)| serde_json::json!({"id": id, "path": path}))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&list).unwrap_or_default()
        );
    } else {
        println!("Registered node ids:");
        for (id, path) in rows {
            println!("  {:<40} {}", id, path);
        }
    }
    Ok(())
}

/// Get a specific node by id.
pub fn cmd_get(ctx: &CliContext, id: &str) -> NeuronResult<()> {
    let tree = ctx.load()?;
    let node = tree
        .get_node(id)
        .ok_or_else(|| NeuronError::NodeNotFound(id.to_string()))?;
    print_node(ctx, &tree, node);
    Ok(())
}

/// Create the memory node for a tag.
pub fn cmd_remember(ctx: &CliContext, tag: MemoryTag, data: &str) -> NeuronResult<()> {
    let data = parse_argument(data)?;
    // No migration here: it would create the tag before we do.
    let mut tree = BrainReader::read_from_file(&ctx.path)?;
    let node = MemoryFacade::new().create_new_memory(&mut tree, tag, &data)?;
    ctx.save(&tree)?;

    if ctx.json {
        println!("{}", serde_json::json!({"id": node.id(), "tag": tag.name()}));
    } else {
        println!("Created memory '{}' in {}", node.id(), ctx.path.display());
    }
    Ok(())
}

/// Replace the content of an existing tag memory.
pub fn cmd_update(ctx: &CliContext, tag: MemoryTag, data: &str) -> NeuronResult<()> {
    let data = parse_argument(data)?;
    let mut tree = ctx.load()?;
    MemoryFacade::new().update_memory(&mut tree, tag, &data)?;
    ctx.save(&tree)?;

    if ctx.json {
        println!("{}", serde_json::json!({"id": tag.node_id(), "updated": true}));
    } else {
        println!("Updated memory '{}'", tag.node_id());
    }
    Ok(())
}

/// Print the decoded content of a tag memory.
pub fn cmd_recall(ctx: &CliContext, tag: MemoryTag) -> NeuronResult<()> {
    let tree = ctx.load()?;
    let value = MemoryFacade::new().read_memory(&tree, tag)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&value).unwrap_or_default()
    );
    Ok(())
}

/// Append a chat entry.
pub fn cmd_chat(ctx: &CliContext, data: &str) -> NeuronResult<()> {
    let data = parse_argument(data)?;
    let mut tree = ctx.load()?;
    let node = MemoryFacade::new().add_new_chat(&mut tree, &data)?;
    ctx.save(&tree)?;

    if ctx.json {
        println!("{}", serde_json::json!({"id": node.id()}));
    } else {
        println!("Added chat {}", node.id());
    }
    Ok(())
}

/// Remove a node and everything below it.
pub fn cmd_remove(ctx: &CliContext, id: &str) -> NeuronResult<()> {
    let mut tree = ctx.load()?;
    let removed = tree.remove_node(id)?;
    ctx.save(&tree)?;

    let count = removed.subtree_len();
    if ctx.json {
        println!("{}", serde_json::json!({"id": id, "removed_nodes": count}));
    } else {
        println!("Removed '{}' ({} nodes)", id, count);
    }
    Ok(())
}

/// Bring an older brain up to the current layout.
pub fn cmd_migrate(ctx: &CliContext) -> NeuronResult<()> {
    let mut tree = BrainReader::read_from_file(&ctx.path)?;
    let report = migrate_brain(&mut tree, &MemoryFacade::new())?;
    if !report.is_empty() {
        ctx.save(&tree)?;
    }

    let tags: Vec<&str> = report.added_tags.iter().map(|t| t.node_id()).collect();
    if ctx.json {
        let info = serde_json::json!({
            "added_operators": report.added_operators,
            "added_tags": tags,
        });
        println!("{}", info);
    } else if report.is_empty() {
        println!("Brain is up to date");
    } else {
        println!("Added operators: {}", report.added_operators.join(", "));
        println!("Added tags: {}", tags.join(", "));
    }
    Ok(())
}

/// Export the tree as schema JSON, to stdout or a file.
pub fn cmd_export(ctx: &CliContext, output: Option<&Path>) -> NeuronResult<()> {
    let tree = ctx.load()?;
    let text = to_json_string(tree.root(), ctx.pretty)?;
    match output {
        Some(out) => {
            std::fs::write(out, text)?;
            println!("Exported {} nodes to {}", tree.len(), out.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

/// Replace the brain with a tree read from schema JSON.
pub fn cmd_import(ctx: &CliContext, json_path: &Path) -> NeuronResult<()> {
    let bytes = std::fs::read(json_path)?;
    let tree = tree_from_json(&bytes)?;
    ctx.save(&tree)?;
    println!("Imported {} nodes into {}", tree.len(), ctx.path.display());
    Ok(())
}

fn parse_argument(data: &str) -> NeuronResult<Value> {
    serde_json::from_str(data)
        .map_err(|e| NeuronError::CorruptData(format!("invalid JSON argument: {}", e)))
}

fn print_node(ctx: &CliContext, tree: &NeuronTree, node: &NeuronNode) {
    let path = tree.node_path(node.id()).unwrap_or_default();
    if ctx.json {
        let content = serde_json::from_str::<Value>(node.content())
            .unwrap_or_else(|_| Value::String(node.content().to_string()));
        let info = serde_json::json!({
            "id": node.id(),
            "type": node.node_type().name(),
            "path": path,
            "content": content,
            "children": node.children().len(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        println!("Node {}", node.id());
        println!("  Type: {}", node.node_type());
        if let NodeType::Other(_) = node.node_type() {
            println!("  (unrecognized type, preserved as-is)");
        }
        println!("  Path: {}", path);
        println!("  Content: {:?}", node.content());
        println!("  Children: {}", node.children().len());
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

fn format_timestamp(micros: u64) -> String {
    let secs = (micros / 1_000_000) as i64;
    let dt = chrono::DateTime::from_timestamp(secs, 0);
    match dt {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{} us", micros),
    }
}
