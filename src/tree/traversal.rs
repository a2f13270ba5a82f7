//! Tree walks (depth-first, pre-order).

use crate::types::NeuronNode;

/// Depth-first pre-order iterator. Siblings are visited in insertion order.
pub struct Preorder<'a> {
    stack: Vec<&'a NeuronNode>,
}

impl<'a> Preorder<'a> {
    /// Start a walk at `start`, which is yielded first.
    pub fn new(start: &'a NeuronNode) -> Self {
        Self { stack: vec![start] }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a NeuronNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push in reverse so the first child is popped next.
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Append `- [id] TYPE content` lines for `node` and its descendants.
pub fn render_subtree(node: &NeuronNode, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("- [{}] {}", node.id(), node.node_type()));
    if !node.content().is_empty() {
        out.push(' ');
        out.push_str(node.content());
    }
    out.push('\n');
    for child in node.children() {
        render_subtree(child, depth + 1, out);
    }
}
