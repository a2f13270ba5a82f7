//! Writes .brain files from an in-memory tree.

use std::io::Write;
use std::path::Path;

use crate::types::error::NeuronResult;
use crate::types::header::BrainHeader;
use crate::types::{now_micros, NeuronNode};

use super::compression::compress_payload;
use super::json::to_json_bytes;

/// Writer for .brain files.
pub struct BrainWriter {
    compress: bool,
}

impl BrainWriter {
    /// Create a writer; `compress` selects an LZ4 payload.
    pub fn new(compress: bool) -> Self {
        Self { compress }
    }

    /// Write the tree rooted at `root` to a .brain file.
    pub fn write_to_file(&self, root: &NeuronNode, path: &Path) -> NeuronResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(root, &mut writer)?;
        log::debug!("Wrote brain to {}", path.display());
        Ok(())
    }

    /// Write the tree rooted at `root` to any writer.
    pub fn write_to(&self, root: &NeuronNode, writer: &mut impl Write) -> NeuronResult<()> {
        let json = to_json_bytes(root, false)?;
        let payload = if self.compress {
            compress_payload(&json)
        } else {
            json
        };

        let header = BrainHeader {
            node_count: root.subtree_len() as u64,
            saved_at: now_micros(),
            payload_len: payload.len() as u64,
            ..BrainHeader::new(self.compress)
        };
        header.write_to(writer)?;
        writer.write_all(&payload)?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for BrainWriter {
    fn default() -> Self {
        Self::new(true)
    }
}
