//! Reads .brain files into an in-memory tree.

use std::io::Read;
use std::path::Path;

use memmap2::Mmap;

use crate::tree::NeuronTree;
use crate::types::error::{NeuronError, NeuronResult};
use crate::types::header::{BrainHeader, HEADER_SIZE};

use super::compression::decompress_payload;
use super::json::tree_from_json;

/// Reader for .brain files.
pub struct BrainReader;

impl BrainReader {
    /// Read a .brain file into a tree. The file is memory-mapped.
    pub fn read_from_file(path: &Path) -> NeuronResult<NeuronTree> {
        let file = std::fs::File::open(path)?;
        if file.metadata()?.len() < HEADER_SIZE {
            return Err(NeuronError::Truncated);
        }
        // SAFETY: the map is read-only and dropped before returning.
        let mmap = unsafe { Mmap::map(&file)? };
        log::debug!("Mapped {} ({} bytes)", path.display(), mmap.len());
        Self::read_from_bytes(&mmap)
    }

    /// Read from any reader into a tree.
    pub fn read_from(reader: &mut impl Read) -> NeuronResult<NeuronTree> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::read_from_bytes(&data)
    }

    /// Read only the header of a .brain file.
    pub fn read_header(path: &Path) -> NeuronResult<BrainHeader> {
        let mut file = std::fs::File::open(path)?;
        BrainHeader::read_from(&mut file)
    }

    /// Decode a complete .brain image.
    pub fn read_from_bytes(data: &[u8]) -> NeuronResult<NeuronTree> {
        if (data.len() as u64) < HEADER_SIZE {
            return Err(NeuronError::Truncated);
        }
        let header = BrainHeader::read_from(&mut &data[..HEADER_SIZE as usize])?;

        let start = HEADER_SIZE as usize;
        let end = start
            .checked_add(header.payload_len as usize)
            .filter(|&end| end <= data.len())
            .ok_or(NeuronError::Truncated)?;
        let payload = &data[start..end];

        let tree = if header.is_compressed() {
            tree_from_json(&decompress_payload(payload)?)?
        } else {
            tree_from_json(payload)?
        };

        if tree.len() as u64 != header.node_count {
            return Err(NeuronError::CorruptData(format!(
                "header declares {} nodes, payload holds {}",
                header.node_count,
                tree.len()
            )));
        }
        Ok(tree)
    }
}
