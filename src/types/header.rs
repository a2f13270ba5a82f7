//! File header for .brain files.

use std::io::{Read, Write};

use crate::types::error::{NeuronError, NeuronResult};
use crate::types::{BRAIN_MAGIC, FLAG_LZ4, FORMAT_VERSION};

/// Header of a .brain file. Fixed size: 40 bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrainHeader {
    /// Magic bytes: [0x4E, 0x52, 0x54, 0x42] ("NRTB").
    pub magic: [u8; 4],
    /// Format version (currently 1).
    pub version: u32,
    /// Payload flags (bit 0: LZ4).
    pub flags: u32,
    /// Total number of nodes in the stored tree.
    pub node_count: u64,
    /// When the file was written (Unix epoch microseconds).
    pub saved_at: u64,
    /// Length of the payload following the header, in bytes.
    pub payload_len: u64,
}

/// The fixed size of a BrainHeader on disk: 40 bytes.
pub const HEADER_SIZE: u64 = 40;

impl BrainHeader {
    /// Create a new header with default magic and version.
    pub fn new(compressed: bool) -> Self {
        Self {
            magic: BRAIN_MAGIC,
            version: FORMAT_VERSION,
            flags: if compressed { FLAG_LZ4 } else { 0 },
            node_count: 0,
            saved_at: 0,
            payload_len: 0,
        }
    }

    /// Whether the payload is LZ4-compressed.
    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_LZ4 != 0
    }

    /// Write this header to the given writer. Writes exactly 40 bytes.
    ///
    /// Layout (all little-endian):
    /// - 0x00..0x04: magic (4 bytes)
    /// - 0x04..0x08: version (u32)
    /// - 0x08..0x0C: flags (u32)
    /// - 0x0C..0x10: _reserved (u32, written as 0)
    /// - 0x10..0x18: node_count (u64)
    /// - 0x18..0x20: saved_at (u64)
    /// - 0x20..0x28: payload_len (u64)
    pub fn write_to(&self, writer: &mut impl Write) -> NeuronResult<()> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&0u32.to_le_bytes())?; // _reserved
        writer.write_all(&self.node_count.to_le_bytes())?;
        writer.write_all(&self.saved_at.to_le_bytes())?;
        writer.write_all(&self.payload_len.to_le_bytes())?;
        Ok(())
    }

    /// Read a header from the given reader. Reads exactly 40 bytes.
    pub fn read_from(reader: &mut impl Read) -> NeuronResult<Self> {
        let mut buf = [0u8; HEADER_SIZE as usize];
        reader.read_exact(&mut buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                NeuronError::Truncated
            } else {
                NeuronError::Io(e)
            }
        })?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != BRAIN_MAGIC {
            return Err(NeuronError::InvalidMagic);
        }

        let version = read_u32(&buf, 4);
        if version != FORMAT_VERSION {
            return Err(NeuronError::UnsupportedVersion(version));
        }

        // bytes 12..16 are reserved
        Ok(Self {
            magic,
            version,
            flags: read_u32(&buf, 8),
            node_count: read_u64(&buf, 16),
            saved_at: read_u64(&buf, 24),
            payload_len: read_u64(&buf, 32),
        })
    }
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[at..at + 4]);
    u32::from_le_bytes(bytes)
}

fn read_u64(buf: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[at..at + 8]);
    u64::from_le_bytes(bytes)
}
