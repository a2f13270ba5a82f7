//! LZ4 payload compression/decompression.

use crate::types::error::{NeuronError, NeuronResult};

/// Compress payload bytes with LZ4 (prepend size for decompression).
pub fn compress_payload(payload: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(payload)
}

/// Decompress LZ4-compressed payload bytes.
pub fn decompress_payload(data: &[u8]) -> NeuronResult<Vec<u8>> {
    lz4_flex::decompress_size_prepended(data).map_err(|e| NeuronError::Compression(e.to_string()))
}
