//! Error types for the neuron memory library.

use thiserror::Error;

/// All errors that can occur in the neuron memory library.
#[derive(Error, Debug)]
pub enum NeuronError {
    /// The parent named in an insertion does not exist.
    #[error("Parent node '{0}' not found")]
    ParentNotFound(String),

    /// An inserted id already exists somewhere in the tree.
    #[error("Node id '{0}' already exists in the tree")]
    DuplicateId(String),

    /// Node not found by id.
    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    /// The root node cannot be removed from its own tree.
    #[error("The root node cannot be removed")]
    RootRemoval,

    /// Stored content or a persisted tree could not be decoded.
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Unknown memory category name.
    #[error("Unknown memory tag: {0}")]
    UnknownTag(String),

    /// Invalid magic bytes in file header.
    #[error("Invalid magic bytes in file header")]
    InvalidMagic,

    /// Unsupported format version.
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u32),

    /// File is empty or truncated.
    #[error("File is empty or truncated")]
    Truncated,

    /// Compression error.
    #[error("Compression error: {0}")]
    Compression(String),

    /// A thread panicked while holding the tree lock.
    #[error("Tree lock poisoned")]
    LockPoisoned,

    /// Configuration could not be read or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for neuron memory operations.
pub type NeuronResult<T> = Result<T, NeuronError>;
