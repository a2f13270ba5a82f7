//! Domain layer — tag memories, chat history and the brain layout.

pub mod facade;
pub mod layout;

pub use facade::{decode, HistoryLocator, MemoryFacade, NamedHistory};
pub use layout::{default_brain, migrate_brain, MigrationReport};

/// Id of the tree root.
pub const ROOT_ID: &str = "root";
/// Operator holding chat entries.
pub const CHAT_HISTORY_ID: &str = "chatHistory";
/// Operator holding one node per memory tag.
pub const MEMORY_HISTORY_ID: &str = "memoryHistory";
/// Operator holding model state.
pub const MODEL_STATE_ID: &str = "modelState";
/// Operator holding system log sessions.
pub const SYSTEM_LOGS_ID: &str = "systemLogs";
/// Operator holding saved text-to-speech clips.
pub const SAVED_TTS_ID: &str = "savedTTS";
