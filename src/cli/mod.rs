//! Command implementations behind the `nmem` binary.

pub mod commands;

pub use commands::CliContext;
