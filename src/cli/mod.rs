//! CLI module for the `bookrag` binary
//!
//! Argument parsing, command handlers and output formatting.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::*;
pub use handlers::*;
pub use output::*;
