//! Presentation layer for dais
//!
//! This crate contains CLI definitions, command dispatch onto a
//! [`CommitteeSession`](dais_application::CommitteeSession), and output
//! formatters for the console and JSON.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use cli::dispatch::{CommandError, Outcome, execute};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::json::JsonFormatter;
