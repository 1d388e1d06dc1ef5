//! Output formatter trait

use crate::cli::dispatch::{CommandError, Outcome};
use dais_application::CommitteeSession;

/// Trait for rendering command results
pub trait OutputFormatter {
    /// Render what a command produced, reading the session for context
    fn format(&self, session: &CommitteeSession, outcome: &Outcome) -> String;

    /// Render a command that could not be interpreted
    fn format_error(&self, error: &CommandError) -> String;
}
