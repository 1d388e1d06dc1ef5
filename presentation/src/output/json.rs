//! JSON output for scripts (`--json`)

use crate::cli::dispatch::{CommandError, Outcome};
use crate::output::formatter::OutputFormatter;
use dais_application::CommitteeSession;
use serde_json::{Value, json};

/// Formats results as pretty-printed JSON objects
pub struct JsonFormatter;

impl JsonFormatter {
    /// Build the JSON value for an outcome
    pub fn to_value(session: &CommitteeSession, outcome: &Outcome) -> Value {
        let state = session.state();
        match outcome {
            Outcome::Status => {
                let now = session.now();
                let speaker_remaining = state
                    .active_speaker()
                    .and_then(|s| s.remaining_ms(now, state.speaker_duration()));
                json!({
                    "conference": {
                        "id": session.active_conference().id,
                        "name": session.active_conference().name,
                    },
                    "state": state,
                    "rollCall": state.roll_call_summary(),
                    "liveTally": state.live_tally(),
                    "activeSpeakerRemainingMs": speaker_remaining,
                    "sessionElapsedMs": session.session_elapsed_ms(),
                    "sessionRemainingMs": session.session_remaining_ms(),
                })
            }
            Outcome::Conferences => {
                let active = session.book().active_id();
                let conferences: Vec<Value> = session
                    .book()
                    .conferences()
                    .iter()
                    .map(|c| {
                        json!({
                            "id": c.id,
                            "name": c.name,
                            "active": &c.id == active,
                            "delegates": c.data.delegates().len(),
                        })
                    })
                    .collect();
                json!({ "conferences": conferences })
            }
            Outcome::Delegates => json!({ "delegates": state.delegates() }),
            Outcome::Motions => json!({ "motions": state.motions() }),
            Outcome::Resolutions => json!({
                "resolutions": state.resolutions(),
                "amendments": state.amendments(),
            }),
            Outcome::Presets(names) => json!({ "committees": names }),
            Outcome::Tally => json!({
                "vote": state.current_vote().map(|v| &v.target),
                "tally": state.live_tally(),
            }),
            Outcome::Changed(message) => json!({ "changed": true, "message": message }),
            Outcome::Unchanged(message) => json!({ "changed": false, "message": message }),
            Outcome::VoteEnded(outcome) => json!({ "changed": true, "vote": outcome }),
            Outcome::SessionArchived(record) => json!({ "changed": true, "session": record }),
            Outcome::Suggested(delegate) => json!({ "suggested": delegate }),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, session: &CommitteeSession, outcome: &Outcome) -> String {
        serde_json::to_string_pretty(&Self::to_value(session, outcome))
            .unwrap_or_else(|_| "{}".to_string())
    }

    fn format_error(&self, error: &CommandError) -> String {
        json!({ "error": error.to_string() }).to_string()
    }
}
