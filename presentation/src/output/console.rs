//! Console output formatter for committee state

use crate::cli::dispatch::{CommandError, Outcome};
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use dais_application::CommitteeSession;
use dais_domain::{
    CommitteeState, DisplayStatus, MotionStatus, RollCallStatus, SessionRecord, VoteOutcome,
    VoteTally, VoteTarget,
};

/// Formats committee state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the active committee at a glance
    pub fn format_status(session: &CommitteeSession) -> String {
        let state = session.state();
        let now = session.now();
        let mut output = String::new();

        let title = if state.committee_name().is_empty() {
            session.active_conference().name.clone()
        } else {
            format!(
                "{} | {}",
                state.committee_name(),
                session.active_conference().name
            )
        };
        output.push_str(&Self::header(&title));
        output.push('\n');

        // Session clock
        let timer = state.timer();
        let clock = if !timer.session_started {
            "not started".dimmed().to_string()
        } else {
            let elapsed = Self::clock(session.session_elapsed_ms());
            let mut line = if timer.is_paused() {
                format!("{} {}", "paused at".yellow(), elapsed)
            } else {
                format!("{} {}", "running".green(), elapsed)
            };
            if let Some(remaining) = session.session_remaining_ms() {
                line.push_str(&format!(" ({} left)", Self::clock(remaining)));
            }
            line
        };
        let name = timer.session_name.as_deref().unwrap_or("unnamed");
        output.push_str(&format!(
            "{} {} [{}]\n",
            "Session:".cyan().bold(),
            clock,
            name
        ));

        // Roll call
        let summary = state.roll_call_summary();
        let complete = if state.roll_call_complete() {
            "complete".green().to_string()
        } else {
            "open".yellow().to_string()
        };
        output.push_str(&format!(
            "{} {} present, {} present and voting, {} absent; {} eligible voters ({})\n",
            "Roll call:".cyan().bold(),
            summary.present,
            summary.present_and_voting,
            summary.absent,
            summary.eligible_voters,
            complete
        ));

        // Vote in progress
        if let Some(vote) = state.current_vote() {
            output.push_str(&format!(
                "{} {} {}\n",
                "Voting:".cyan().bold(),
                Self::target_label(state, &vote.target),
                Self::tally(&vote.tally())
            ));
        }

        // Floor
        match state.active_speaker() {
            Some(speaker) => {
                let remaining = speaker
                    .remaining_ms(now, state.speaker_duration())
                    .unwrap_or_default();
                let time = if remaining < 0 {
                    format!("OVER {}", Self::clock(-remaining)).red().bold().to_string()
                } else {
                    format!("{} left", Self::clock(remaining))
                };
                output.push_str(&format!(
                    "{} {} ({})\n",
                    "Floor:".cyan().bold(),
                    Self::with_emoji(session, &speaker.country),
                    time
                ));
            }
            None => output.push_str(&format!("{} {}\n", "Floor:".cyan().bold(), "open".dimmed())),
        }

        let waiting: Vec<String> = state
            .speakers()
            .iter()
            .filter(|s| !s.speaking)
            .map(|s| s.country.clone())
            .collect();
        output.push_str(&format!(
            "{} {} ({}s each)\n",
            "Speakers:".cyan().bold(),
            if waiting.is_empty() {
                "none".to_string()
            } else {
                waiting.join(", ")
            },
            state.speaker_duration()
        ));

        let active: Vec<_> = state
            .motions()
            .iter()
            .filter(|m| m.status == MotionStatus::Active)
            .collect();
        if !active.is_empty() {
            output.push_str(&Self::section_header("Motions on the floor"));
            for motion in active {
                output.push_str(&format!(
                    "  {} {} [{}]\n",
                    Self::short(motion.id.as_str()).dimmed(),
                    motion.text,
                    motion.majority().label
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the conference list, marking the active one
    pub fn format_conferences(session: &CommitteeSession) -> String {
        let active = session.book().active_id();
        let mut output = String::new();
        for conference in session.book().conferences() {
            let marker = if &conference.id == active { "*" } else { " " };
            output.push_str(&format!(
                "{} {}  {} ({} delegates)\n",
                marker.green().bold(),
                Self::short(conference.id.as_str()).dimmed(),
                conference.name,
                conference.data.delegates().len()
            ));
        }
        output
    }

    /// Format delegates with attendance, rights and records
    pub fn format_delegates(session: &CommitteeSession) -> String {
        let state = session.state();
        if state.delegates().is_empty() {
            return format!("{}\n", "No delegates seated".dimmed());
        }

        let mut output = String::new();
        for delegate in state.delegates() {
            let status = match delegate.effective_status() {
                RollCallStatus::Absent => "absent".red().to_string(),
                RollCallStatus::Present => "present".yellow().to_string(),
                RollCallStatus::PresentAndVoting => "present and voting".green().to_string(),
            };
            let mut flags = Vec::new();
            if delegate.voting_rights_revoked {
                flags.push("no vote");
            }
            if delegate.speaking_rights_revoked {
                flags.push("no speech");
            }
            let strikes = state.strikes_for(&delegate.id).count();
            let notes = state.feedback_for(&delegate.id).count();

            output.push_str(&format!(
                "  {}  {:<28} {}",
                Self::short(delegate.id.as_str()).dimmed(),
                Self::with_emoji(session, &delegate.country),
                status
            ));
            if let Some(name) = &delegate.name {
                output.push_str(&format!(" ({})", name));
            }
            if !flags.is_empty() {
                output.push_str(&format!(" [{}]", flags.join(", ")).red().to_string());
            }
            if strikes > 0 {
                output.push_str(&format!(" strikes: {}", strikes));
            }
            if notes > 0 {
                output.push_str(&format!(" notes: {}", notes));
            }
            output.push('\n');
        }
        output
    }

    /// Format every motion and point
    pub fn format_motions(session: &CommitteeSession) -> String {
        let state = session.state();
        if state.motions().is_empty() {
            return format!("{}\n", "The floor is empty".dimmed());
        }

        let mut output = String::new();
        for motion in state.motions() {
            let star = if motion.starred { "*" } else { " " };
            let status = match motion.status {
                MotionStatus::Active => motion.status.as_str().normal(),
                MotionStatus::Passed => motion.status.as_str().green(),
                MotionStatus::Failed => motion.status.as_str().red(),
                MotionStatus::Tabled => motion.status.as_str().dimmed(),
            };
            output.push_str(&format!(
                "{} {}  {:<6} {:<7} {} [{}]",
                star.yellow().bold(),
                Self::short(motion.id.as_str()).dimmed(),
                motion.kind,
                status,
                motion.text,
                motion.majority().label
            ));
            if let Some(submitter) = &motion.submitter {
                output.push_str(&format!(" by {}", submitter));
            }
            if let Some(votes) = &motion.votes {
                output.push_str(&format!(" {}", Self::tally(votes)));
            }
            output.push('\n');
        }
        output
    }

    /// Format draft resolutions with their amendments nested below
    pub fn format_resolutions(session: &CommitteeSession) -> String {
        let state = session.state();
        if state.resolutions().is_empty() && state.amendments().is_empty() {
            return format!("{}\n", "No draft resolutions".dimmed());
        }

        let mut output = String::new();
        for resolution in state.resolutions() {
            output.push_str(&format!(
                "{}  {} {}",
                Self::short(resolution.id.as_str()).dimmed(),
                resolution.title.bold(),
                Self::status(resolution.display_status())
            ));
            if let Some(votes) = &resolution.votes {
                output.push_str(&format!(" {}", Self::tally(votes)));
            }
            output.push('\n');
            if !resolution.main_submitters.is_empty() {
                output.push_str(&format!(
                    "    submitted by {}\n",
                    resolution.main_submitters.join(", ")
                ));
            }
            for amendment in state.amendments_for(&resolution.id) {
                output.push_str(&format!(
                    "    {} {} {}\n",
                    Self::short(amendment.id.as_str()).dimmed(),
                    amendment.title,
                    Self::status(amendment.display_status())
                ));
            }
        }

        // Amendments whose resolution was removed
        let orphans: Vec<_> = state
            .amendments()
            .iter()
            .filter(|a| {
                a.resolution_id
                    .as_ref()
                    .is_none_or(|id| state.resolution(id).is_none())
            })
            .collect();
        if !orphans.is_empty() {
            output.push_str(&Self::section_header("Unattached amendments"));
            for amendment in orphans {
                output.push_str(&format!(
                    "    {} {} {}\n",
                    Self::short(amendment.id.as_str()).dimmed(),
                    amendment.title,
                    Self::status(amendment.display_status())
                ));
            }
        }
        output
    }

    /// Format the result of a closed vote
    pub fn format_vote_outcome(session: &CommitteeSession, outcome: &VoteOutcome) -> String {
        format!(
            "{} {}\n{} {} (needs {})\n",
            "Vote closed:".cyan().bold(),
            Self::target_label(session.state(), &outcome.target),
            Self::status(outcome.status),
            Self::tally(&outcome.tally),
            outcome.required.label
        )
    }

    /// Format an archived session record
    pub fn format_session_record(record: &SessionRecord) -> String {
        format!(
            "{} '{}' ran {} (paused {})\n",
            "Session archived:".cyan().bold(),
            record.name,
            Self::clock(record.duration_seconds * 1000),
            Self::clock(record.total_paused_ms)
        )
    }

    fn target_label(state: &CommitteeState, target: &VoteTarget) -> String {
        let title = match target {
            VoteTarget::Motion(id) => state.motion(id).map(|m| m.text.clone()),
            VoteTarget::Resolution(id) => state.resolution(id).map(|r| r.title.clone()),
            VoteTarget::Amendment(id) => state.amendment(id).map(|a| a.title.clone()),
        };
        match title {
            Some(title) => format!("{} \"{}\"", target.kind_str(), title),
            None => target.to_string(),
        }
    }

    fn tally(tally: &VoteTally) -> String {
        format!(
            "{} {} / {} {} / {} {}",
            "yes".green(),
            tally.yes,
            "no".red(),
            tally.no,
            "abstain".dimmed(),
            tally.abstain
        )
    }

    fn status(status: DisplayStatus) -> String {
        let label = format!("[{}]", status.as_str());
        match status {
            DisplayStatus::Pending => label.yellow().to_string(),
            DisplayStatus::Passed => label.green().bold().to_string(),
            DisplayStatus::Failed => label.red().bold().to_string(),
        }
    }

    fn with_emoji(session: &CommitteeSession, delegation: &str) -> String {
        match session.emoji_for(delegation) {
            Some(emoji) => format!("{} {}", emoji, delegation),
            None => delegation.to_string(),
        }
    }

    /// Render milliseconds as `m:ss`, or `h:mm:ss` past an hour
    pub fn clock(ms: i64) -> String {
        let sign = if ms < 0 { "-" } else { "" };
        let total = ms.unsigned_abs() / 1000;
        let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
        if h > 0 {
            format!("{}{}:{:02}:{:02}", sign, h, m, s)
        } else {
            format!("{}{}:{:02}", sign, m, s)
        }
    }

    fn short(id: &str) -> &str {
        id.get(..8).unwrap_or(id)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, session: &CommitteeSession, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Status => Self::format_status(session),
            Outcome::Conferences => Self::format_conferences(session),
            Outcome::Delegates => Self::format_delegates(session),
            Outcome::Motions => Self::format_motions(session),
            Outcome::Resolutions => Self::format_resolutions(session),
            Outcome::Presets(names) => {
                let mut output = String::new();
                for name in names {
                    output.push_str(&format!("  {}\n", name));
                }
                output
            }
            Outcome::Tally => match session.state().current_vote() {
                Some(vote) => format!(
                    "{} {}\n",
                    Self::target_label(session.state(), &vote.target),
                    Self::tally(&vote.tally())
                ),
                None => format!("{}\n", "No vote is open".dimmed()),
            },
            Outcome::Changed(message) => format!("{} {}\n", "ok".green().bold(), message),
            Outcome::Unchanged(message) => {
                format!("{} {}\n", "unchanged".yellow().bold(), message)
            }
            Outcome::VoteEnded(outcome) => Self::format_vote_outcome(session, outcome),
            Outcome::SessionArchived(record) => Self::format_session_record(record),
            Outcome::Suggested(Some(delegate)) => format!(
                "{} {}\n",
                "Suggested speaker:".cyan().bold(),
                Self::with_emoji(session, &delegate.country)
            ),
            Outcome::Suggested(None) => format!("{}\n", "No delegate may speak".yellow()),
        }
    }

    fn format_error(&self, error: &CommandError) -> String {
        format!("{} {}", "error:".red().bold(), error)
    }
}
