//! Command dispatch
//!
//! Turns a parsed [`Command`] into calls on a [`CommitteeSession`].
//! Delegates may be named by id or by country; every other record is named
//! by its id or any unambiguous prefix of it.

use crate::cli::commands::{
    AmendmentCommand, Command, CommitteeCommand, ConferenceCommand, DelegateCommand,
    FeedbackCommand, MotionCommand, ResolutionCommand, RightKind, RightsArgs, RollCallCommand,
    ScoreArgs, SessionCommand, SpeakerCommand, StrikeCommand, TargetKind, VoteCommand,
};
use dais_application::CommitteeSession;
use dais_domain::{
    Amendment, CommitteeState, DecidedStatus, Delegate, DelegateCriterion, DelegateId,
    DelegateUpdate, DomainError, FeedbackKind, MotionKind, PaperCriterion, Resolution,
    RollCallStatus, ScoreUpdate, ScoreValue, SessionRecord, VoteChoice, VoteOutcome, VoteTarget,
    voting_eligibility,
};
use thiserror::Error;

/// Errors raised while interpreting command arguments.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("No {kind} matches '{input}'")]
    NotFound { kind: &'static str, input: String },

    #[error("'{input}' matches more than one {kind}; use more of the id")]
    Ambiguous { kind: &'static str, input: String },

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("{0}")]
    Usage(String),
}

impl CommandError {
    fn not_found(kind: &'static str, input: &str) -> Self {
        CommandError::NotFound {
            kind,
            input: input.to_string(),
        }
    }
}

/// What a command produced, for the formatter to render.
#[derive(Debug)]
pub enum Outcome {
    /// Render the active committee
    Status,
    Conferences,
    Delegates,
    Motions,
    Resolutions,
    Presets(Vec<String>),
    Tally,
    /// State changed
    Changed(String),
    /// The request was valid but nothing needed to change
    Unchanged(String),
    VoteEnded(VoteOutcome),
    SessionArchived(SessionRecord),
    Suggested(Option<Delegate>),
}

/// Apply one command to the session.
pub fn execute(session: &mut CommitteeSession, command: Command) -> Result<Outcome, CommandError> {
    match command {
        Command::Status => {
            session.check_overtime();
            Ok(Outcome::Status)
        }
        Command::Conference(cmd) => conference(session, cmd),
        Command::Committee(cmd) => committee(session, cmd),
        Command::Delegate(cmd) => delegate(session, cmd),
        Command::RollCall(cmd) => roll_call(session, cmd),
        Command::Rights(args) => rights(session, args),
        Command::Strike(cmd) => strike(session, cmd),
        Command::Feedback(cmd) => feedback(session, cmd),
        Command::Score(args) => score(session, args),
        Command::Emoji { delegation, emoji } => {
            let changed = session.set_emoji_override(&delegation, emoji.as_deref());
            Ok(report(
                changed,
                format!("Emoji for {} updated", delegation.trim()),
                "Emoji unchanged",
            ))
        }
        Command::Motion(cmd) => motion(session, cmd),
        Command::Resolution(cmd) => resolution(session, cmd),
        Command::Amendment(cmd) => amendment(session, cmd),
        Command::Vote(cmd) => vote(session, cmd),
        Command::Speaker(cmd) => speaker(session, cmd),
        Command::Session(cmd) => timer(session, cmd),
    }
}

fn report(changed: bool, done: impl Into<String>, unchanged: impl Into<String>) -> Outcome {
    if changed {
        Outcome::Changed(done.into())
    } else {
        Outcome::Unchanged(unchanged.into())
    }
}

// ==================== Conferences ====================

fn conference(
    session: &mut CommitteeSession,
    cmd: ConferenceCommand,
) -> Result<Outcome, CommandError> {
    match cmd {
        ConferenceCommand::List => Ok(Outcome::Conferences),
        ConferenceCommand::Add { name } => {
            let id = session.add_conference(&name);
            Ok(Outcome::Changed(format!(
                "Created conference '{}' ({})",
                session.active_conference().name,
                id
            )))
        }
        ConferenceCommand::Remove { conference } => {
            let (id, name) = find_conference(session, &conference)?;
            let removed = session.remove_conference(&id);
            Ok(report(
                removed,
                format!(
                    "Removed '{}'; active conference is '{}'",
                    name,
                    session.active_conference().name
                ),
                "Conference not removed",
            ))
        }
        ConferenceCommand::Rename { conference, name } => {
            let (id, old) = find_conference(session, &conference)?;
            let renamed = session.rename_conference(&id, &name);
            Ok(report(
                renamed,
                format!("Renamed '{}' to '{}'", old, name.trim()),
                "Conference names cannot be blank",
            ))
        }
        ConferenceCommand::Switch { conference } => {
            let (id, name) = find_conference(session, &conference)?;
            let switched = session.book().active_id() != &id && session.switch_conference(&id);
            Ok(report(
                switched,
                format!("Switched to '{}'", name),
                format!("'{}' is already active", name),
            ))
        }
    }
}

fn find_conference(
    session: &CommitteeSession,
    input: &str,
) -> Result<(dais_domain::ConferenceId, String), CommandError> {
    let conferences = session.book().conferences();
    if let Some(c) = conferences
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(input.trim()))
    {
        return Ok((c.id.clone(), c.name.clone()));
    }
    let c = by_id(conferences, |c| c.id.as_str(), input, "conference")?;
    Ok((c.id.clone(), c.name.clone()))
}

// ==================== Committee & delegates ====================

fn committee(
    session: &mut CommitteeSession,
    cmd: CommitteeCommand,
) -> Result<Outcome, CommandError> {
    match cmd {
        CommitteeCommand::Name { name } => {
            session.set_committee_name(&name);
            Ok(Outcome::Changed(format!(
                "Committee is now '{}'",
                session.state().committee_name()
            )))
        }
        CommitteeCommand::Presets => Ok(Outcome::Presets(session.preset_committees())),
        CommitteeCommand::Import { committee } => {
            if !session
                .preset_committees()
                .iter()
                .any(|c| c.eq_ignore_ascii_case(committee.trim()))
            {
                return Err(CommandError::not_found("preset committee", &committee));
            }
            let added = session.import_roster(&committee);
            Ok(report(
                !added.is_empty(),
                format!("Seated {} delegations from {}", added.len(), committee),
                format!("Every {} delegation is already seated", committee),
            ))
        }
    }
}

fn delegate(session: &mut CommitteeSession, cmd: DelegateCommand) -> Result<Outcome, CommandError> {
    match cmd {
        DelegateCommand::List => Ok(Outcome::Delegates),
        DelegateCommand::Add {
            country,
            name,
            email,
        } => {
            let added = session.add_delegate(&country, name.as_deref(), email.as_deref());
            Ok(report(
                added.is_some(),
                format!("Seated {}", country.trim()),
                "A delegation needs a country name",
            ))
        }
        DelegateCommand::Update {
            delegate,
            country,
            name,
            email,
        } => {
            let id = resolve_delegate(session.state(), &delegate)?;
            let mut update = DelegateUpdate::new();
            if let Some(country) = country {
                update = update.country(country);
            }
            if let Some(name) = name {
                update = update.name(Some(name).filter(|n| !n.trim().is_empty()));
            }
            if let Some(email) = email {
                update = update.email(Some(email).filter(|e| !e.trim().is_empty()));
            }
            let changed = session.update_delegate(&id, update);
            Ok(report(
                changed,
                format!("Updated {}", delegate),
                "Nothing to update",
            ))
        }
        DelegateCommand::Remove { delegate } => {
            let id = resolve_delegate(session.state(), &delegate)?;
            let removed = session.remove_delegate(&id);
            Ok(report(
                removed,
                format!("Removed {} and their records", delegate),
                "Delegate not removed",
            ))
        }
    }
}

fn roll_call(session: &mut CommitteeSession, cmd: RollCallCommand) -> Result<Outcome, CommandError> {
    match cmd {
        RollCallCommand::Mark { delegate, status } => {
            let id = resolve_delegate(session.state(), &delegate)?;
            let status: RollCallStatus = status.parse()?;
            let changed = session.set_roll_call(&id, status);
            Ok(report(
                changed,
                format!("{} is {}", delegate, status),
                format!("{} was already {}", delegate, status),
            ))
        }
        RollCallCommand::AllPresent => {
            let marked = session.mark_all_present();
            Ok(report(
                marked > 0,
                format!("Marked {} delegations present", marked),
                "No delegation was absent",
            ))
        }
        RollCallCommand::Complete { reopen } => {
            let changed = session.set_roll_call_complete(!reopen);
            let (done, already) = if reopen {
                ("Roll call reopened", "Roll call is already open")
            } else {
                ("Roll call complete", "Roll call was already complete")
            };
            Ok(report(changed, done, already))
        }
    }
}

fn rights(session: &mut CommitteeSession, args: RightsArgs) -> Result<Outcome, CommandError> {
    let id = resolve_delegate(session.state(), &args.delegate)?;
    let revoked = !args.restore;
    let changed = match args.right {
        RightKind::Voting => session.set_voting_rights_revoked(&id, revoked),
        RightKind::Speaking => session.set_speaking_rights_revoked(&id, revoked),
    };
    let right = match args.right {
        RightKind::Voting => "voting",
        RightKind::Speaking => "speaking",
    };
    let verb = if revoked { "revoked" } else { "restored" };
    Ok(report(
        changed,
        format!("{} rights {} for {}", right, verb, args.delegate),
        format!("{} rights were already {}", right, verb),
    ))
}

fn strike(session: &mut CommitteeSession, cmd: StrikeCommand) -> Result<Outcome, CommandError> {
    match cmd {
        StrikeCommand::Add { delegate, kind } => {
            let id = resolve_delegate(session.state(), &delegate)?;
            let added = session.add_strike(&id, &kind);
            let count = session.state().strike_count(&id, kind.trim());
            Ok(report(
                added,
                format!("{} now has {} '{}' strike(s)", delegate, count, kind.trim()),
                "A strike needs a kind",
            ))
        }
        StrikeCommand::Remove { delegate, kind } => {
            let id = resolve_delegate(session.state(), &delegate)?;
            let removed = session.remove_strike(&id, &kind);
            Ok(report(
                removed,
                format!("Retracted a '{}' strike from {}", kind.trim(), delegate),
                format!("{} has no '{}' strikes", delegate, kind.trim()),
            ))
        }
    }
}

fn feedback(session: &mut CommitteeSession, cmd: FeedbackCommand) -> Result<Outcome, CommandError> {
    match cmd {
        FeedbackCommand::Add {
            delegate,
            kind,
            reason,
        } => {
            let id = resolve_delegate(session.state(), &delegate)?;
            let kind: FeedbackKind = kind.parse()?;
            let added = session.add_feedback(&id, kind, &reason);
            Ok(match added {
                Some(feedback_id) => {
                    Outcome::Changed(format!("Recorded {} for {} ({})", kind, delegate, feedback_id))
                }
                None => Outcome::Unchanged("Feedback not recorded".into()),
            })
        }
        FeedbackCommand::Edit { feedback, reason } => {
            let id = by_id(session.state().feedback(), |f| f.id.as_str(), &feedback, "feedback")?
                .id
                .clone();
            let edited = session.edit_feedback(&id, &reason);
            Ok(report(edited, "Feedback updated", "Feedback unchanged"))
        }
        FeedbackCommand::Delete { feedback } => {
            let id = by_id(session.state().feedback(), |f| f.id.as_str(), &feedback, "feedback")?
                .id
                .clone();
            let deleted = session.delete_feedback(&id);
            Ok(report(deleted, "Feedback deleted", "Feedback not deleted"))
        }
    }
}

fn score(session: &mut CommitteeSession, args: ScoreArgs) -> Result<Outcome, CommandError> {
    let id = resolve_delegate(session.state(), &args.delegate)?;
    let mut update = ScoreUpdate::new();
    for pair in &args.criteria {
        let (name, value) = split_score(pair)?;
        update = update.delegate(name.parse::<DelegateCriterion>()?, value);
    }
    for pair in &args.paper {
        let (name, value) = split_score(pair)?;
        update = update.paper(name.parse::<PaperCriterion>()?, value);
    }
    if let Some(evidence) = args.evidence {
        update = update.evidence(evidence);
    }
    if let Some(justification) = args.justification {
        update = update.justification(justification);
    }

    let changed = session.set_score(&id, update);
    Ok(report(
        changed,
        format!("Scores updated for {}", args.delegate),
        "Nothing to score",
    ))
}

fn split_score(pair: &str) -> Result<(&str, ScoreValue), CommandError> {
    let (name, value) = pair
        .split_once('=')
        .ok_or_else(|| CommandError::Usage(format!("Expected NAME=VALUE, got '{}'", pair)))?;
    let value: u8 = value
        .trim()
        .parse()
        .map_err(|_| CommandError::Usage(format!("'{}' is not a score", value.trim())))?;
    Ok((name, ScoreValue::try_from(value)?))
}

// ==================== Floor ====================

fn motion(session: &mut CommitteeSession, cmd: MotionCommand) -> Result<Outcome, CommandError> {
    match cmd {
        MotionCommand::List => Ok(Outcome::Motions),
        MotionCommand::Add {
            text,
            point,
            submitter,
            preset,
        } => {
            let kind = if point {
                MotionKind::Point
            } else {
                MotionKind::Motion
            };
            let added = session.add_motion(&text, kind, submitter.as_deref(), preset.as_deref());
            Ok(match added.and_then(|id| session.state().motion(&id)) {
                Some(motion) => Outcome::Changed(format!(
                    "Added {} ({}, {})",
                    motion.kind,
                    motion.id,
                    motion.majority().label
                )),
                None => Outcome::Unchanged("Motion text cannot be blank".into()),
            })
        }
        MotionCommand::Star { motion } => {
            let id = by_id(session.state().motions(), |m| m.id.as_str(), &motion, "motion")?
                .id
                .clone();
            Ok(match session.toggle_motion_star(&id) {
                Some(true) => Outcome::Changed("Starred".into()),
                Some(false) => Outcome::Changed("Unstarred".into()),
                None => Outcome::Unchanged("Motion not found".into()),
            })
        }
        MotionCommand::Table { motion } => {
            let id = by_id(session.state().motions(), |m| m.id.as_str(), &motion, "motion")?
                .id
                .clone();
            let tabled = session.table_motion(&id);
            Ok(report(tabled, "Motion tabled", "Only active motions can be tabled"))
        }
        MotionCommand::Remove { motion } => {
            let id = by_id(session.state().motions(), |m| m.id.as_str(), &motion, "motion")?
                .id
                .clone();
            let removed = session.remove_motion(&id);
            Ok(report(removed, "Motion removed", "Motion not removed"))
        }
    }
}

fn parse_decided(input: &str) -> Result<Option<DecidedStatus>, CommandError> {
    match input.trim().to_lowercase().as_str() {
        "passed" | "pass" => Ok(Some(DecidedStatus::Passed)),
        "failed" | "fail" => Ok(Some(DecidedStatus::Failed)),
        "clear" | "pending" => Ok(None),
        other => Err(CommandError::Usage(format!(
            "Unknown status '{}' (use passed, failed, or clear)",
            other
        ))),
    }
}

fn resolution(
    session: &mut CommitteeSession,
    cmd: ResolutionCommand,
) -> Result<Outcome, CommandError> {
    match cmd {
        ResolutionCommand::List => Ok(Outcome::Resolutions),
        ResolutionCommand::Add {
            title,
            main_submitters,
            co_submitters,
            link,
        } => {
            let mut draft = Resolution::new(title)
                .with_main_submitters(main_submitters)
                .with_co_submitters(co_submitters);
            if let Some(link) = link {
                draft = draft.with_link(link);
            }
            Ok(match session.add_resolution(draft) {
                Some(id) => Outcome::Changed(format!("Introduced draft resolution {}", id)),
                None => Outcome::Unchanged("A draft resolution needs a title".into()),
            })
        }
        ResolutionCommand::Status { resolution, status } => {
            let id = by_id(
                session.state().resolutions(),
                |r| r.id.as_str(),
                &resolution,
                "resolution",
            )?
            .id
            .clone();
            let status = parse_decided(&status)?;
            let changed = session.set_resolution_status(&id, status);
            Ok(report(changed, "Resolution status set", "Status unchanged"))
        }
        ResolutionCommand::Remove { resolution } => {
            let id = by_id(
                session.state().resolutions(),
                |r| r.id.as_str(),
                &resolution,
                "resolution",
            )?
            .id
            .clone();
            let removed = session.remove_resolution(&id);
            Ok(report(removed, "Resolution removed", "Resolution not removed"))
        }
    }
}

fn amendment(
    session: &mut CommitteeSession,
    cmd: AmendmentCommand,
) -> Result<Outcome, CommandError> {
    match cmd {
        AmendmentCommand::Add {
            resolution,
            title,
            main_submitters,
            co_submitters,
            link,
        } => {
            let resolution_id = by_id(
                session.state().resolutions(),
                |r| r.id.as_str(),
                &resolution,
                "resolution",
            )?
            .id
            .clone();
            let mut draft = Amendment::new(title)
                .for_resolution(resolution_id)
                .with_main_submitters(main_submitters)
                .with_co_submitters(co_submitters);
            if let Some(link) = link {
                draft = draft.with_link(link);
            }
            Ok(match session.add_amendment(draft) {
                Some(id) => Outcome::Changed(format!("Proposed amendment {}", id)),
                None => Outcome::Unchanged("An amendment needs a title".into()),
            })
        }
        AmendmentCommand::Status { amendment, status } => {
            let id = by_id(
                session.state().amendments(),
                |a| a.id.as_str(),
                &amendment,
                "amendment",
            )?
            .id
            .clone();
            let status = parse_decided(&status)?;
            let changed = session.set_amendment_status(&id, status);
            Ok(report(changed, "Amendment status set", "Status unchanged"))
        }
        AmendmentCommand::Remove { amendment } => {
            let id = by_id(
                session.state().amendments(),
                |a| a.id.as_str(),
                &amendment,
                "amendment",
            )?
            .id
            .clone();
            let removed = session.remove_amendment(&id);
            Ok(report(removed, "Amendment removed", "Amendment not removed"))
        }
    }
}

// ==================== Voting ====================

fn vote(session: &mut CommitteeSession, cmd: VoteCommand) -> Result<Outcome, CommandError> {
    match cmd {
        VoteCommand::Start { kind, target } => {
            let state = session.state();
            let target = match kind {
                TargetKind::Motion => VoteTarget::Motion(
                    by_id(state.motions(), |m| m.id.as_str(), &target, "motion")?
                        .id
                        .clone(),
                ),
                TargetKind::Resolution => VoteTarget::Resolution(
                    by_id(state.resolutions(), |r| r.id.as_str(), &target, "resolution")?
                        .id
                        .clone(),
                ),
                TargetKind::Amendment => VoteTarget::Amendment(
                    by_id(state.amendments(), |a| a.id.as_str(), &target, "amendment")?
                        .id
                        .clone(),
                ),
            };
            let label = target.to_string();
            let started = session.start_vote(target);
            Ok(report(
                started,
                format!("Voting open on {}", label),
                "Only active motions, resolutions and amendments can be voted on",
            ))
        }
        VoteCommand::Cast { delegate, choice } => {
            let id = resolve_delegate(session.state(), &delegate)?;
            let choice: VoteChoice = choice.parse()?;
            let eligible = session
                .state()
                .delegate(&id)
                .is_some_and(|d| voting_eligibility(d).allows(choice));
            let recorded = session.record_vote(&id, choice);
            let note = if eligible {
                String::new()
            } else {
                " (not an eligible ballot at roll call)".to_string()
            };
            Ok(report(
                recorded,
                format!("{} votes {}{}", delegate, choice, note),
                "No vote is open",
            ))
        }
        VoteCommand::Clear { delegate } => {
            let id = resolve_delegate(session.state(), &delegate)?;
            let cleared = session.clear_vote(&id);
            Ok(report(
                cleared,
                format!("Withdrew {}'s ballot", delegate),
                format!("{} has no ballot to withdraw", delegate),
            ))
        }
        VoteCommand::Tally => Ok(Outcome::Tally),
        VoteCommand::End => Ok(match session.end_vote() {
            Some(outcome) => Outcome::VoteEnded(outcome),
            None => Outcome::Unchanged("No vote is open".into()),
        }),
        VoteCommand::Cancel => Ok(match session.cancel_vote() {
            Some(target) => Outcome::Changed(format!("Discarded the vote on {}", target)),
            None => Outcome::Unchanged("No vote is open".into()),
        }),
    }
}

// ==================== Speakers ====================

fn speaker(session: &mut CommitteeSession, cmd: SpeakerCommand) -> Result<Outcome, CommandError> {
    match cmd {
        SpeakerCommand::Add { delegate } => {
            let id = resolve_delegate(session.state(), &delegate)?;
            let added = session.add_to_speakers(&id);
            Ok(report(
                added.is_some(),
                format!("{} added to the speakers list", delegate),
                format!("{} may not speak", delegate),
            ))
        }
        SpeakerCommand::Start { speaker } => {
            let id = resolve_speaker(session.state(), &speaker)?;
            let started = session.set_active_speaker(Some(&id));
            Ok(report(started, format!("{} has the floor", speaker), "Floor unchanged"))
        }
        SpeakerCommand::Stop => {
            let had_floor = session.state().active_speaker().is_some();
            session.set_active_speaker(None);
            Ok(report(had_floor, "Floor closed", "Nobody had the floor"))
        }
        SpeakerCommand::Next => Ok(match session.next_speaker() {
            Some(id) => {
                let country = session
                    .state()
                    .speaker(&id)
                    .map(|s| s.country.clone())
                    .unwrap_or_default();
                Outcome::Changed(format!("{} has the floor", country))
            }
            None => Outcome::Unchanged("No one is next on the speakers list".into()),
        }),
        SpeakerCommand::Remove { speaker } => {
            let id = resolve_speaker(session.state(), &speaker)?;
            let removed = session.remove_from_speakers(&id);
            Ok(report(removed, "Removed from the speakers list", "Speaker not removed"))
        }
        SpeakerCommand::Duration { seconds } => {
            let changed = session.set_speaker_duration(seconds);
            Ok(report(
                changed,
                format!("Speaking time is {}s", seconds),
                "Speaking time must be at least one second",
            ))
        }
        SpeakerCommand::Random => {
            let mut rng = rand::thread_rng();
            let pick = session.pick_random_speaker(&mut rng).cloned();
            Ok(Outcome::Suggested(pick))
        }
    }
}

// ==================== Session timer ====================

fn timer(session: &mut CommitteeSession, cmd: SessionCommand) -> Result<Outcome, CommandError> {
    match cmd {
        SessionCommand::Start => {
            let started = session.start_session();
            Ok(report(started, "Session started", "Session already running"))
        }
        SessionCommand::Pause => {
            let paused = session.pause_session();
            Ok(report(paused, "Session paused", "Session is not running"))
        }
        SessionCommand::Resume => {
            let resumed = session.resume_session();
            Ok(report(resumed, "Session resumed", "Session is not paused"))
        }
        SessionCommand::Stop => Ok(match session.stop_session() {
            Some(record) => Outcome::SessionArchived(record),
            None => Outcome::Unchanged("No session is running".into()),
        }),
        SessionCommand::Duration { minutes } => {
            let minutes = Some(minutes).filter(|m| *m > 0);
            session.set_session_duration(minutes);
            Ok(Outcome::Changed(match minutes {
                Some(m) => format!("Session countdown set to {} min", m),
                None => "Session runs open-ended".to_string(),
            }))
        }
        SessionCommand::Name { name } => {
            session.set_session_name(name.as_deref());
            Ok(Outcome::Changed(match session.state().timer().session_name.as_deref() {
                Some(name) => format!("Session named '{}'", name),
                None => "Session name cleared".to_string(),
            }))
        }
        SessionCommand::DeleteRecord { record } => {
            let id = by_id(
                session.state().timer().session_records.as_slice(),
                |r| r.id.as_str(),
                &record,
                "session record",
            )?
            .id
            .clone();
            let deleted = session.delete_session_record(&id);
            Ok(report(deleted, "Session record deleted", "Record not deleted"))
        }
    }
}

// ==================== Lookup ====================

/// Find an item by exact id, else by a unique id prefix.
fn by_id<'a, T>(
    items: &'a [T],
    id_of: impl Fn(&T) -> &str,
    input: &str,
    kind: &'static str,
) -> Result<&'a T, CommandError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CommandError::not_found(kind, input));
    }
    if let Some(item) = items.iter().find(|item| id_of(item) == input) {
        return Ok(item);
    }

    let mut matches = items.iter().filter(|item| id_of(item).starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item),
        (Some(_), Some(_)) => Err(CommandError::Ambiguous {
            kind,
            input: input.to_string(),
        }),
        (None, _) => Err(CommandError::not_found(kind, input)),
    }
}

/// A delegate by id, country name, or id prefix.
pub fn resolve_delegate(state: &CommitteeState, input: &str) -> Result<DelegateId, CommandError> {
    if let Some(delegate) = state.delegate_by_country(input) {
        return Ok(delegate.id.clone());
    }
    by_id(state.delegates(), |d| d.id.as_str(), input, "delegate").map(|d| d.id.clone())
}

/// A speakers-list entry by id prefix, or the entry of the named delegate.
fn resolve_speaker(
    state: &CommitteeState,
    input: &str,
) -> Result<dais_domain::SpeakerId, CommandError> {
    if let Ok(delegate_id) = resolve_delegate(state, input)
        && let Some(speaker) = state.speakers().iter().find(|s| s.delegate_id == delegate_id)
    {
        return Ok(speaker.id.clone());
    }
    by_id(state.speakers(), |s| s.id.as_str(), input, "speaker").map(|s| s.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::Cli;
    use clap::Parser;
    use dais_application::{Clock, LoadBookUseCase, ManualClock, PersistenceHandle, ReloadMode};
    use dais_domain::{ConferenceBook, DisplayStatus};
    use dais_infrastructure::MemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    // ==================== Helpers ====================

    fn session() -> CommitteeSession {
        CommitteeSession::new(ConferenceBook::new(), Arc::new(ManualClock::new(1_000)))
    }

    fn run(session: &mut CommitteeSession, args: &[&str]) -> Result<Outcome, CommandError> {
        let mut argv = vec!["dais"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        execute(session, cli.command.unwrap())
    }

    fn seat(session: &mut CommitteeSession, countries: &[&str]) {
        for country in countries {
            run(session, &["delegate", "add", country]).unwrap();
        }
    }

    // ==================== Tests ====================

    #[test]
    fn test_delegates_resolve_by_country_case_insensitively() {
        let mut s = session();
        seat(&mut s, &["France"]);
        let outcome = run(&mut s, &["roll-call", "mark", "france", "pv"]).unwrap();
        assert!(matches!(outcome, Outcome::Changed(_)));

        let id = resolve_delegate(s.state(), "FRANCE").unwrap();
        assert_eq!(
            s.state().delegate(&id).unwrap().effective_status(),
            RollCallStatus::PresentAndVoting
        );
    }

    #[test]
    fn test_unknown_delegate_is_an_error() {
        let mut s = session();
        let err = run(&mut s, &["strike", "add", "Atlantis", "phone"]).unwrap_err();
        assert!(matches!(err, CommandError::NotFound { kind: "delegate", .. }));
    }

    #[test]
    fn test_prefix_lookup() {
        let items = vec!["abc123".to_string(), "abd456".to_string()];
        assert_eq!(by_id(&items, |s| s.as_str(), "abc", "item").unwrap(), "abc123");
        assert!(matches!(
            by_id(&items, |s| s.as_str(), "ab", "item"),
            Err(CommandError::Ambiguous { .. })
        ));
        assert!(matches!(
            by_id(&items, |s| s.as_str(), "", "item"),
            Err(CommandError::NotFound { .. })
        ));
    }

    #[test]
    fn test_resolution_vote_flow() {
        let mut s = session();
        seat(&mut s, &["France", "Kenya", "Chile"]);
        run(&mut s, &["resolution", "add", "Water security"]).unwrap();
        let id = s.state().resolutions()[0].id.to_string();

        run(&mut s, &["vote", "start", "resolution", &id]).unwrap();
        run(&mut s, &["vote", "cast", "France", "yes"]).unwrap();
        run(&mut s, &["vote", "cast", "Kenya", "yes"]).unwrap();
        run(&mut s, &["vote", "cast", "Chile", "no"]).unwrap();

        let Outcome::VoteEnded(outcome) = run(&mut s, &["vote", "end"]).unwrap() else {
            panic!("expected a vote outcome");
        };
        assert_eq!(outcome.tally.yes, 2);
        assert_eq!(outcome.status, DisplayStatus::Passed);
    }

    #[test]
    fn test_cast_without_open_vote_is_unchanged() {
        let mut s = session();
        seat(&mut s, &["France"]);
        let outcome = run(&mut s, &["vote", "cast", "France", "yes"]).unwrap();
        assert!(matches!(outcome, Outcome::Unchanged(_)));
    }

    #[test]
    fn test_ineligible_ballot_is_recorded_with_note() {
        let mut s = session();
        seat(&mut s, &["France"]);
        run(&mut s, &["motion", "add", "Unmoderated caucus"]).unwrap();
        let id = s.state().motions()[0].id.to_string();
        run(&mut s, &["roll-call", "mark", "France", "pv"]).unwrap();
        run(&mut s, &["vote", "start", "motion", &id]).unwrap();

        let Outcome::Changed(message) = run(&mut s, &["vote", "cast", "France", "abstain"]).unwrap()
        else {
            panic!("expected the ballot to be recorded");
        };
        assert!(message.contains("not an eligible ballot"));
        assert_eq!(s.state().live_tally().unwrap().abstain, 1);
    }

    #[test]
    fn test_score_parsing() {
        let mut s = session();
        seat(&mut s, &["Kenya"]);
        run(
            &mut s,
            &["score", "Kenya", "--criterion", "speaking=7", "--paper", "citations=5"],
        )
        .unwrap();
        let id = resolve_delegate(s.state(), "Kenya").unwrap();
        let score = s.state().score_for(&id).unwrap();
        assert_eq!(score.delegate_total(), 7);
        assert_eq!(score.paper_total(), 5);

        let err = run(&mut s, &["score", "Kenya", "--criterion", "speaking=9"]).unwrap_err();
        assert!(matches!(err, CommandError::Invalid(DomainError::InvalidScore(9))));
        let err = run(&mut s, &["score", "Kenya", "--criterion", "speaking"]).unwrap_err();
        assert!(matches!(err, CommandError::Usage(_)));
    }

    #[test]
    fn test_speaker_resolves_by_country() {
        let mut s = session();
        seat(&mut s, &["Chile"]);
        run(&mut s, &["speaker", "add", "Chile"]).unwrap();
        run(&mut s, &["speaker", "start", "chile"]).unwrap();
        assert_eq!(s.state().active_speaker().unwrap().country, "Chile");

        let outcome = run(&mut s, &["speaker", "stop"]).unwrap();
        assert!(matches!(outcome, Outcome::Changed(_)));
        let outcome = run(&mut s, &["speaker", "stop"]).unwrap();
        assert!(matches!(outcome, Outcome::Unchanged(_)));
    }

    #[test]
    fn test_conference_lookup_by_name() {
        let mut s = session();
        run(&mut s, &["conference", "add", "Spring MUN"]).unwrap();
        run(&mut s, &["conference", "switch", "my conference"]).unwrap();
        assert_eq!(s.active_conference().name, "My Conference");
        let outcome = run(&mut s, &["conference", "switch", "My Conference"]).unwrap();
        assert!(matches!(outcome, Outcome::Unchanged(_)));
    }

    #[test]
    fn test_session_stop_archives() {
        let mut s = session();
        run(&mut s, &["session", "start"]).unwrap();
        let outcome = run(&mut s, &["session", "stop"]).unwrap();
        let Outcome::SessionArchived(record) = outcome else {
            panic!("expected an archived session");
        };
        assert_eq!(record.name, "Session 1");
        assert!(matches!(
            run(&mut s, &["session", "stop"]).unwrap(),
            Outcome::Unchanged(_)
        ));
    }

    // ==================== Across invocations ====================

    const KEY: &str = "dais/anonymous/conferences";
    const T0: i64 = 1_700_000_000_000;

    /// One CLI invocation: load the stored book, apply a command, flush.
    async fn invoke(
        store: &Arc<MemoryStore>,
        clock: &Arc<ManualClock>,
        args: &[&str],
    ) -> Outcome {
        let loaded = LoadBookUseCase::new(store.clone(), clock.clone())
            .with_reload_mode(ReloadMode::Resume)
            .execute(KEY)
            .await;
        let persistence = PersistenceHandle::spawn(store.clone(), KEY, Duration::from_millis(50));
        let mut s = CommitteeSession::new(loaded.book, clock.clone()).with_persistence(persistence);
        let outcome = run(&mut s, args).unwrap();
        s.shutdown().await;
        outcome
    }

    async fn stored(store: &Arc<MemoryStore>, clock: &Arc<ManualClock>) -> CommitteeState {
        let loaded = LoadBookUseCase::new(store.clone(), clock.clone())
            .with_reload_mode(ReloadMode::Resume)
            .execute(KEY)
            .await;
        assert!(loaded.restored);
        loaded.book.active().data.clone()
    }

    fn changed(outcome: &Outcome) -> &str {
        match outcome {
            Outcome::Changed(message) => message,
            _ => panic!("expected a change"),
        }
    }

    #[tokio::test]
    async fn test_pause_and_resume_span_invocations() {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(T0));

        invoke(&store, &clock, &["session", "start"]).await;
        clock.advance(60_000);
        let paused = invoke(&store, &clock, &["session", "pause"]).await;
        assert_eq!(changed(&paused), "Session paused");
        assert!(stored(&store, &clock).await.timer().is_paused());

        clock.advance(30_000);
        let resumed = invoke(&store, &clock, &["session", "resume"]).await;
        assert_eq!(changed(&resumed), "Session resumed");

        let state = stored(&store, &clock).await;
        assert!(state.timer().is_running());
        assert_eq!(state.timer().session_total_paused_ms, 30_000);
        assert_eq!(state.timer().elapsed_ms(clock.now_ms()), 60_000);
    }

    #[tokio::test]
    async fn test_floor_and_overtime_span_invocations() {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(T0));
        for country in ["France", "Chile"] {
            invoke(&store, &clock, &["delegate", "add", country]).await;
            invoke(&store, &clock, &["speaker", "add", country]).await;
        }

        let first = invoke(&store, &clock, &["speaker", "next"]).await;
        assert_eq!(changed(&first), "France has the floor");
        clock.advance(5_000);
        let second = invoke(&store, &clock, &["speaker", "next"]).await;
        assert_eq!(changed(&second), "Chile has the floor");

        clock.advance(75_000);
        invoke(&store, &clock, &["status"]).await;
        clock.advance(5_000);
        invoke(&store, &clock, &["status"]).await;

        let state = stored(&store, &clock).await;
        let chile = state.delegate_by_country("Chile").unwrap().id.clone();
        assert_eq!(state.active_speaker().map(|s| &s.delegate_id), Some(&chile));
        let concerns: Vec<_> = state.feedback_for(&chile).collect();
        assert_eq!(concerns.len(), 1);
        assert_eq!(concerns[0].reason, dais_domain::OVERTIME_REASON);
    }
}
