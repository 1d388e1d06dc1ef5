//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for dais
#[derive(Parser, Debug)]
#[command(name = "dais")]
#[command(author, version, about = "Chair a Model UN committee from the terminal")]
#[command(long_about = r#"
dais keeps the state of a Model UN committee session: roll call, the
speakers list, motions, draft resolutions and amendments, votes, and the
session clock. Every command loads the saved conferences, applies one
change, and writes the result back.

Configuration files are loaded from (in priority order):
1. DAIS_* environment variables
2. --config <path>     Explicit config file
3. ./dais.toml         Project-level config
4. ~/.config/dais/config.toml   Global config

Example:
  dais delegate add France --name "Jeanne"
  dais roll-call mark France present-and-voting
  dais motion add "Moderated caucus on water security" --preset "Moderated Caucus"
  dais vote start motion 3f2a
  dais vote cast France yes
  dais vote end
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Namespace saved conferences under this user
    #[arg(long, global = true, value_name = "USER")]
    pub user: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep everything in memory; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the active committee at a glance
    Status,

    /// Manage conferences
    #[command(subcommand)]
    Conference(ConferenceCommand),

    /// Committee name and preset rosters
    #[command(subcommand)]
    Committee(CommitteeCommand),

    /// Manage delegates
    #[command(subcommand)]
    Delegate(DelegateCommand),

    /// Take attendance
    #[command(subcommand)]
    RollCall(RollCallCommand),

    /// Revoke or restore a delegate's rights
    Rights(RightsArgs),

    /// Record or retract strikes
    #[command(subcommand)]
    Strike(StrikeCommand),

    /// Compliments and concerns
    #[command(subcommand)]
    Feedback(FeedbackCommand),

    /// Score a delegate
    Score(ScoreArgs),

    /// Override the flag shown for a delegation (omit EMOJI to clear)
    Emoji {
        delegation: String,
        emoji: Option<String>,
    },

    /// Motions and points on the floor
    #[command(subcommand)]
    Motion(MotionCommand),

    /// Draft resolutions
    #[command(subcommand)]
    Resolution(ResolutionCommand),

    /// Amendments to draft resolutions
    #[command(subcommand)]
    Amendment(AmendmentCommand),

    /// Run a vote
    #[command(subcommand)]
    Vote(VoteCommand),

    /// The speakers list
    #[command(subcommand)]
    Speaker(SpeakerCommand),

    /// The committee session clock
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Subcommand, Debug)]
pub enum ConferenceCommand {
    /// List conferences
    List,
    /// Create a conference and switch to it
    Add { name: String },
    /// Delete a conference
    Remove { conference: String },
    /// Rename a conference
    Rename { conference: String, name: String },
    /// Make a conference active
    Switch { conference: String },
}

#[derive(Subcommand, Debug)]
pub enum CommitteeCommand {
    /// Set the committee name
    Name { name: String },
    /// List the preset committees
    Presets,
    /// Seat every delegation of a preset committee
    Import { committee: String },
}

#[derive(Subcommand, Debug)]
pub enum DelegateCommand {
    /// List delegates with attendance and strikes
    List,
    /// Seat a delegation
    Add {
        country: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change a delegate's details
    Update {
        delegate: String,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Remove a delegate and everything recorded about them
    Remove { delegate: String },
}

#[derive(Subcommand, Debug)]
pub enum RollCallCommand {
    /// Record one delegate's attendance
    Mark {
        delegate: String,
        /// absent, present, or present-and-voting (pv)
        status: String,
    },
    /// Mark every absent delegate present
    AllPresent,
    /// Close roll call (or reopen it with --reopen)
    Complete {
        #[arg(long)]
        reopen: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RightKind {
    Voting,
    Speaking,
}

#[derive(Args, Debug)]
pub struct RightsArgs {
    pub delegate: String,
    #[arg(value_enum)]
    pub right: RightKind,
    /// Restore instead of revoke
    #[arg(long)]
    pub restore: bool,
}

#[derive(Subcommand, Debug)]
pub enum StrikeCommand {
    /// Add a strike of the given kind
    Add { delegate: String, kind: String },
    /// Retract the most recent strike of the given kind
    Remove { delegate: String, kind: String },
}

#[derive(Subcommand, Debug)]
pub enum FeedbackCommand {
    /// Record a compliment or concern
    Add {
        delegate: String,
        /// compliment or concern
        kind: String,
        reason: String,
    },
    /// Rewrite a note's reason
    Edit { feedback: String, reason: String },
    /// Delete a note
    Delete { feedback: String },
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    pub delegate: String,
    /// Delegate criterion score, e.g. `speaking=7` (repeatable)
    #[arg(long = "criterion", value_name = "NAME=1..8")]
    pub criteria: Vec<String>,
    /// Position paper criterion score, e.g. `citations=5` (repeatable)
    #[arg(long = "paper", value_name = "NAME=1..8")]
    pub paper: Vec<String>,
    #[arg(long)]
    pub evidence: Option<String>,
    #[arg(long)]
    pub justification: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum MotionCommand {
    /// List motions and points
    List,
    /// Put a motion (or a point with --point) on the floor
    Add {
        text: String,
        #[arg(long)]
        point: bool,
        /// Submitting delegation
        #[arg(long = "by")]
        submitter: Option<String>,
        /// Procedural preset, e.g. "Moderated Caucus" or "Close Debate"
        #[arg(long)]
        preset: Option<String>,
    },
    /// Star or unstar a motion
    Star { motion: String },
    /// Table an active motion
    Table { motion: String },
    /// Remove a motion
    Remove { motion: String },
}

#[derive(Subcommand, Debug)]
pub enum ResolutionCommand {
    /// List draft resolutions and their amendments
    List,
    /// Introduce a draft resolution
    Add {
        title: String,
        #[arg(long = "main", value_name = "DELEGATION")]
        main_submitters: Vec<String>,
        #[arg(long = "co", value_name = "DELEGATION")]
        co_submitters: Vec<String>,
        #[arg(long)]
        link: Option<String>,
    },
    /// Set the outcome by hand (passed, failed, or clear)
    Status { resolution: String, status: String },
    /// Remove a draft resolution
    Remove { resolution: String },
}

#[derive(Subcommand, Debug)]
pub enum AmendmentCommand {
    /// Propose an amendment to a draft resolution
    Add {
        resolution: String,
        title: String,
        #[arg(long = "main", value_name = "DELEGATION")]
        main_submitters: Vec<String>,
        #[arg(long = "co", value_name = "DELEGATION")]
        co_submitters: Vec<String>,
        #[arg(long)]
        link: Option<String>,
    },
    /// Set the outcome by hand (passed, failed, or clear)
    Status { amendment: String, status: String },
    /// Remove an amendment
    Remove { amendment: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetKind {
    Motion,
    Resolution,
    Amendment,
}

#[derive(Subcommand, Debug)]
pub enum VoteCommand {
    /// Open a vote, replacing any vote in progress
    Start {
        #[arg(value_enum)]
        kind: TargetKind,
        target: String,
    },
    /// Record a ballot (yes, no, or abstain)
    Cast { delegate: String, choice: String },
    /// Withdraw a ballot
    Clear { delegate: String },
    /// Show the running tally
    Tally,
    /// Close the vote and record the result
    End,
    /// Discard the vote without recording anything
    Cancel,
}

#[derive(Subcommand, Debug)]
pub enum SpeakerCommand {
    /// Add a delegate to the speakers list
    Add { delegate: String },
    /// Give the floor to a speaker on the list
    Start { speaker: String },
    /// Take the floor back
    Stop,
    /// Give the floor to the next speaker after the active one
    Next,
    /// Remove a speaker from the list
    Remove { speaker: String },
    /// Set the speaking time in seconds
    Duration { seconds: u32 },
    /// Suggest a random delegate who may speak
    Random,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    Start,
    Pause,
    Resume,
    /// Stop the clock and archive the session
    Stop,
    /// Set the countdown length in minutes (0 for open-ended)
    Duration { minutes: u32 },
    /// Name the session in progress (omit NAME to clear)
    Name { name: Option<String> },
    /// Delete an archived session record
    DeleteRecord { record: String },
}
