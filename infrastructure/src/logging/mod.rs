//! Logging infrastructure: structured committee event logging.
//!
//! Provides [`JsonlEventLog`], a JSONL file writer that implements
//! the [`CommitteeEventLog`](dais_application::CommitteeEventLog) port.

mod jsonl_event_log;

pub use jsonl_event_log::JsonlEventLog;
