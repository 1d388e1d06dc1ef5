//! Append-only JSONL sink for committee events.
//!
//! One line per [`CommitteeEvent`]: the event's own fields, its `type` tag and
//! a wall-clock `timestamp` (RFC 3339, milliseconds). The file is opened in
//! append mode so a single log spans many CLI invocations.

use chrono::{SecondsFormat, Utc};
use dais_application::{CommitteeEvent, CommitteeEventLog};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// A logged line: the timestamp followed by the flattened event.
#[derive(Serialize)]
struct EventLine<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a CommitteeEvent,
}

impl<'a> EventLine<'a> {
    fn now(event: &'a CommitteeEvent) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event,
        }
    }
}

pub struct JsonlEventLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLog {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Like [`open`](Self::open), but a failure is logged and yields `None`
    /// so the session runs without an event log.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(log) => Some(log),
            Err(e) => {
                warn!("Event log {} unavailable: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &CommitteeEvent) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("event log writer poisoned"))?;
        serde_json::to_writer(&mut *writer, &EventLine::now(event))?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl CommitteeEventLog for JsonlEventLog {
    fn log(&self, event: &CommitteeEvent) {
        if let Err(e) = self.append(event) {
            warn!(
                "Dropped {} event for {}: {}",
                event.event_type(),
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dais_domain::{ConferenceId, DelegateId, SessionRecord, SessionRecordId};
    use serde_json::Value;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn overtime(country: &str) -> CommitteeEvent {
        CommitteeEvent::SpeakerOvertime {
            conference: ConferenceId::new("c1"),
            delegate: DelegateId::new("d1"),
            country: country.to_string(),
        }
    }

    fn stopped() -> CommitteeEvent {
        CommitteeEvent::SessionStopped {
            conference: ConferenceId::new("c1"),
            record: SessionRecord {
                id: SessionRecordId::new("s1"),
                name: "Session 1".to_string(),
                start_time: 1_700_000_000_000,
                end_time: 1_700_000_090_000,
                duration_seconds: 90,
                total_paused_ms: 0,
            },
        }
    }

    #[test]
    fn test_event_log_writes_one_tagged_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let log = JsonlEventLog::open(&path).unwrap();

        log.log(&overtime("Peru"));
        log.log(&stopped());

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l["timestamp"].is_string()));
        assert_eq!(lines[0]["type"], "speaker_overtime");
        assert_eq!(lines[0]["country"], "Peru");
        assert_eq!(lines[0]["conference"], "c1");
        assert_eq!(lines[1]["type"], "session_stopped");
        assert_eq!(lines[1]["record"]["durationSeconds"], 90);
    }

    #[test]
    fn test_event_log_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("events.jsonl");

        let first = JsonlEventLog::new(&path).unwrap();
        first.log(&stopped());
        drop(first);

        let second = JsonlEventLog::new(&path).unwrap();
        assert_eq!(second.path(), path.as_path());
        second.log(&overtime("Chile"));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["country"], "Chile");
    }

    #[test]
    fn test_event_log_unavailable_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        assert!(JsonlEventLog::open(blocker.join("events.jsonl")).is_err());
        assert!(JsonlEventLog::new(blocker.join("events.jsonl")).is_none());
    }
}
