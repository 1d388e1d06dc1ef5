//! Versioned loading of the persisted conference document
//!
//! | version | shape                                                         |
//! |---------|---------------------------------------------------------------|
//! | 0       | a single committee's fields at the top level                  |
//! | 1       | `{conferences, activeConferenceId}` without a version field   |
//! | 2       | v1 plus `version`; the in-flight vote stored as `voting`      |
//!
//! Older documents are upgraded one version at a time. After upgrading,
//! every field is read on its own: a missing or wrong-typed field takes its
//! default and malformed list entries are dropped, so a damaged document
//! still loads as much as it can.

use super::book::{Conference, ConferenceBook, DEFAULT_CONFERENCE_NAME};
use crate::committee::{CommitteeState, ReloadMode};
use crate::core::error::DomainError;
use crate::core::ids::ConferenceId;
use crate::core::time::{EpochMillis, MAX_EPOCH_MS, checked_epoch_ms};
use crate::session_timer::SessionTimer;
use crate::speakers::DEFAULT_SPEAKER_SECONDS;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Version written by [`to_document`]
pub const CURRENT_DOCUMENT_VERSION: u32 = 2;

/// Result of loading a stored document
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub book: ConferenceBook,
    /// Version the document was upgraded from, if it was older
    pub migrated_from: Option<u32>,
    /// Set when the document could not be used at all
    pub rejected: Option<DomainError>,
    /// One entry per coercion or repair applied
    pub notes: Vec<String>,
}

impl LoadOutcome {
    fn fresh(rejected: Option<DomainError>, notes: Vec<String>) -> Self {
        Self {
            book: ConferenceBook::new(),
            migrated_from: None,
            rejected,
            notes,
        }
    }
}

/// Serialize a book into the current document shape
pub fn to_document(book: &ConferenceBook) -> Result<Value, serde_json::Error> {
    serde_json::to_value(book)
}

/// Load a stored document, upgrading and coercing as needed
///
/// `None` (nothing stored yet) yields a fresh book. A document from a newer
/// version than this build understands is not downgraded: a fresh book is
/// returned with `rejected` set so the caller can warn. `mode` decides
/// whether the stored floor and pause marker carry over.
pub fn load_document(raw: Option<&Value>, now: EpochMillis, mode: ReloadMode) -> LoadOutcome {
    let Some(raw) = raw else {
        return LoadOutcome::fresh(None, Vec::new());
    };
    if !raw.is_object() {
        return LoadOutcome::fresh(None, vec!["stored document is not an object".to_string()]);
    }

    let found = detect_version(raw);
    if found > CURRENT_DOCUMENT_VERSION {
        return LoadOutcome::fresh(
            Some(DomainError::UnsupportedVersion {
                found,
                supported: CURRENT_DOCUMENT_VERSION,
            }),
            Vec::new(),
        );
    }

    let mut notes = Vec::new();
    let mut document = raw.clone();
    let mut version = found;
    while version < CURRENT_DOCUMENT_VERSION {
        let next = version + 1;
        document = upgrade(document, next, &mut notes);
        version = next;
    }

    let mut book = read_book(&document, &mut notes);
    for conference in book.conferences_mut() {
        notes.extend(conference.data.normalize_for_reload(now, mode));
    }

    LoadOutcome {
        book,
        migrated_from: (found < CURRENT_DOCUMENT_VERSION).then_some(found),
        rejected: None,
        notes,
    }
}

fn detect_version(raw: &Value) -> u32 {
    if let Some(version) = raw.get("version").and_then(Value::as_u64) {
        return u32::try_from(version).unwrap_or(u32::MAX);
    }
    if raw.get("conferences").is_some_and(Value::is_array) {
        1
    } else {
        0
    }
}

fn upgrade(document: Value, to: u32, notes: &mut Vec<String>) -> Value {
    match to {
        1 => wrap_single_committee(document),
        2 => {
            let mut document = document;
            if let Some(conferences) = document
                .get_mut("conferences")
                .and_then(Value::as_array_mut)
            {
                for conference in conferences {
                    if let Some(data) = conference.get_mut("data").and_then(Value::as_object_mut) {
                        fold_legacy_vote_pointers(data, notes);
                    }
                }
            }
            if let Some(object) = document.as_object_mut() {
                object.insert("version".to_string(), json!(2));
            }
            document
        }
        _ => document,
    }
}

/// Wrap a flat single-committee document into a one-conference book
fn wrap_single_committee(data: Value) -> Value {
    let id = ConferenceId::generate();
    let name = data
        .get("committeeName")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_CONFERENCE_NAME)
        .to_string();
    json!({
        "conferences": [{ "id": id.as_str(), "name": name, "data": data }],
        "activeConferenceId": id.as_str(),
    })
}

/// Replace the three per-kind vote pointers and the loose ballot map with a
/// single `voting` object
fn fold_legacy_vote_pointers(data: &mut Map<String, Value>, notes: &mut Vec<String>) {
    let pointers = [
        ("votingMotionId", "motion"),
        ("votingResolutionId", "resolution"),
        ("votingAmendmentId", "amendment"),
    ];
    let mut target = None;
    for (key, kind) in pointers {
        if let Some(id) = data.remove(key).filter(|v| !v.is_null())
            && target.is_none()
        {
            target = Some(json!({ "kind": kind, "id": id }));
        }
    }
    let ballots = data.remove("currentVotes");

    if data.contains_key("voting") {
        return;
    }
    if let Some(target) = target {
        notes.push("converted legacy vote pointer".to_string());
        data.insert(
            "voting".to_string(),
            json!({ "target": target, "ballots": ballots.unwrap_or_else(|| json!({})) }),
        );
    }
}

fn read_book(document: &Value, notes: &mut Vec<String>) -> ConferenceBook {
    let empty = Map::new();
    let object = document.as_object().unwrap_or(&empty);

    let mut conferences = Vec::new();
    match object.get("conferences") {
        Some(Value::Array(entries)) => {
            for (index, entry) in entries.iter().enumerate() {
                match read_conference(entry, notes) {
                    Some(conference) => conferences.push(conference),
                    None => notes.push(format!("dropped malformed conference #{index}")),
                }
            }
        }
        _ => notes.push("missing conference list".to_string()),
    }

    let active_id: Option<ConferenceId> = field(object, "activeConferenceId", notes);
    let (book, repaired) = ConferenceBook::from_parts(conferences, active_id.as_ref());
    if repaired {
        notes.push("active conference reset to the first one".to_string());
    }
    book
}

fn read_conference(entry: &Value, notes: &mut Vec<String>) -> Option<Conference> {
    let object = entry.as_object()?;
    let data = match object.get("data") {
        Some(Value::Object(data)) => read_committee(data, notes),
        _ => {
            notes.push("conference without data reset to defaults".to_string());
            CommitteeState::default()
        }
    };
    let name: Option<String> = field(object, "name", notes);
    let mut conference =
        Conference::with_data(name.as_deref().unwrap_or(DEFAULT_CONFERENCE_NAME), data);
    if let Some(id) = field::<ConferenceId>(object, "id", notes) {
        conference.id = id;
    }
    Some(conference)
}

fn read_committee(data: &Map<String, Value>, notes: &mut Vec<String>) -> CommitteeState {
    let defaults = CommitteeState::default();
    CommitteeState {
        committee_name: field(data, "committeeName", notes).unwrap_or_default(),
        delegates: list(data, "delegates", notes),
        strikes: list(data, "strikes", notes),
        feedback: list(data, "feedback", notes),
        scores: entries(data, "scores", notes),
        emoji_overrides: entries(data, "emojiOverrides", notes),
        motions: list(data, "motions", notes),
        resolutions: list(data, "resolutions", notes),
        amendments: list(data, "amendments", notes),
        voting: field(data, "voting", notes),
        speakers: list(data, "speakers", notes),
        speaker_duration: field(data, "speakerDuration", notes)
            .filter(|secs: &u32| *secs > 0)
            .unwrap_or(DEFAULT_SPEAKER_SECONDS),
        roll_call_complete: field(data, "rollCallComplete", notes).unwrap_or_default(),
        timer: read_timer(data, notes),
        ..defaults
    }
}

fn read_timer(data: &Map<String, Value>, notes: &mut Vec<String>) -> SessionTimer {
    SessionTimer {
        session_started: field(data, "sessionStarted", notes).unwrap_or_default(),
        session_start_time: epoch_field(data, "sessionStartTime", notes),
        session_duration_minutes: field(data, "sessionDurationMinutes", notes),
        session_paused_at: epoch_field(data, "sessionPausedAt", notes),
        session_total_paused_ms: paused_total(data, notes),
        session_name: field(data, "sessionName", notes),
        session_records: list(data, "sessionRecords", notes),
    }
}

/// Read a timestamp, accepting epoch seconds or milliseconds
fn epoch_field(
    object: &Map<String, Value>,
    key: &str,
    notes: &mut Vec<String>,
) -> Option<EpochMillis> {
    let raw: i64 = field(object, key, notes)?;
    let checked = checked_epoch_ms(raw);
    if checked.is_none() {
        notes.push(format!("ignored out-of-range '{key}': {raw}"));
    }
    checked
}

fn paused_total(object: &Map<String, Value>, notes: &mut Vec<String>) -> i64 {
    let key = "sessionTotalPausedMs";
    match field::<i64>(object, key, notes) {
        Some(total) if (0..=MAX_EPOCH_MS).contains(&total) => total,
        Some(total) => {
            notes.push(format!("ignored out-of-range '{key}': {total}"));
            0
        }
        None => 0,
    }
}

/// Read one field; `null` and absence are both `None`
fn field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &str,
    notes: &mut Vec<String>,
) -> Option<T> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                notes.push(format!("ignored malformed '{key}': {e}"));
                None
            }
        },
    }
}

/// Read a list, keeping the entries that parse
fn list<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &str,
    notes: &mut Vec<String>,
) -> Vec<T> {
    let items = match object.get(key) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            notes.push(format!("ignored non-list '{key}'"));
            return Vec::new();
        }
    };
    let parsed: Vec<T> = items
        .iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect();
    if parsed.len() != items.len() {
        notes.push(format!(
            "dropped {} malformed '{key}' entries",
            items.len() - parsed.len()
        ));
    }
    parsed
}

/// Read a keyed map, keeping the entries that parse
fn entries<K, V>(object: &Map<String, Value>, key: &str, notes: &mut Vec<String>) -> BTreeMap<K, V>
where
    K: Ord + From<String>,
    V: DeserializeOwned,
{
    let items = match object.get(key) {
        None | Some(Value::Null) => return BTreeMap::new(),
        Some(Value::Object(items)) => items,
        Some(_) => {
            notes.push(format!("ignored non-object '{key}'"));
            return BTreeMap::new();
        }
    };
    let parsed: BTreeMap<K, V> = items
        .iter()
        .filter_map(|(k, v)| V::deserialize(v).ok().map(|v| (K::from(k.clone()), v)))
        .collect();
    if parsed.len() != items.len() {
        notes.push(format!(
            "dropped {} malformed '{key}' entries",
            items.len() - parsed.len()
        ));
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::FeedbackKind;
    use crate::floor::MotionStatus;
    use crate::majority::VoteChoice;
    use crate::roll_call::RollCallStatus;

    const NOW: EpochMillis = 1_700_000_100_000;

    #[test]
    fn test_nothing_stored_gives_fresh_book() {
        let outcome = load_document(None, NOW, ReloadMode::Fresh);
        assert_eq!(outcome.book.conferences().len(), 1);
        assert!(outcome.migrated_from.is_none());
        assert!(outcome.notes.is_empty());
    }

    #[test]
    fn test_legacy_flat_document_becomes_one_conference() {
        let legacy = json!({
            "committeeName": "DISEC",
            "delegates": [
                {"id": 1, "country": "France", "present": true},
                {"id": "d2", "country": "Chile"}
            ]
        });
        let outcome = load_document(Some(&legacy), NOW, ReloadMode::Fresh);
        assert_eq!(outcome.migrated_from, Some(0));

        let book = &outcome.book;
        assert_eq!(book.conferences().len(), 1);
        assert_eq!(book.active_id(), &book.conferences()[0].id);
        assert_eq!(book.active().name, "DISEC");

        let state = &book.active().data;
        assert_eq!(state.delegates().len(), 2);
        assert_eq!(state.delegates()[0].id.as_str(), "1");
        assert_eq!(state.delegates()[0].effective_status(), RollCallStatus::Present);
        assert_eq!(state.speaker_duration(), 60);
        assert!(state.motions().is_empty());
        assert!(!state.timer().session_started);
    }

    #[test]
    fn test_wrong_types_are_coerced() {
        let legacy = json!({
            "delegates": "not a list",
            "motions": [{"id": "m1", "text": "Unmod"}, 42],
            "speakerDuration": "ninety",
            "rollCallComplete": true
        });
        let outcome = load_document(Some(&legacy), NOW, ReloadMode::Fresh);
        let state = &outcome.book.active().data;
        assert!(state.delegates().is_empty());
        assert_eq!(state.motions().len(), 1);
        assert_eq!(state.motions()[0].status, MotionStatus::Active);
        assert_eq!(state.speaker_duration(), 60);
        assert!(state.roll_call_complete());
        assert!(outcome.notes.len() >= 3);
    }

    #[test]
    fn test_speakers_and_pause_are_session_local() {
        let document = json!({
            "version": 2,
            "conferences": [{
                "id": "c1",
                "name": "Main",
                "data": {
                    "delegates": [{"id": "d1", "country": "Kenya"}],
                    "speakers": [{
                        "id": "s1", "delegateId": "d1", "country": "Kenya",
                        "name": "Kenya", "duration": 60, "speaking": true,
                        "startTime": 1_700_000_000
                    }],
                    "sessionStarted": true,
                    "sessionStartTime": 1_700_000_000_000_i64,
                    "sessionPausedAt": 1_700_000_040_000_i64,
                    "sessionTotalPausedMs": 0
                }
            }],
            "activeConferenceId": "c1"
        });
        let outcome = load_document(Some(&document), NOW, ReloadMode::Fresh);
        assert!(outcome.migrated_from.is_none());

        let state = &outcome.book.active().data;
        assert!(!state.speakers()[0].speaking);
        assert_eq!(state.speakers()[0].start_time, None);
        assert_eq!(state.timer().session_paused_at, None);
        assert_eq!(state.timer().session_total_paused_ms, 60_000);
        assert!(state.timer().session_started);
    }

    #[test]
    fn test_v1_vote_pointers_are_folded() {
        let document = json!({
            "conferences": [{
                "id": "c1",
                "name": "Main",
                "data": {
                    "delegates": [{"id": "d1", "country": "Peru"}],
                    "motions": [{"id": "m1", "text": "Unmod", "type": "motion"}],
                    "votingMotionId": "m1",
                    "votingResolutionId": null,
                    "currentVotes": {"d1": "yes"}
                }
            }],
            "activeConferenceId": "c1"
        });
        let outcome = load_document(Some(&document), NOW, ReloadMode::Fresh);
        assert_eq!(outcome.migrated_from, Some(1));

        let vote = outcome.book.active().data.current_vote().unwrap();
        assert_eq!(vote.target.id_str(), "m1");
        assert_eq!(vote.ballots.values().copied().collect::<Vec<_>>(), vec![VoteChoice::Yes]);
    }

    #[test]
    fn test_unknown_active_id_is_repaired() {
        let document = json!({
            "version": 2,
            "conferences": [
                {"id": "a", "name": "A", "data": {}},
                {"id": "b", "name": "B", "data": {}},
                "garbage"
            ],
            "activeConferenceId": "zzz"
        });
        let outcome = load_document(Some(&document), NOW, ReloadMode::Fresh);
        assert_eq!(outcome.book.conferences().len(), 2);
        assert_eq!(outcome.book.active_id().as_str(), "a");
        assert!(outcome.notes.iter().any(|n| n.contains("active conference")));
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let document = json!({"version": 9, "conferences": []});
        let outcome = load_document(Some(&document), NOW, ReloadMode::Fresh);
        assert_eq!(
            outcome.rejected,
            Some(DomainError::UnsupportedVersion { found: 9, supported: 2 })
        );
        assert_eq!(outcome.book.conferences().len(), 1);
    }

    #[test]
    fn test_round_trip_keeps_state() {
        let mut book = ConferenceBook::new();
        let state = &mut book.active_mut().data;
        let id = state
            .add_delegate(crate::delegate::Delegate::new("Japan"))
            .unwrap();
        state.add_feedback(&id, FeedbackKind::Compliment, "Great speech", 5);
        state.set_emoji_override("Japan", Some("🗾"));

        let document = to_document(&book).unwrap();
        let outcome = load_document(Some(&document), NOW, ReloadMode::Fresh);
        assert!(outcome.notes.is_empty(), "{:?}", outcome.notes);
        assert_eq!(outcome.book, book);
    }

    fn with_timer(fields: Value) -> Value {
        json!({
            "version": 2,
            "conferences": [{ "id": "c1", "name": "Main", "data": fields }],
            "activeConferenceId": "c1"
        })
    }

    #[test]
    fn test_extreme_timer_values_are_coerced() {
        let inputs = [
            json!({
                "sessionStarted": true,
                "sessionStartTime": 1_700_000_000_000_i64,
                "sessionPausedAt": -100_000_000_000_000_000_i64
            }),
            json!({
                "sessionStarted": true,
                "sessionStartTime": 1_700_000_000_000_i64,
                "sessionPausedAt": 1_700_000_050_000_i64,
                "sessionTotalPausedMs": i64::MAX
            }),
            json!({
                "sessionStarted": true,
                "sessionStartTime": i64::MIN,
                "sessionPausedAt": i64::MAX,
                "sessionTotalPausedMs": -5
            }),
        ];
        for fields in inputs {
            for mode in [ReloadMode::Fresh, ReloadMode::Resume] {
                let outcome = load_document(Some(&with_timer(fields.clone())), NOW, mode);
                let timer = outcome.book.active().data.timer();
                assert!(!outcome.notes.is_empty(), "{fields}");
                assert!(timer.session_total_paused_ms >= 0);
                assert!(timer.elapsed_ms(NOW) >= 0);
            }
        }
    }

    #[test]
    fn test_resume_keeps_pause_and_floor() {
        let document = json!({
            "version": 2,
            "conferences": [{
                "id": "c1",
                "name": "Main",
                "data": {
                    "delegates": [{"id": "d1", "country": "Kenya"}],
                    "speakers": [{
                        "id": "s1", "delegateId": "d1", "country": "Kenya",
                        "duration": 60, "speaking": true,
                        "startTime": 1_700_000_090_000_i64
                    }],
                    "sessionStarted": true,
                    "sessionStartTime": 1_700_000_000_000_i64,
                    "sessionPausedAt": 1_700_000_040_000_i64
                }
            }],
            "activeConferenceId": "c1"
        });
        let outcome = load_document(Some(&document), NOW, ReloadMode::Resume);
        assert!(outcome.notes.is_empty(), "{:?}", outcome.notes);

        let state = &outcome.book.active().data;
        assert_eq!(state.active_speaker().map(|s| s.id.as_str()), Some("s1"));
        assert!(state.timer().is_paused());
        assert_eq!(state.timer().session_paused_at, Some(1_700_000_040_000));
        assert_eq!(state.timer().session_total_paused_ms, 0);
    }
}
