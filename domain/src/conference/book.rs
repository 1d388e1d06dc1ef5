//! The set of conferences and which one is active

use crate::committee::CommitteeState;
use crate::core::ids::ConferenceId;
use serde::{Serialize, Serializer};

pub const DEFAULT_CONFERENCE_NAME: &str = "My Conference";

/// One conference: a name and its committee state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conference {
    pub id: ConferenceId,
    pub name: String,
    pub data: CommitteeState,
}

impl Conference {
    pub fn new(name: &str) -> Self {
        Self::with_data(name, CommitteeState::default())
    }

    pub fn with_data(name: &str, data: CommitteeState) -> Self {
        let name = name.trim();
        Self {
            id: ConferenceId::generate(),
            name: if name.is_empty() {
                DEFAULT_CONFERENCE_NAME.to_string()
            } else {
                name.to_string()
            },
            data,
        }
    }
}

/// All conferences, never empty, with one active
///
/// The active conference is tracked by position so it always resolves; it is
/// written out as `activeConferenceId`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConferenceBook {
    conferences: Vec<Conference>,
    active: usize,
}

impl Default for ConferenceBook {
    fn default() -> Self {
        Self::new()
    }
}

impl ConferenceBook {
    /// A book with a single empty conference
    pub fn new() -> Self {
        Self {
            conferences: vec![Conference::new(DEFAULT_CONFERENCE_NAME)],
            active: 0,
        }
    }

    /// Assemble a book from loaded parts
    ///
    /// An empty list gets a default conference. An active id that matches
    /// nothing falls back to the first conference; the flag reports whether
    /// that repair happened.
    pub fn from_parts(
        mut conferences: Vec<Conference>,
        active_id: Option<&ConferenceId>,
    ) -> (Self, bool) {
        if conferences.is_empty() {
            conferences.push(Conference::new(DEFAULT_CONFERENCE_NAME));
        }
        let found = active_id.and_then(|id| conferences.iter().position(|c| &c.id == id));
        let repaired = found.is_none();
        (
            Self {
                conferences,
                active: found.unwrap_or(0),
            },
            repaired,
        )
    }

    pub fn conferences(&self) -> &[Conference] {
        &self.conferences
    }

    pub fn conference(&self, id: &ConferenceId) -> Option<&Conference> {
        self.conferences.iter().find(|c| &c.id == id)
    }

    pub fn active(&self) -> &Conference {
        &self.conferences[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Conference {
        &mut self.conferences[self.active]
    }

    pub fn active_id(&self) -> &ConferenceId {
        &self.active().id
    }

    /// Create a conference and make it active
    pub fn add_conference(&mut self, name: &str) -> ConferenceId {
        let conference = Conference::new(name);
        let id = conference.id.clone();
        self.conferences.push(conference);
        self.active = self.conferences.len() - 1;
        id
    }

    /// Delete a conference
    ///
    /// Removing the active one activates the first remaining; removing the
    /// last one leaves a fresh default in its place.
    pub fn remove_conference(&mut self, id: &ConferenceId) -> Option<Conference> {
        let index = self.conferences.iter().position(|c| &c.id == id)?;
        let removed = self.conferences.remove(index);

        if self.conferences.is_empty() {
            self.conferences.push(Conference::new(DEFAULT_CONFERENCE_NAME));
            self.active = 0;
        } else if index == self.active {
            self.active = 0;
        } else if index < self.active {
            self.active -= 1;
        }
        Some(removed)
    }

    /// Change a conference's display name; its data is untouched
    pub fn rename_conference(&mut self, id: &ConferenceId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.conferences.iter_mut().find(|c| &c.id == id) {
            Some(conference) => {
                conference.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn switch_conference(&mut self, id: &ConferenceId) -> bool {
        match self.conferences.iter().position(|c| &c.id == id) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub(crate) fn conferences_mut(&mut self) -> &mut [Conference] {
        &mut self.conferences
    }
}

impl Serialize for ConferenceBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut document = serializer.serialize_struct("ConferenceBook", 3)?;
        document.serialize_field("version", &super::CURRENT_DOCUMENT_VERSION)?;
        document.serialize_field("conferences", &self.conferences)?;
        document.serialize_field("activeConferenceId", self.active_id())?;
        document.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_has_one_active_conference() {
        let book = ConferenceBook::new();
        assert_eq!(book.conferences().len(), 1);
        assert_eq!(book.active().name, DEFAULT_CONFERENCE_NAME);
    }

    #[test]
    fn test_add_switches_active() {
        let mut book = ConferenceBook::new();
        let id = book.add_conference("HMUN 2026");
        assert_eq!(book.active_id(), &id);
        assert_eq!(book.active().data, CommitteeState::default());
    }

    #[test]
    fn test_remove_active_falls_back_to_first() {
        let mut book = ConferenceBook::new();
        let first = book.active_id().clone();
        book.add_conference("B");
        let c = book.add_conference("C");

        book.remove_conference(&c).unwrap();
        assert_eq!(book.active_id(), &first);
    }

    #[test]
    fn test_remove_before_active_keeps_active() {
        let mut book = ConferenceBook::new();
        let first = book.active_id().clone();
        let b = book.add_conference("B");
        book.remove_conference(&first).unwrap();
        assert_eq!(book.active_id(), &b);
    }

    #[test]
    fn test_remove_last_synthesizes_default() {
        let mut book = ConferenceBook::new();
        let only = book.active_id().clone();
        assert!(book.remove_conference(&only).is_some());
        assert_eq!(book.conferences().len(), 1);
        assert_ne!(book.active_id(), &only);
        assert!(book.remove_conference(&only).is_none());
    }

    #[test]
    fn test_rename_keeps_data() {
        let mut book = ConferenceBook::new();
        let id = book.active_id().clone();
        book.active_mut().data.set_committee_name("UNEP");
        assert!(book.rename_conference(&id, "Renamed"));
        assert!(!book.rename_conference(&id, " "));
        assert_eq!(book.active().name, "Renamed");
        assert_eq!(book.active().data.committee_name(), "UNEP");
    }

    #[test]
    fn test_switch() {
        let mut book = ConferenceBook::new();
        let first = book.active_id().clone();
        book.add_conference("Second");
        assert!(book.switch_conference(&first));
        assert_eq!(book.active_id(), &first);
        assert!(!book.switch_conference(&ConferenceId::new("missing")));
    }

    #[test]
    fn test_from_parts_repairs_unknown_active() {
        let conferences = vec![Conference::new("A"), Conference::new("B")];
        let first = conferences[0].id.clone();
        let (book, repaired) = ConferenceBook::from_parts(conferences, Some(&ConferenceId::new("x")));
        assert!(repaired);
        assert_eq!(book.active_id(), &first);
    }

    #[test]
    fn test_serialized_document_shape() {
        let book = ConferenceBook::new();
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["version"], 2);
        assert_eq!(json["activeConferenceId"], book.active_id().as_str());
        assert_eq!(json["conferences"][0]["name"], DEFAULT_CONFERENCE_NAME);
        assert!(json["conferences"][0]["data"].is_object());
    }
}
