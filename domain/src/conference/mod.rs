//! Conference containers and the persisted document
//!
//! A [`ConferenceBook`] holds one [`CommitteeState`](crate::committee::CommitteeState)
//! per conference and always has exactly one active. The book is persisted as
//! a versioned JSON document; [`load_document`] upgrades older shapes step by
//! step and coerces malformed fields instead of rejecting the document.

pub mod book;
pub mod migration;

pub use book::{Conference, ConferenceBook, DEFAULT_CONFERENCE_NAME};
pub use migration::{CURRENT_DOCUMENT_VERSION, LoadOutcome, load_document, to_document};
