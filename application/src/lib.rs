//! Application layer for dais
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionParams;
pub use ports::{
    clock::{Clock, ManualClock, SystemClock},
    document_store::{DocumentStore, StoreError},
    event_log::{CommitteeEvent, CommitteeEventLog, NoEventLog},
    identity::{ANONYMOUS_KEY, AnonymousIdentity, FixedIdentity, IdentitySource, storage_key},
    reference_data::{NoReferenceData, ReferenceData},
};
pub use use_cases::committee_session::CommitteeSession;
pub use dais_domain::ReloadMode;
pub use use_cases::load_book::{LoadBookUseCase, LoadedBook};
pub use use_cases::persistence::PersistenceHandle;
