//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod clock;
pub mod document_store;
pub mod event_log;
pub mod identity;
pub mod reference_data;
