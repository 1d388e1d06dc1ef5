//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod committee_session;
pub mod load_book;
pub mod persistence;
