//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: typed record identifiers
//! - [`time`]: epoch-millisecond timestamps
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
pub mod time;
