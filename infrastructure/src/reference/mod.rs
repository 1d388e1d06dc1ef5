//! Reference data adapters.
//!
//! Provides the built-in flag table and preset committee rosters behind the
//! [`ReferenceData`](dais_application::ReferenceData) port.

mod static_data;

pub use static_data::StaticReferenceData;
