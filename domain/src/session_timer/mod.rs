//! Committee session timer with pause accounting and archived records

pub mod timer;

pub use timer::{SessionRecord, SessionTimer};
