//! Floor items: motions, points, resolutions and amendments
//!
//! Motions carry an explicit status that only the chair (tabling) or a
//! finished vote can change. Resolutions and amendments have no stored
//! lifecycle; their status is derived from recorded votes on read.

pub mod motion;
pub mod resolution;

pub use motion::{Motion, MotionKind, MotionStatus};
pub use resolution::{
    AMENDMENT_MAJORITY, Amendment, DecidedStatus, DisplayStatus, RESOLUTION_MAJORITY, Resolution,
};
