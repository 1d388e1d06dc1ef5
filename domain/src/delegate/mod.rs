//! Delegate registry entities
//!
//! - [`entities::Delegate`] and its explicit update command [`entities::DelegateUpdate`]
//! - [`record::Strike`] / [`record::Feedback`]: per-delegate logs
//! - [`score::DelegateScore`]: rubric scores with evidence

pub mod entities;
pub mod record;
pub mod score;

pub use entities::{Delegate, DelegateUpdate};
pub use record::{Feedback, FeedbackKind, Strike};
pub use score::{DelegateCriterion, DelegateScore, PaperCriterion, ScoreUpdate, ScoreValue};
