//! Typed identifiers for committee records.
//!
//! Every record kind gets its own newtype so a `MotionId` can never be passed
//! where a `DelegateId` is expected. Identifiers are opaque strings; freshly
//! generated ones are UUID v4.
//!
//! Older saved documents used numeric (millisecond timestamp) identifiers, so
//! deserialization accepts either a JSON string or a JSON number.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire representation accepted for any identifier.
#[doc(hidden)]
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(from = "RawId", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<RawId> for $name {
            fn from(raw: RawId) -> Self {
                Self(raw.into())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a delegate in the registry.
    DelegateId
);
record_id!(
    /// Identifier of a feedback note.
    FeedbackId
);
record_id!(
    /// Identifier of a motion or point.
    MotionId
);
record_id!(
    /// Identifier of a draft resolution.
    ResolutionId
);
record_id!(
    /// Identifier of an amendment.
    AmendmentId
);
record_id!(
    /// Identifier of a speakers-list entry.
    SpeakerId
);
record_id!(
    /// Identifier of an archived committee session.
    SessionRecordId
);
record_id!(
    /// Identifier of a conference container.
    ConferenceId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(DelegateId::generate(), DelegateId::generate());
    }

    #[test]
    fn test_accepts_numeric_ids() {
        let id: MotionId = serde_json::from_value(serde_json::json!(1712345678901_i64)).unwrap();
        assert_eq!(id.as_str(), "1712345678901");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = DelegateId::new("d-1");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("d-1"));
    }
}
