//! Port for the signed-in user, if any.
//!
//! The identifier is opaque. It is only used to namespace the storage key so
//! that different users on one store do not share conferences.

/// Supplies the current user's identifier.
pub trait IdentitySource: Send + Sync {
    fn user_id(&self) -> Option<String>;
}

/// No signed-in user.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousIdentity;

impl IdentitySource for AnonymousIdentity {
    fn user_id(&self) -> Option<String> {
        None
    }
}

/// A fixed user identifier, e.g. from `--user`.
#[derive(Debug, Clone)]
pub struct FixedIdentity(String);

impl FixedIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self(user_id.into())
    }
}

impl IdentitySource for FixedIdentity {
    fn user_id(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Key used when nobody is signed in.
pub const ANONYMOUS_KEY: &str = "dais/anonymous/conferences";

/// Storage key for the conference document of the current user.
///
/// Signed-in users live under `dais/users/<id>/conferences`. The fixed prefix
/// and suffix make the key a one-to-one function of the id, and no user id
/// can produce [`ANONYMOUS_KEY`].
pub fn storage_key(identity: &dyn IdentitySource) -> String {
    match identity.user_id().filter(|id| !id.trim().is_empty()) {
        Some(user) => format!("dais/users/{}/conferences", user.trim()),
        None => ANONYMOUS_KEY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key() {
        assert_eq!(storage_key(&AnonymousIdentity), ANONYMOUS_KEY);
        assert_eq!(
            storage_key(&FixedIdentity::new("u-42")),
            "dais/users/u-42/conferences"
        );
        assert_eq!(storage_key(&FixedIdentity::new("  ")), ANONYMOUS_KEY);
    }

    #[test]
    fn test_user_named_anonymous_has_own_key() {
        let key = storage_key(&FixedIdentity::new("anonymous"));
        assert_eq!(key, "dais/users/anonymous/conferences");
        assert_ne!(key, storage_key(&AnonymousIdentity));
    }
}
