//! Identity model shared by the gateway and its auth gate
//!
//! Identities are fabricated, not verified: the auth endpoints are stubs
//! and accept any credentials. The record is what gets persisted under the
//! `"user"` key of the key-value store, next to an opaque `"token"` string.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Username assigned to identities fabricated by `login` (which has no
/// username of its own to work with).
pub const DEMO_USERNAME: &str = "demo";

/// A logged-in user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl Identity {
    /// Fabricate a fresh identity for the given username and email.
    ///
    /// No credential check happens anywhere near this; the id is simply a
    /// new UUID.
    pub fn fabricate(username: &str, email: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    /// Fabricate an opaque session token.
    ///
    /// The token carries no claims; its only property is that presence in
    /// the store means "logged in".
    pub fn fabricate_token() -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fabricate_uses_given_fields() {
        let identity = Identity::fabricate("alice", "alice@example.com");
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.email, "alice@example.com");
        assert!(!identity.id.is_empty());
    }

    #[test]
    fn test_fabricated_ids_are_unique() {
        let a = Identity::fabricate("a", "a@example.com");
        let b = Identity::fabricate("a", "a@example.com");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serde_round_trip() {
        let identity = Identity::fabricate("bob", "bob@example.com");
        let json = serde_json::to_string(&identity).unwrap();
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }
}
