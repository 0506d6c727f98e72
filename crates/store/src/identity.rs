//! Identity and role data model.
//!
//! [`AuthorizationIdentity`] is the value persisted by every store backend
//! and returned to callers after a ticket verifies: the caller's stable
//! key, the wire ticket that minted it, an unordered role set, and an
//! opaque payload.

use serde::{Deserialize, Serialize};

/// A named permission grouping with display metadata.
///
/// The `name` field is the stable key used for authorization-policy
/// matching by the (external) web layer; `display_text` and `description`
/// are presentation-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRole {
    /// Stable role key.
    pub name: String,
    /// Human-readable role name.
    pub display_text: String,
    /// Longer description of what the role grants.
    pub description: String,
}

impl IdentityRole {
    /// Creates a role from its parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        display_text: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_text: display_text.into(),
            description: description.into(),
        }
    }
}

/// A verified caller identity, as persisted by a [`TicketStore`](crate::TicketStore).
///
/// Roles are unordered; `payload` is an opaque JSON blob the application
/// attached at sign-in. The `ticket` field carries the wire string that
/// minted this identity, so callers holding only the store entry can still
/// echo the original credential.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationIdentity {
    /// The wire ticket that produced this identity.
    pub ticket: String,
    /// The caller's stable key.
    pub identity: String,
    /// Roles granted to the caller.
    #[serde(default)]
    pub roles: Vec<IdentityRole>,
    /// Opaque application payload attached at sign-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl AuthorizationIdentity {
    /// Creates an identity from its parts.
    #[must_use]
    pub fn new(
        ticket: impl Into<String>,
        identity: impl Into<String>,
        roles: Vec<IdentityRole>,
        payload: Option<serde_json::Value>,
    ) -> Self {
        Self { ticket: ticket.into(), identity: identity.into(), roles, payload }
    }

    /// Returns the names of all granted roles.
    #[must_use]
    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> AuthorizationIdentity {
        AuthorizationIdentity::new(
            "ticket-value",
            "u1",
            vec![IdentityRole::new("admin", "Administrator", "Full access")],
            Some(serde_json::json!({"tenant": "acme"})),
        )
    }

    #[test]
    fn test_role_names() {
        assert_eq!(sample().role_names(), vec!["admin"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let identity = sample();
        let json = serde_json::to_string(&identity).unwrap();
        let back: AuthorizationIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }

    #[test]
    fn test_none_payload_omitted() {
        let identity = AuthorizationIdentity::new("t", "u", Vec::new(), None);
        let json = serde_json::to_string(&identity).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.get("payload").is_none());
    }

    #[test]
    fn test_missing_roles_default_to_empty() {
        let identity: AuthorizationIdentity =
            serde_json::from_str(r#"{"ticket":"t","identity":"u"}"#).unwrap();
        assert!(identity.roles.is_empty());
    }
}
