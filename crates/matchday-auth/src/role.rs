//! Role model

use serde::{Deserialize, Serialize};

/// Coarse user category driving permission checks.
///
/// Anonymous visitors and failed lookups are represented as `Option<Role>`
/// being `None`, not as a variant, so no code path can forget the absent
/// case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full back-office access
    Admin,
    /// Content management for news and events
    Editor,
    /// Signed-in member with self-profile access only
    User,
}

impl Role {
    /// Parse a role claim as stored by the auth backend.
    ///
    /// Unrecognized claims yield `None`, which downstream checks treat as
    /// anonymous.
    pub fn parse(claim: &str) -> Option<Self> {
        match claim.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_claims() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("Editor"), Some(Role::Editor));
        assert_eq!(Role::parse(" user "), Some(Role::User));
    }

    #[test]
    fn unknown_claims_parse_to_none() {
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let parsed: Role = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(parsed, Role::Editor);
    }
}
