//! Branded identifiers
//!
//! Resource, client, and reservation ids are distinct newtypes over strings,
//! validated once at construction. Internal code never re-validates a
//! [`ResourceId`]/[`ClientId`]/`Uuid` reservation id it already holds.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const MAX_ID_LEN: usize = 100;

/// Externally-supplied opaque resource identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput("resourceId must not be empty".into()));
        }
        if trimmed.len() > MAX_ID_LEN {
            return Err(CoreError::InvalidInput(format!(
                "resourceId must be at most {} characters",
                MAX_ID_LEN
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied client identifier. Sanitized: alphanumeric, `.`, `_`,
/// `-`, `@`; trimmed; bounded length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput("clientId must not be empty".into()));
        }
        if trimmed.len() > MAX_ID_LEN {
            return Err(CoreError::InvalidInput(format!(
                "clientId must be at most {} characters",
                MAX_ID_LEN
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@'))
        {
            return Err(CoreError::InvalidInput(
                "clientId may only contain alphanumerics, '.', '_', '-', '@'".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-generated reservation identifier. A thin, validated wrapper over
/// `Uuid` so callers at the boundary that hand in a string id go through one
/// parse path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| CoreError::InvalidInput(format!("invalid reservation id: {}", raw)))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ReservationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_rejects_empty_and_overlong() {
        assert!(ResourceId::parse("").is_err());
        assert!(ResourceId::parse("  ").is_err());
        assert!(ResourceId::parse("a".repeat(101)).is_err());
        assert!(ResourceId::parse("room-42").is_ok());
    }

    #[test]
    fn resource_id_trims_whitespace() {
        let id = ResourceId::parse("  room-42  ").unwrap();
        assert_eq!(id.as_str(), "room-42");
    }

    #[test]
    fn client_id_rejects_bad_charset() {
        assert!(ClientId::parse("alice smith").is_err());
        assert!(ClientId::parse("alice;drop table").is_err());
        assert!(ClientId::parse("alice.smith-99@example.com").is_ok());
    }

    #[test]
    fn reservation_id_round_trips() {
        let id = ReservationId::new();
        let parsed = ReservationId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }
}
