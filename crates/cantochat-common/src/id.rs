use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one scenario session in logs. Regenerated on every
/// `initialize`, so a restarted scenario gets a fresh id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// First eight hex digits, for compact log lines. Deserialized ids
    /// that cannot be cut at byte 8 are returned whole.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_is_v4_uuid() {
        let sid = SessionId::new();
        let parsed = uuid::Uuid::parse_str(sid.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn session_id_short_is_prefix() {
        let sid = SessionId::new();
        assert_eq!(sid.short().len(), 8);
        assert!(sid.as_str().starts_with(sid.short()));
        assert!(sid.short().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn session_id_display() {
        let sid = SessionId::new();
        assert_eq!(sid.to_string(), sid.as_str());
    }

    #[test]
    fn session_id_equality() {
        let sid = SessionId::new();
        assert_eq!(sid, sid.clone());
        assert_ne!(sid, SessionId::new());
    }

    #[test]
    fn session_id_serialization() {
        let sid = SessionId::new();
        let json = serde_json::to_string(&sid).unwrap();
        let deserialized: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(sid, deserialized);
    }

    #[test]
    fn session_id_short_tolerates_foreign_ids() {
        let short: SessionId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(short.short(), "abc");

        let wide: SessionId = serde_json::from_str("\"會話會話會話\"").unwrap();
        assert_eq!(wide.short(), "會話會話會話");
    }
}
