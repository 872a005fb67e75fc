//! Conversation session state
//!
//! A `Session` is an immutable snapshot; every turn produces the next one
//! through [`Session::advance`].

#[cfg(test)]
mod proptests;

use crate::protocol::WireSession;

/// `message_id` of the first turn
pub const INITIAL_MESSAGE_ID: u64 = 1;

pub const DEFAULT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: Option<String>,
    pub is_new: bool,
    pub message_id: u64,
    pub version: String,
}

impl Session {
    /// Session for the first turn of a conversation
    #[must_use]
    pub fn initial() -> Self {
        Self {
            session_id: None,
            is_new: true,
            message_id: INITIAL_MESSAGE_ID,
            version: DEFAULT_VERSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Session for the turn after this one
    #[must_use]
    pub fn advance(&self) -> Self {
        Self {
            session_id: self.session_id.clone(),
            is_new: false,
            message_id: self.message_id + 1,
            version: self.version.clone(),
        }
    }

    #[must_use]
    pub fn to_wire(&self) -> WireSession {
        WireSession {
            is_new: self.is_new,
            message_id: self.message_id,
            session_id: self.session_id.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_session() {
        let session = Session::initial();
        assert!(session.is_new);
        assert_eq!(session.message_id, INITIAL_MESSAGE_ID);
        assert_eq!(session.version, "1.0");
        assert!(session.session_id.is_none());
    }

    #[test]
    fn test_advance_keeps_identity() {
        let session = Session::initial()
            .with_session_id("abc")
            .with_version("2.0");
        let next = session.advance();

        assert!(!next.is_new);
        assert_eq!(next.message_id, INITIAL_MESSAGE_ID + 1);
        assert_eq!(next.session_id.as_deref(), Some("abc"));
        assert_eq!(next.version, "2.0");
        // Original snapshot untouched
        assert!(session.is_new);
    }

    #[test]
    fn test_wire_omits_missing_session_id() {
        let wire = serde_json::to_value(Session::initial().to_wire()).unwrap();
        assert_eq!(wire, serde_json::json!({"new": true, "message_id": 1}));
    }
}
