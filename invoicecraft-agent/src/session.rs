//! # Session Transcripts
//!
//! A session is an explicit object - app name, user id, session id, and the
//! ordered transcript of turns - passed by reference into each dispatch call.
//! Nothing here is ambient or global, and nothing persists across process
//! invocations: the only store is in-memory.

use crate::Result;
use chrono::{DateTime, Utc};
use invoicecraft_error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    Tool,
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Set on tool call and tool result turns.
    #[serde(default)]
    pub tool_name: Option<String>,
    pub at: DateTime<Utc>,
}

/// A conversational session: identity plus transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub app_name: String,
    pub user_id: String,
    pub turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new empty session
    pub fn new(
        id: impl Into<String>,
        app_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            app_name: app_name.into(),
            user_id: user_id.into(),
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate a unique session ID
    pub fn generate_id() -> String {
        format!("session_{:x}", Utc::now().timestamp_millis())
    }

    /// Append a turn and bump the update timestamp.
    pub fn record(&mut self, role: Role, content: impl Into<String>, tool_name: Option<String>) {
        let now = Utc::now();
        self.turns.push(Turn {
            role,
            content: content.into(),
            tool_name,
            at: now,
        });
        self.updated_at = now;
    }

    pub fn record_user(&mut self, content: impl Into<String>) {
        self.record(Role::User, content, None);
    }

    pub fn record_agent(&mut self, content: impl Into<String>) {
        self.record(Role::Agent, content, None);
    }

    pub fn record_tool(&mut self, tool_name: impl Into<String>, content: impl Into<String>) {
        self.record(Role::Tool, content, Some(tool_name.into()));
    }

    /// Turns produced by tools, in order.
    pub fn tool_turns(&self) -> Vec<&Turn> {
        self.turns.iter().filter(|t| t.role == Role::Tool).collect()
    }
}

// =============================================================================
// Session Store Trait
// =============================================================================

/// Trait for session stores. The shipped implementation is in-memory only;
/// the trait is the seam a persistent store would implement.
pub trait SessionStore: Send + Sync {
    /// Create a new session with a generated ID and store it
    fn create_session(&self, app_name: &str, user_id: &str) -> Result<Session>;

    /// Save (upsert) a session
    fn save_session(&self, session: &Session) -> Result<()>;

    /// Load a session by ID
    fn load_session(&self, session_id: &str) -> Result<Session>;

    /// List all session IDs
    fn list_sessions(&self) -> Result<Vec<String>>;

    /// Delete a session
    fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Check if a session exists
    fn session_exists(&self, session_id: &str) -> bool {
        self.load_session(session_id).is_ok()
    }

    /// Get store name for debugging
    fn store_name(&self) -> &'static str;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// In-memory session store; state lives for the process lifetime only.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create_session(&self, app_name: &str, user_id: &str) -> Result<Session> {
        let session = Session::new(Session::generate_id(), app_name, user_id);
        self.save_session(&session)?;
        Ok(session)
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    fn load_session(&self, session_id: &str) -> Result<Session> {
        let sessions = self.sessions.read().unwrap();
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| Error::session_not_found(session_id))
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let sessions = self.sessions.read().unwrap();
        Ok(sessions.keys().cloned().collect())
    }

    fn delete_session(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        sessions.remove(session_id);
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoicecraft_error::ErrorKind;

    #[test]
    fn test_session_creation() {
        let session = Session::new("session1234", "invoice_app", "1234");
        assert_eq!(session.id, "session1234");
        assert_eq!(session.app_name, "invoice_app");
        assert_eq!(session.user_id, "1234");
        assert!(session.turns.is_empty());
    }

    #[test]
    fn test_record_turns() {
        let mut session = Session::new("s", "app", "u");
        session.record_user("Create an invoice for ABC Company");
        session.record_tool("generate_invoice_pdf", "Invoice PDF generated successfully");
        session.record_agent("Done, your invoice is ready.");

        assert_eq!(session.turns.len(), 3);
        assert_eq!(session.turns[0].role, Role::User);
        assert_eq!(session.turns[1].role, Role::Tool);
        assert_eq!(
            session.turns[1].tool_name.as_deref(),
            Some("generate_invoice_pdf")
        );
        assert_eq!(session.tool_turns().len(), 1);
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut session = Session::new("s", "app", "u");
        let created = session.created_at;
        session.record_user("hello");
        session.record_agent("hi");

        assert!(session.updated_at >= created);
        assert!(session.turns[1].at >= session.turns[0].at);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.store_name(), "memory");

        let mut session = store.create_session("invoice_app", "1234").unwrap();
        session.record_user("hello");
        store.save_session(&session).unwrap();

        let loaded = store.load_session(&session.id).unwrap();
        assert_eq!(loaded.app_name, "invoice_app");
        assert_eq!(loaded.turns.len(), 1);

        let sessions = store.list_sessions().unwrap();
        assert!(sessions.contains(&session.id));

        store.delete_session(&session.id).unwrap();
        assert!(!store.session_exists(&session.id));
    }

    #[test]
    fn test_load_missing_session() {
        let store = InMemorySessionStore::new();
        let err = store.load_session("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SessionNotFound);
    }
}
