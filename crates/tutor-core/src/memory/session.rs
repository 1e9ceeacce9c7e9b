//! Session context management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tutor_llm::Message;
use uuid::Uuid;

/// Maximum number of messages kept per session
pub const DEFAULT_MAX_MESSAGES: usize = 40;

fn default_max_messages() -> usize {
    DEFAULT_MAX_MESSAGES
}

/// Conversation history for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// Session ID
    pub id: Uuid,
    /// Session key (`tutor:<user_id>`)
    pub session_key: String,
    /// Conversation messages, oldest first
    pub messages: Vec<Message>,
    /// Last activity timestamp
    pub last_activity: DateTime<Utc>,
    /// Oldest messages are dropped beyond this count
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

impl SessionContext {
    /// Create a new, empty session
    #[must_use]
    pub fn new(session_key: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_key: session_key.into(),
            messages: Vec::new(),
            last_activity: Utc::now(),
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }

    /// Set the message cap
    #[must_use]
    pub fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages;
        self.trim_if_needed();
        self
    }

    /// Create a session key for a user
    #[must_use]
    pub fn make_key(user_id: &str) -> String {
        format!("tutor:{user_id}")
    }

    /// Add a user message
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.push(Message::user(content));
    }

    /// Add an assistant message
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.push(Message::assistant(content));
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.last_activity = Utc::now();
        self.trim_if_needed();
    }

    /// Get messages for LLM context
    #[must_use]
    pub fn get_messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of stored messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the session has no messages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Clear all messages
    pub fn clear(&mut self) {
        self.messages.clear();
        self.last_activity = Utc::now();
    }

    fn trim_if_needed(&mut self) {
        if self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            self.messages.drain(0..excess);
            debug!(session_id = %self.id, dropped = excess, "Session context trimmed");
        }
    }
}
