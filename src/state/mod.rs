//! Conversation state
//!
//! Append-only message log plus the most recent classification.
//! Only the orchestrator mutates it; callers read it.

use crate::models::{Category, Message, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    history: Vec<Message>,
    /// Label of the last classification, as recorded. May hold a value
    /// outside the category set when restored from a snapshot.
    #[serde(default)]
    last_category: Option<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            history: Vec::new(),
            last_category: None,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Most recent message with role `user`
    pub fn last_user_message(&self) -> Option<&Message> {
        self.history.iter().rev().find(|m| m.role() == Role::User)
    }

    pub fn last_category(&self) -> Option<&str> {
        self.last_category.as_deref()
    }

    /// Parsed form of [`Self::last_category`]; `None` when unclassified
    /// or when the recorded label is not a known category.
    pub fn category(&self) -> Option<Category> {
        self.last_category.as_deref()?.parse().ok()
    }

    pub(crate) fn append(&mut self, message: Message) {
        self.history.push(message);
        self.updated_at = Utc::now();
    }

    pub(crate) fn record_classification(&mut self, category: Category) {
        self.last_category = Some(category.as_str().to_string());
        self.updated_at = Utc::now();
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
