// src/core/conversation.rs
//! Ordered record of user/assistant turns for one session

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{Candidate, ChatMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One conversation entry. Immutable once appended; assistant turns may
/// carry the candidate batch a search returned plus display metadata
/// echoed from the collaborator.
#[derive(Debug, Clone)]
pub struct Turn {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub candidates: Vec<Candidate>,
    pub total_matched: Option<u64>,
    pub search_criteria: Option<String>,
    pub query_trace: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.into(),
            candidates: Vec::new(),
            total_matched: None,
            search_criteria: None,
            query_trace: None,
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: content.into(),
            candidates: Vec::new(),
            total_matched: None,
            search_criteria: None,
            query_trace: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_results(
        mut self,
        candidates: Vec<Candidate>,
        total_matched: u64,
        search_criteria: String,
        query_trace: String,
    ) -> Self {
        self.candidates = candidates;
        self.total_matched = Some(total_matched);
        self.search_criteria = Some(search_criteria);
        self.query_trace = Some(query_trace);
        self
    }
}

/// Append-only log of turns. Cleared only as part of the joint session
/// reset, together with the feedback store.
#[derive(Debug, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// The textual exchange for transmission to a collaborator: role and
    /// content only, candidate payloads and metadata excluded.
    pub fn history(&self) -> impl Iterator<Item = ChatMessage> + '_ {
        self.turns.iter().map(|turn| ChatMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        })
    }
}
