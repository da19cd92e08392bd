//! Conversation history and prompt context
//!
//! The history is a bounded FIFO of user/assistant turns. [`PromptContext`]
//! packages it with a persona built from the profile and the fragments
//! retrieved for the current question, ready for a hosted model on the page
//! side. Nothing here talks to a model.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::extractor::Fragment;
use crate::profile::Profile;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Unix epoch milliseconds
    pub timestamp: i64,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Bounded conversation log, oldest first
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    messages: VecDeque<Message>,
    max_messages: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(12)
    }
}

impl ConversationHistory {
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(max_messages),
            max_messages,
        }
    }

    pub fn push(&mut self, message: Message) {
        if self.max_messages == 0 {
            return;
        }
        self.messages.push_back(message);
        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
        }
    }

    /// Record a question and its answer
    pub fn record_exchange(&mut self, question: &str, answer: &str) {
        self.push(Message::new(Role::User, question));
        self.push(Message::new(Role::Assistant, answer));
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

// =============================================================================
// Prompt context
// =============================================================================

/// What a hosted model would need to answer the current question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptContext {
    pub system: String,
    pub retrieved: Vec<Fragment>,
    pub messages: Vec<Message>,
}

impl PromptContext {
    pub fn build(profile: &Profile, retrieved: Vec<Fragment>, history: &ConversationHistory) -> Self {
        Self {
            system: persona(profile),
            retrieved,
            messages: history.messages().cloned().collect(),
        }
    }

    /// Retrieved fragments as one block, for prompts that take plain text
    pub fn retrieved_text(&self) -> String {
        self.retrieved
            .iter()
            .map(|f| format!("[{}] {}", f.source, f.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn persona(profile: &Profile) -> String {
    let mut out = format!(
        "You are {}, answering visitors' questions on your portfolio page in the first person.",
        profile.display_name()
    );
    if let Some(tagline) = &profile.tagline {
        out.push_str(&format!(" Tagline: {}.", tagline.trim_end_matches('.')));
    }
    if !profile.skills.is_empty() {
        out.push_str(&format!(" Skills: {}.", profile.skills.join(", ")));
    }
    out.push_str(
        " Keep answers short and friendly, and only state facts found in the provided context.",
    );
    out
}
