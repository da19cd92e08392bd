//! Configuration types and defaults for the chat pipeline

use serde::{Deserialize, Serialize};

/// Tunables for one chat session.
///
/// Deserializes from partial objects: any omitted field keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatConfig {
    /// Response cache entry lifetime in seconds. Default: 300
    pub cache_ttl_secs: u64,
    /// Maximum cached responses; 0 disables caching. Default: 50
    pub cache_capacity: usize,
    /// Recent topics remembered by the context tracker. Default: 10
    pub max_topics: usize,
    /// Conversation history entries kept for prompt context. Default: 12
    pub max_history: usize,
    /// Fragments concatenated into an extracted answer. Default: 5
    pub max_fragments: usize,
    /// Minimum similarity for an item to count as a match. Default: 0.25
    pub min_item_score: f32,
    /// Projects shown when none match the question. Default: 3
    pub project_fallback_count: usize,
    /// Roles shown when none match the question. Default: 2
    pub experience_fallback_count: usize,
    /// Skills named in the generic summary. Default: 6
    pub summary_skill_count: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 300,
            cache_capacity: 50,
            max_topics: 10,
            max_history: 12,
            max_fragments: 5,
            min_item_score: 0.25,
            project_fallback_count: 3,
            experience_fallback_count: 2,
            summary_skill_count: 6,
        }
    }
}

impl ChatConfig {
    /// Configuration with the response cache disabled
    pub fn no_cache() -> Self {
        Self {
            cache_capacity: 0,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid chat config: {}", e))
    }
}
