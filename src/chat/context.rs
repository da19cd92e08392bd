//! ConversationContext - What this visitor has been asking about
//!
//! Session-scoped state updated once per question:
//! - recent topics (bounded FIFO of detected intents)
//! - topics discussed so far (set)
//! - sentiment and depth, re-evaluated from fixed word sets on every update
//!
//! Context shapes phrasing only. It never feeds back into intent scores.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

// ==================== TYPE DEFINITIONS ====================

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Sentiment {
    #[default]
    Curious,
    Professional,
    Casual,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Depth {
    #[default]
    Overview,
    Detailed,
    DeepDive,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Curious => "curious",
            Sentiment::Professional => "professional",
            Sentiment::Casual => "casual",
        }
    }
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Overview => "overview",
            Depth::Detailed => "detailed",
            Depth::DeepDive => "deep-dive",
        }
    }
}

// ==================== WORD SETS ====================

const CASUAL_WORDS: &[&str] = &["hey", "cool", "awesome", "lol", "haha", "yo", "dude", "nice", "fun"];
const PROFESSIONAL_WORDS: &[&str] = &[
    "hire", "hiring", "role", "position", "company", "team", "interview", "recruiter", "salary",
    "candidate", "opportunity",
];
const BRIEF_WORDS: &[&str] = &["brief", "briefly", "quick", "quickly", "short", "summary", "tldr", "overview"];
const DETAIL_WORDS: &[&str] = &["detail", "details", "detailed", "explain", "elaborate", "more", "specifically"];
const DEEP_WORDS: &[&str] = &["deep", "depth", "technical", "architecture", "internals", "thoroughly"];

const SENTIMENT_RULES: &[(&[&str], Sentiment)] = &[
    (CASUAL_WORDS, Sentiment::Casual),
    (PROFESSIONAL_WORDS, Sentiment::Professional),
];

const DEPTH_RULES: &[(&[&str], Depth)] = &[
    (BRIEF_WORDS, Depth::Overview),
    (DETAIL_WORDS, Depth::Detailed),
    (DEEP_WORDS, Depth::DeepDive),
];

// ==================== MAIN IMPLEMENTATION ====================

/// Inferred conversational state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    recent_topics: VecDeque<String>,
    discussed: BTreeSet<String>,
    sentiment: Sentiment,
    depth: Depth,
    max_topics: usize,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ConversationContext {
    pub fn new(max_topics: usize) -> Self {
        Self {
            recent_topics: VecDeque::with_capacity(max_topics),
            discussed: BTreeSet::new(),
            sentiment: Sentiment::default(),
            depth: Depth::default(),
            max_topics,
        }
    }

    /// Record one question and its detected intents
    pub fn update(&mut self, query: &str, intents: &[String]) {
        for intent in intents {
            self.recent_topics.push_back(intent.clone());
            while self.recent_topics.len() > self.max_topics {
                self.recent_topics.pop_front();
            }
            self.discussed.insert(intent.clone());
        }

        let words = query_words(query);
        let has_any = |set: &[&str]| words.iter().any(|w| set.contains(&w.as_str()));

        // Re-evaluated from scratch each turn; the last matching rule wins
        self.sentiment = SENTIMENT_RULES
            .iter()
            .filter(|(set, _)| has_any(*set))
            .map(|(_, sentiment)| *sentiment)
            .last()
            .unwrap_or_default();
        self.depth = DEPTH_RULES
            .iter()
            .filter(|(set, _)| has_any(*set))
            .map(|(_, depth)| *depth)
            .last()
            .unwrap_or_default();
    }

    pub fn recent_topics(&self) -> impl Iterator<Item = &str> {
        self.recent_topics.iter().map(String::as_str)
    }

    pub fn topic_count(&self) -> usize {
        self.recent_topics.len()
    }

    pub fn has_discussed(&self, topic: &str) -> bool {
        self.discussed.contains(topic)
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.recent_topics.clear();
        self.discussed.clear();
        self.sentiment = Sentiment::default();
        self.depth = Depth::default();
    }
}

fn query_words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn intents(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_topics_bounded_fifo() {
        let mut ctx = ConversationContext::new(10);
        for i in 0..25 {
            ctx.update("question", &intents(&[&format!("topic{}", i)]));
            assert!(ctx.topic_count() <= 10);
        }
        let topics: Vec<&str> = ctx.recent_topics().collect();
        assert_eq!(topics.first(), Some(&"topic15"));
        assert_eq!(topics.last(), Some(&"topic24"));
    }

    #[test]
    fn test_many_intents_in_one_update() {
        let mut ctx = ConversationContext::new(10);
        let labels: Vec<String> = (0..14).map(|i| format!("t{}", i)).collect();
        ctx.update("q", &labels);
        assert_eq!(ctx.topic_count(), 10);
        assert!(ctx.has_discussed("t0"));
    }

    #[test]
    fn test_sentiment_last_rule_wins() {
        let mut ctx = ConversationContext::default();
        ctx.update("hey, cool site!", &[]);
        assert_eq!(ctx.sentiment(), Sentiment::Casual);

        // casual and professional words: professional is evaluated last
        ctx.update("hey, are you hiring for this role?", &[]);
        assert_eq!(ctx.sentiment(), Sentiment::Professional);

        ctx.update("what do you build?", &[]);
        assert_eq!(ctx.sentiment(), Sentiment::Curious);
    }

    #[test]
    fn test_depth_rules() {
        let mut ctx = ConversationContext::default();
        ctx.update("give me a quick summary", &[]);
        assert_eq!(ctx.depth(), Depth::Overview);

        ctx.update("explain in more detail", &[]);
        assert_eq!(ctx.depth(), Depth::Detailed);

        ctx.update("explain the technical architecture", &[]);
        assert_eq!(ctx.depth(), Depth::DeepDive);
    }

    #[test]
    fn test_clear() {
        let mut ctx = ConversationContext::default();
        ctx.update("hey tell me more", &intents(&["skills"]));
        ctx.clear();
        assert_eq!(ctx.topic_count(), 0);
        assert!(!ctx.has_discussed("skills"));
        assert_eq!(ctx.sentiment(), Sentiment::Curious);
        assert_eq!(ctx.depth(), Depth::Overview);
    }

    #[test]
    fn test_serializes_for_debugging() {
        let mut ctx = ConversationContext::default();
        ctx.update("cool projects", &intents(&["projects"]));
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["sentiment"], "casual");
        assert_eq!(json["recentTopics"][0], "projects");
    }
}
