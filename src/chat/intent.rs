//! IntentClassifier - Topic scoring over the normalized question
//!
//! Two signal sources, summed per intent:
//! - **Taxonomy**: fixed keyword/phrase table matched in one pass via
//!   Aho-Corasick (whole words only). +2 for keywords longer than 4 chars,
//!   +1 otherwise, +0.5 for every repeat of the same keyword.
//! - **Battery**: a fixed set of regexes injecting fixed scores for
//!   question-shape intents ("why" -> motivation, "where" -> location, ...).
//!
//! An intent may list exclusion phrases. If one occurs in the question the
//! intent gets no keyword score (e.g. "latest ai" is news, not ai). Battery
//! scores are never excluded.
//!
//! Output is sorted by score descending; ties keep first-seen order
//! (taxonomy order, then battery order).

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

// ==================== TYPE DEFINITIONS ====================

/// One entry of the intent taxonomy
#[derive(Debug, Clone, Copy)]
pub struct IntentDef {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub excludes: &'static [&'static str],
}

/// A detected intent with its accumulated score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentScore {
    pub intent: String,
    pub score: f32,
}

// ==================== TAXONOMY ====================

pub const TAXONOMY: &[IntentDef] = &[
    IntentDef {
        name: "greeting",
        keywords: &["hello", "hi", "hey", "greetings", "howdy", "good morning", "good afternoon", "good evening"],
        excludes: &[],
    },
    IntentDef {
        name: "about",
        keywords: &["yourself", "who are you", "background", "introduce", "bio", "your story"],
        excludes: &[],
    },
    IntentDef {
        name: "skills",
        keywords: &[
            "skills", "skill", "expertise", "technologies", "tech stack", "proficient",
            "languages", "programming", "tools", "frameworks", "abilities", "good at",
        ],
        excludes: &[],
    },
    IntentDef {
        name: "ai",
        keywords: &[
            "ai", "artificial intelligence", "machine learning", "ml", "llm", "llms",
            "deep learning", "neural", "nlp", "gpt", "generative",
        ],
        excludes: &["ai news", "news about ai", "latest ai", "ai trends", "ai headlines"],
    },
    IntentDef {
        name: "news",
        keywords: &["news", "latest", "trends", "headlines", "recent developments"],
        excludes: &[],
    },
    IntentDef {
        name: "projects",
        keywords: &["projects", "project", "portfolio", "built", "apps", "side project", "github"],
        excludes: &[],
    },
    IntentDef {
        name: "experience",
        keywords: &[
            "experience", "work", "career", "job", "jobs", "company", "companies",
            "role", "roles", "employment", "worked",
        ],
        excludes: &[],
    },
    IntentDef {
        name: "education",
        keywords: &["education", "degree", "university", "college", "school", "studied", "graduate", "major"],
        excludes: &[],
    },
    IntentDef {
        name: "certifications",
        keywords: &["certifications", "certification", "certified", "certificate", "certs", "credentials"],
        excludes: &[],
    },
    IntentDef {
        name: "leadership",
        keywords: &["leadership", "lead", "led", "mentor", "mentoring", "managed", "team lead"],
        excludes: &[],
    },
    IntentDef {
        name: "honors",
        keywords: &["honors", "awards", "award", "achievements", "recognition", "hackathon", "won"],
        excludes: &[],
    },
    IntentDef {
        name: "contact",
        keywords: &["contact", "email", "reach", "linkedin", "github", "phone", "connect"],
        excludes: &[],
    },
    IntentDef {
        name: "location",
        keywords: &["location", "live", "based", "city", "where are you"],
        excludes: &[],
    },
    IntentDef {
        name: "hobbies",
        keywords: &["hobbies", "interests", "fun", "free time", "outside work", "weekend"],
        excludes: &[],
    },
    IntentDef {
        name: "goals",
        keywords: &["goals", "future", "plans", "aspire", "ambition"],
        excludes: &[],
    },
];

/// Question-shape regexes and the intent score each one injects
const BATTERY: &[(&str, &str, f32)] = &[
    (r"\bwhat (do|can|are) you\b", "capabilities", 1.5),
    (r"\bwhy\b", "motivation", 1.0),
    (r"\bwhen\b", "timeline", 1.0),
    (r"\b(how long|years of|since)\b", "timeline", 1.0),
    (r"\bwhere\b", "location", 1.0),
    (r"\bhow (do|did|would) you\b", "approach", 1.0),
    (r"\b(best|favorite|favourite|proudest|most proud)\b", "highlights", 1.0),
    (r"\b(hire|hiring|available|availability|open to)\b", "hiring", 1.5),
];

// ==================== MAIN IMPLEMENTATION ====================

/// Keyword + regex intent scorer
pub struct IntentClassifier {
    automaton: AhoCorasick,
    /// Unique keyword per automaton pattern id
    patterns: Vec<&'static str>,
    battery: RegexSet,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Build the automaton and battery from the static tables
    pub fn new() -> Self {
        let mut patterns: Vec<&'static str> = Vec::new();
        for def in TAXONOMY {
            for &keyword in def.keywords {
                if !patterns.contains(&keyword) {
                    patterns.push(keyword);
                }
            }
        }

        // Standard semantics so overlapping phrases ("team lead", "lead")
        // are all reported
        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .expect("intent keyword table must compile");

        let battery = RegexSet::new(BATTERY.iter().map(|(re, _, _)| *re))
            .expect("intent battery must compile");

        Self {
            automaton,
            patterns,
            battery,
        }
    }

    /// Process-wide instance over the static tables
    pub fn shared() -> &'static IntentClassifier {
        static SHARED: OnceLock<IntentClassifier> = OnceLock::new();
        SHARED.get_or_init(IntentClassifier::new)
    }

    /// Number of distinct taxonomy keywords
    pub fn keyword_count(&self) -> usize {
        self.patterns.len()
    }

    /// Whole-word occurrence count per keyword
    fn keyword_counts(&self, text: &str) -> HashMap<&'static str, usize> {
        let mut counts = HashMap::new();
        for m in self.automaton.find_overlapping_iter(text) {
            if is_word_bounded(text, m.start(), m.end()) {
                *counts.entry(self.patterns[m.pattern().as_usize()]).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Score every intent; returns nonzero scores, highest first
    pub fn score(&self, normalized: &str) -> Vec<IntentScore> {
        let counts = self.keyword_counts(normalized);
        let mut scores: Vec<IntentScore> = Vec::new();

        for def in TAXONOMY {
            if def.excludes.iter().any(|phrase| contains_phrase(normalized, phrase)) {
                continue;
            }
            let mut score = 0.0f32;
            for keyword in def.keywords {
                let count = counts.get(keyword).copied().unwrap_or(0);
                if count == 0 {
                    continue;
                }
                let base = if keyword.chars().count() > 4 { 2.0 } else { 1.0 };
                score += base + 0.5 * (count - 1) as f32;
            }
            add_score(&mut scores, def.name, score);
        }

        for idx in self.battery.matches(normalized).iter() {
            let (_, intent, bonus) = BATTERY[idx];
            add_score(&mut scores, intent, bonus);
        }

        scores.retain(|s| s.score > 0.0);
        // sort_by is stable: equal scores keep first-seen order
        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scores
    }

    /// Intent labels, highest score first
    pub fn detect(&self, normalized: &str) -> Vec<String> {
        self.score(normalized).into_iter().map(|s| s.intent).collect()
    }
}

fn add_score(scores: &mut Vec<IntentScore>, intent: &str, amount: f32) {
    match scores.iter_mut().find(|s| s.intent == intent) {
        Some(existing) => existing.score += amount,
        None => scores.push(IntentScore {
            intent: intent.to_string(),
            score: amount,
        }),
    }
}

/// Whole-word occurrence of `phrase` anywhere in `text`
fn contains_phrase(text: &str, phrase: &str) -> bool {
    text.match_indices(phrase)
        .any(|(start, m)| is_word_bounded(text, start, start + m.len()))
}

/// True when the match is not glued to neighbouring letters or digits
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::normalizer::normalize;

    fn classify(question: &str) -> Vec<IntentScore> {
        IntentClassifier::shared().score(&normalize(question))
    }

    fn score_of(scores: &[IntentScore], intent: &str) -> f32 {
        scores.iter().find(|s| s.intent == intent).map(|s| s.score).unwrap_or(0.0)
    }

    #[test]
    fn test_skills_in_ai() {
        let scores = classify("what are your skills in AI");
        let labels: Vec<&str> = scores.iter().map(|s| s.intent.as_str()).collect();

        assert!(labels.contains(&"skills"));
        assert!(labels.contains(&"ai"));
        // "ai" (1) + "artificial intelligence" from synonym expansion (2)
        assert_eq!(score_of(&scores, "ai"), 3.0);
        assert_eq!(labels[0], "skills");
    }

    #[test]
    fn test_keyword_weights() {
        let classifier = IntentClassifier::shared();
        // "github" (>4 chars) counts 2 for both projects and contact
        let scores = classifier.score("github");
        assert_eq!(score_of(&scores, "projects"), 2.0);
        assert_eq!(score_of(&scores, "contact"), 2.0);
        // "ml" counts 1
        assert_eq!(score_of(&classifier.score("ml"), "ai"), 1.0);
    }

    #[test]
    fn test_repeats_add_half() {
        let scores = IntentClassifier::shared().score("projects and more projects and projects");
        assert_eq!(score_of(&scores, "projects"), 3.0);
    }

    #[test]
    fn test_whole_words_only() {
        // "said" contains "ai", "ship" contains "hi"
        let scores = IntentClassifier::shared().score("she said relationship");
        assert_eq!(score_of(&scores, "ai"), 0.0);
        assert_eq!(score_of(&scores, "greeting"), 0.0);
    }

    #[test]
    fn test_ai_excluded_by_news_phrasing() {
        let scores = IntentClassifier::shared().score("what is the latest ai news");
        assert_eq!(score_of(&scores, "ai"), 0.0);
        assert!(score_of(&scores, "news") > 0.0);
    }

    #[test]
    fn test_exclusions_are_whole_words() {
        let c = IntentClassifier::new();
        assert!(c.detect("what are the latest aims of your ai work").contains(&"ai".to_string()));
        assert!(!c.detect("the latest ai news").contains(&"ai".to_string()));
        assert!(contains_phrase("any ai news today", "ai news"));
        assert!(!contains_phrase("any ai newsletters", "ai news"));
    }

    #[test]
    fn test_battery_injects_intents() {
        let scores = IntentClassifier::shared().score("why did you move and where do you live");
        assert_eq!(score_of(&scores, "motivation"), 1.0);
        // "live" keyword (1) + "where" battery (1)
        assert_eq!(score_of(&scores, "location"), 2.0);
    }

    #[test]
    fn test_capabilities_battery() {
        let scores = IntentClassifier::shared().score("what can you do");
        assert_eq!(score_of(&scores, "capabilities"), 1.5);
    }

    #[test]
    fn test_stable_tie_order() {
        // education and certifications both score 2; taxonomy order wins
        let labels = IntentClassifier::shared().detect("degree certs");
        assert_eq!(labels, vec!["education".to_string(), "certifications".to_string()]);
    }

    #[test]
    fn test_overlapping_phrases_both_count() {
        let classifier = IntentClassifier::shared();
        // "team lead" (2) + "lead" (1)
        assert_eq!(score_of(&classifier.score("team lead"), "leadership"), 3.0);
        // github is shared, stored once
        let total: usize = TAXONOMY.iter().map(|d| d.keywords.len()).sum();
        assert_eq!(classifier.keyword_count(), total - 1);
    }

    #[test]
    fn test_empty_question() {
        assert!(IntentClassifier::shared().detect("").is_empty());
        assert!(IntentClassifier::shared().detect("zzz qqq").is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let scores = classify("tell me about your work experience and your degree");
        for pair in scores.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
