//! ResponseSelector - Ordered rule table
//!
//! Rules are tried in order; the first to produce text wins:
//!
//! | rule       | looks at              | answers with                          |
//! |------------|-----------------------|---------------------------------------|
//! | `greeting` | normalized question   | identity block                        |
//! | `template` | original question     | canned paragraph for the template     |
//! | `sections` | ranked fragments      | top fragments joined by blank lines   |
//! | `fallback` | profile               | identity block + top skills           |
//!
//! `fallback` always answers, so selection is total.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::answers::canned_or_stub;
use super::config::ChatConfig;
use super::context::Sentiment;
use super::extractor::Fragment;
use super::template::TemplateMatch;
use crate::profile::Profile;

/// Bare greetings (whole question) and identity requests (anywhere)
const GREETING_PATTERN: &str = r"^(hi|hello|hey|greetings|howdy|yo|good (morning|afternoon|evening))( there)?$|\b(who are you|introduce yourself|tell me about yourself)\b";

fn greeting_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(GREETING_PATTERN).expect("greeting pattern must compile"))
}

// =============================================================================
// Types
// =============================================================================

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseRule {
    Greeting,
    Template,
    Sections,
    Fallback,
}

impl ResponseRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseRule::Greeting => "greeting",
            ResponseRule::Template => "template",
            ResponseRule::Sections => "sections",
            ResponseRule::Fallback => "fallback",
        }
    }
}

/// Everything the rules may look at for one question
pub struct SelectInput<'a> {
    pub normalized: &'a str,
    pub template: Option<&'a TemplateMatch>,
    /// Already ranked and truncated
    pub fragments: &'a [Fragment],
    pub sentiment: Sentiment,
    pub profile: &'a Profile,
    pub config: &'a ChatConfig,
}

/// The chosen reply
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub text: String,
    pub rule: ResponseRule,
    pub sources: Vec<String>,
}

type RuleFn = fn(&SelectInput) -> Option<String>;

/// Order is precedence
const RULES: &[(ResponseRule, RuleFn)] = &[
    (ResponseRule::Greeting, greeting_rule),
    (ResponseRule::Template, template_rule),
    (ResponseRule::Sections, sections_rule),
    (ResponseRule::Fallback, fallback_rule),
];

// =============================================================================
// Selection
// =============================================================================

pub fn select(input: &SelectInput) -> Selection {
    for (rule, handler) in RULES {
        if let Some(text) = handler(input) {
            return Selection {
                text,
                rule: *rule,
                sources: sources_for(*rule, input),
            };
        }
    }

    // Unreachable while the table ends with `fallback`
    Selection {
        text: identity_block(input.profile, input.sentiment),
        rule: ResponseRule::Fallback,
        sources: vec!["profile".to_string()],
    }
}

/// True when the normalized question is a greeting or asks who we are
pub fn is_greeting(normalized: &str) -> bool {
    greeting_regex().is_match(normalized.trim())
}

fn sources_for(rule: ResponseRule, input: &SelectInput) -> Vec<String> {
    match rule {
        ResponseRule::Greeting | ResponseRule::Fallback => vec!["profile".to_string()],
        ResponseRule::Template => input
            .template
            .map(|m| vec![format!("template:{}", m.name)])
            .unwrap_or_default(),
        ResponseRule::Sections => {
            let mut sources: Vec<String> = Vec::new();
            for fragment in input.fragments {
                if !sources.contains(&fragment.source) {
                    sources.push(fragment.source.clone());
                }
            }
            sources
        }
    }
}

fn greeting_rule(input: &SelectInput) -> Option<String> {
    is_greeting(input.normalized).then(|| identity_block(input.profile, input.sentiment))
}

fn template_rule(input: &SelectInput) -> Option<String> {
    input.template.map(|m| canned_or_stub(&m.name))
}

fn sections_rule(input: &SelectInput) -> Option<String> {
    if input.fragments.is_empty() {
        return None;
    }
    let parts: Vec<&str> = input.fragments.iter().map(|f| f.content.as_str()).collect();
    Some(parts.join("\n\n"))
}

fn fallback_rule(input: &SelectInput) -> Option<String> {
    let mut out = identity_block(input.profile, input.sentiment);
    let skills = input.profile.top_skills(input.config.summary_skill_count);
    if skills.is_empty() {
        out.push_str(" Ask me about my projects, skills, or experience.");
    } else {
        out.push_str(&format!(
            " My top skills include {}. Feel free to ask about my projects or experience.",
            skills.join(", ")
        ));
    }
    Some(out)
}

// =============================================================================
// Rendering
// =============================================================================

fn opener(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Casual => "Hey there!",
        Sentiment::Professional => "Hello, thanks for stopping by.",
        Sentiment::Curious => "Hi!",
    }
}

/// Who we are, built from whatever the profile has
pub fn identity_block(profile: &Profile, sentiment: Sentiment) -> String {
    let mut out = format!("{} I'm {}", opener(sentiment), profile.display_name());
    if let Some(location) = &profile.location {
        out.push_str(&format!(", based in {}", location));
    }
    out.push('.');

    for line in [&profile.tagline, &profile.bio, &profile.summary].into_iter().flatten() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        out.push(' ');
        out.push_str(line);
        if !line.ends_with(&['.', '!', '?'][..]) {
            out.push('.');
        }
    }

    if let Some(contact) = profile.contact.summary() {
        out.push_str(&format!(" You can reach me via {}.", contact));
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
