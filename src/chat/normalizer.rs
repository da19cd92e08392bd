//! Question Normalizer
//!
//! Four passes over the raw question:
//! 1. Lowercase + trim
//! 2. Whole-word typo correction from a fixed table
//! 3. Synonym expansion: synonyms of recognized root words are appended
//! 4. Punctuation collapse: every non-alphanumeric, non-space char becomes a
//!    space, runs of whitespace become one space
//!
//! Normalizing an already normalized string returns it unchanged: corrections
//! never produce a typo key, and synonym expansion runs to a fixed point.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

// ==================== DICTIONARIES ====================

/// Common misspellings (typo, correction). Corrections must not be typos.
const TYPOS: &[(&str, &str)] = &[
    ("experiance", "experience"), ("expereince", "experience"), ("experince", "experience"),
    ("projcts", "projects"), ("projets", "projects"), ("porjects", "projects"),
    ("projetc", "project"), ("skils", "skills"), ("skilss", "skills"), ("sklls", "skills"),
    ("educaton", "education"), ("eduction", "education"),
    ("certifcations", "certifications"), ("certfications", "certifications"),
    ("certificatons", "certifications"), ("leadrship", "leadership"),
    ("programing", "programming"), ("langauge", "language"), ("langauges", "languages"),
    ("tecnologies", "technologies"), ("technolgies", "technologies"),
    ("machne", "machine"), ("learnign", "learning"), ("artifical", "artificial"),
    ("intelligance", "intelligence"), ("contcat", "contact"), ("emial", "email"),
    ("locaton", "location"), ("hobbys", "hobbies"), ("backgroud", "background"),
    ("resmue", "resume"), ("resum", "resume"),
    ("teh", "the"), ("wht", "what"), ("wat", "what"), ("whats", "what is"),
    ("ur", "your"), ("yor", "your"), ("u", "you"), ("r", "are"), ("abt", "about"),
    ("pls", "please"), ("plz", "please"), ("thx", "thanks"),
];

/// Root word -> synonyms appended when the root is present
const SYNONYMS: &[(&str, &[&str])] = &[
    ("job", &["work", "experience", "career"]),
    ("jobs", &["work", "experience", "career"]),
    ("work", &["experience", "career"]),
    ("career", &["experience"]),
    ("project", &["projects", "portfolio", "built"]),
    ("projects", &["portfolio", "built"]),
    ("skill", &["skills", "expertise"]),
    ("skills", &["expertise", "technologies"]),
    ("tech", &["technologies", "skills"]),
    ("stack", &["technologies", "skills"]),
    ("languages", &["programming", "skills"]),
    ("ai", &["artificial", "intelligence"]),
    ("ml", &["machine", "learning"]),
    ("school", &["education", "university"]),
    ("college", &["education", "university", "degree"]),
    ("university", &["education", "degree"]),
    ("degree", &["education"]),
    ("studied", &["education"]),
    ("certs", &["certifications"]),
    ("certificate", &["certifications"]),
    ("certified", &["certifications"]),
    ("reach", &["contact"]),
    ("email", &["contact"]),
    ("hobby", &["hobbies", "interests"]),
    ("hobbies", &["interests"]),
    ("awards", &["honors"]),
    ("achievements", &["honors", "awards"]),
    ("leader", &["leadership"]),
    ("resume", &["experience", "background"]),
    ("cv", &["resume", "experience", "background"]),
    ("live", &["location"]),
    ("based", &["location"]),
];

fn typo_table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| TYPOS.iter().copied().collect())
}

// ==================== PASSES ====================

/// Full normalization pipeline
pub fn normalize(question: &str) -> String {
    let lowered = question.trim().to_lowercase();
    let corrected = correct_typos(&lowered);
    let expanded = expand_synonyms(&corrected);
    collapse_punctuation(&expanded)
}

/// Replace whole-word typos. Words are maximal alphanumeric runs.
pub fn correct_typos(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            word.push(ch);
        } else {
            flush_word(&mut out, &mut word);
            out.push(ch);
        }
    }
    flush_word(&mut out, &mut word);
    out
}

fn flush_word(out: &mut String, word: &mut String) {
    if word.is_empty() {
        return;
    }
    match typo_table().get(word.as_str()) {
        Some(fix) => out.push_str(fix),
        None => out.push_str(word),
    }
    word.clear();
}

/// Append synonyms of every recognized root that are not already present.
/// Repeats until no new word is added, so appended synonyms that are roots
/// themselves get expanded too.
pub fn expand_synonyms(text: &str) -> String {
    let mut present: HashSet<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let mut appended: Vec<&str> = Vec::new();

    loop {
        let mut changed = false;
        for (root, synonyms) in SYNONYMS {
            if !present.contains(root) {
                continue;
            }
            for &synonym in synonyms.iter() {
                if present.insert(synonym) {
                    appended.push(synonym);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    if appended.is_empty() {
        text.to_string()
    } else {
        format!("{} {}", text, appended.join(" "))
    }
}

/// Turn punctuation into spaces and squeeze whitespace
pub fn collapse_punctuation(text: &str) -> String {
    let spaced: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

// =============================================================================
// Tests
// =============================================================================
