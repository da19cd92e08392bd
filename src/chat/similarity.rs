//! Query/candidate similarity for ranking profile fragments
//!
//! A heuristic, not a model: no embeddings and no corpus statistics.
//!
//! ```text
//! score = 3.0·boost                       if the whole query occurs in the candidate
//!       + Σ boost·(1 + (n - i)/n)         for each query word i present in the candidate
//!       + Σ 0.5·boost·prefix_matches(i)   candidate words starting with word i
//! score /= n                              n = query words longer than 2 chars
//! ```
//!
//! Earlier words weigh more. Every term is non-negative and `boost` is
//! clamped at 0, so the result is never negative.

use unicode_segmentation::UnicodeSegmentation;

/// Minimum word length (exclusive) for a query word to count
const MIN_WORD_LEN: usize = 2;

pub fn advanced_similarity(query: &str, candidate: &str, boost: f32) -> f32 {
    let boost = boost.max(0.0);
    let query = query.trim().to_lowercase();
    let candidate = candidate.to_lowercase();

    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let mut score = 0.0f32;
    if candidate.contains(query.as_str()) {
        score += 3.0 * boost;
    }

    let words: Vec<&str> = query
        .unicode_words()
        .filter(|w| w.chars().count() > MIN_WORD_LEN)
        .collect();
    if words.is_empty() {
        return score;
    }

    let candidate_words: Vec<&str> = candidate.unicode_words().collect();

    let n = words.len() as f32;
    for (i, word) in words.iter().enumerate() {
        if candidate.contains(word) {
            score += boost * (1.0 + (n - i as f32) / n);
        }
        let prefixed = candidate_words.iter().filter(|w| w.starts_with(word)).count();
        score += 0.5 * boost * prefixed as f32;
    }

    score / n
}

// =============================================================================
// Tests
// =============================================================================
