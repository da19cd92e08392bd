//! FolioCore: Portfolio Avatar Chat Pipeline
//!
//! A Rust/WASM implementation of the rule-based chat pipeline behind the
//! portfolio avatar. Answers visitor questions from a profile document without
//! any hosted model; the hosted LLM path lives in the page and only borrows
//! the prompt context built here.
//!
//! # Architecture
//!
//! ## Profile
//! - `profile/types.rs` - Profile document (every field optional)
//! - `profile/defaults.rs` - Built-in fallback profile
//! - `profile/loader.rs` - JSON hydration with fallback, async fetch helper
//!
//! ## Chat Pipeline
//! - `normalizer.rs` - Lowercase, typo correction, synonym expansion, punctuation collapse
//! - `intent.rs` - Keyword taxonomy (Aho-Corasick) + regex battery scoring
//! - `template.rs` - ~40 ordered question templates (RegexSet)
//! - `answers.rs` - Canned long-form answers keyed by template name
//! - `context.rs` - Topics, sentiment and depth for one conversation
//! - `similarity.rs` - Position-weighted query/candidate similarity
//! - `extractor.rs` - Section extraction and ranking over the profile
//! - `selector.rs` - Ordered response rule table
//! - `cache.rs` - TTL + capacity bounded response cache
//! - `history.rs` - Conversation history and LLM prompt context
//! - `hooks.rs` - Avatar start/stop talking callbacks
//! - `session.rs` - ChatSession: the single entry point
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { ChatSession, fetchProfileText } from 'foliocore';
//!
//! await init();
//!
//! const session = new ChatSession({ cacheTtlSecs: 300 });
//! session.hydrateProfileJson(await fetchProfileText('/profile.json'));
//! session.setTalkHooks(() => avatar.talk(), () => avatar.idle());
//!
//! const reply = session.ask("Walk me through your resume");
//! console.log(reply.response);  // Canned answer
//! console.log(reply.sources);   // ["template:walk_through_resume"]
//! speak(reply.response, () => session.finishTalking());
//! ```

pub mod chat;
pub mod console;
pub mod profile;

// Public exports - Chat pipeline
pub use chat::*;

// Public exports - Profile
pub use profile::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("foliocore v{}", env!("CARGO_PKG_VERSION"))
}
