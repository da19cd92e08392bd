//! Chat pipeline
//!
//! Rule-based question answering over the profile. [`ChatSession`] is the
//! only entry point the page needs; the other modules are its stages.

pub mod answers;
pub mod cache;
pub mod config;
pub mod context;
pub mod extractor;
pub mod history;
pub mod hooks;
pub mod intent;
pub mod normalizer;
pub mod selector;
pub mod session;
pub mod similarity;
pub mod template;

#[cfg(test)]
mod tests;

pub use answers::{canned_answer, canned_or_stub};
pub use cache::ResponseCache;
pub use config::ChatConfig;
pub use context::{ConversationContext, Depth, Sentiment};
pub use extractor::{extract_sections, rank_fragments, ExtractRequest, Fragment, Section};
pub use history::{ConversationHistory, Message, PromptContext, Role};
pub use hooks::{JsTalkHooks, NoopHooks, TalkHooks};
pub use intent::{IntentClassifier, IntentScore};
pub use normalizer::normalize;
pub use selector::{select, ResponseRule, Selection};
pub use session::{
    ChatReply, ChatSession, ReplyTimings, SessionStats, StageError, APOLOGY_MESSAGE, BLANK_QUESTION_NUDGE,
};
pub use similarity::advanced_similarity;
pub use template::{TemplateMatch, TemplateMatcher};
