//! ChatSession: Question in, reply out
//!
//! One session per page. Owns the conversation context, response cache,
//! history, profile and talk hooks, and runs the pipeline for each question:
//!
//! ```text
//! question ─► cache? ─hit──────────────────────────────────────┐
//!               │miss                                          │
//!               ▼                                              ▼
//!          normalize ─► classify ─► context ─► template ─► extract ─► select
//!                                                              │
//!                                     cache ◄── history ◄──────┘──► start_talking
//! ```
//!
//! A greeting or a template match short-circuits the rest of the pipeline:
//! extraction does not run and `last_fragments` stays empty.
//!
//! Every stage is guarded: a failing stage records a [`StageError`] and
//! degrades to its neutral value. If the reply itself cannot be produced the
//! session answers with [`APOLOGY_MESSAGE`].

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use wasm_bindgen::prelude::*;

use super::cache::ResponseCache;
use super::config::ChatConfig;
use super::context::ConversationContext;
use super::extractor::{extract_sections, rank_fragments, ExtractRequest, Fragment};
use super::history::{ConversationHistory, PromptContext};
use super::hooks::{JsTalkHooks, NoopHooks, TalkHooks};
use super::intent::IntentClassifier;
use super::normalizer::normalize;
use super::selector::{is_greeting, select, ResponseRule, SelectInput};
use super::template::{TemplateMatch, TemplateMatcher};
use crate::console;
use crate::profile::{default_profile, load_profile_or_default, Profile};

/// Reply when the pipeline cannot produce an answer at all
pub const APOLOGY_MESSAGE: &str =
    "Sorry, I'm having a little trouble answering that right now. Could you try asking in a different way?";

/// Reply to an empty question
pub const BLANK_QUESTION_NUDGE: &str =
    "Go ahead and ask me anything about my projects, skills, or experience!";

// =============================================================================
// Types
// =============================================================================

/// Error during a pipeline stage (non-fatal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageError {
    pub stage: String,
    pub message: String,
}

/// Time spent per stage, in microseconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyTimings {
    pub total_us: u64,
    pub normalize_us: u64,
    pub classify_us: u64,
    pub template_us: u64,
    pub extract_us: u64,
    pub select_us: u64,
}

/// Everything `ask` knows about its answer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    /// Citation labels, e.g. `projects:Trail Planner`, `template:why_hire`
    pub sources: Vec<String>,
    pub intents: Vec<String>,
    /// Matched template name
    pub pattern: Option<String>,
    /// Winning response rule; `None` for nudges and apologies
    pub rule: Option<ResponseRule>,
    pub cached: bool,
    pub errors: Vec<StageError>,
    pub timings: ReplyTimings,
}

/// What a cache hit replays
#[derive(Debug, Clone)]
struct CachedReply {
    response: String,
    sources: Vec<String>,
    intents: Vec<String>,
    pattern: Option<String>,
    rule: Option<ResponseRule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub questions: u64,
    pub pipeline_runs: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Percentage
    pub cache_hit_rate: f64,
    pub cached_entries: usize,
    pub history_len: usize,
}

// =============================================================================
// ChatSession
// =============================================================================

#[wasm_bindgen]
pub struct ChatSession {
    config: ChatConfig,
    profile: Profile,
    context: ConversationContext,
    cache: ResponseCache<CachedReply>,
    history: ConversationHistory,
    hooks: Box<dyn TalkHooks>,
    talking: bool,
    questions: u64,
    pipeline_runs: u64,
    last_fragments: Vec<Fragment>,
    /// Panic message raised inside the pipeline, outside any stage guard
    #[cfg(test)]
    pub(crate) fail_pipeline: Option<&'static str>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(ChatConfig::default())
    }
}

#[wasm_bindgen]
impl ChatSession {
    /// Create a session from a (possibly partial) config object
    #[wasm_bindgen(constructor)]
    pub fn js_new(config: JsValue) -> ChatSession {
        if config.is_undefined() || config.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value::<ChatConfig>(config) {
            Ok(config) => Self::new(config),
            Err(e) => {
                console::warn(&format!("[ChatSession] Invalid config, using defaults: {}", e));
                Self::default()
            }
        }
    }

    /// Replace the profile from a JS object. Returns true when the built-in
    /// profile had to be used instead.
    #[wasm_bindgen(js_name = hydrateProfile)]
    pub fn js_hydrate_profile(&mut self, profile: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<Profile>(profile) {
            Ok(profile) => {
                self.set_profile(profile);
                false
            }
            Err(e) => {
                console::warn(&format!("[ChatSession] Invalid profile object: {}; using built-in profile", e));
                self.set_profile(default_profile());
                true
            }
        }
    }

    /// Replace the profile from JSON text. Returns true on fallback.
    #[wasm_bindgen(js_name = hydrateProfileJson)]
    pub fn js_hydrate_profile_json(&mut self, json: &str) -> bool {
        self.hydrate_profile_json(json)
    }

    /// Answer a question (JS binding). Returns a `ChatReply` object.
    #[wasm_bindgen(js_name = ask)]
    pub fn js_ask(&mut self, question: &str) -> JsValue {
        let reply = self.ask(question);
        match serde_wasm_bindgen::to_value(&reply) {
            Ok(v) => v,
            Err(e) => {
                console::error(&format!("[ChatSession] Serialization failed: {:?}", e));
                JsValue::from_str(&reply.response)
            }
        }
    }

    /// Answer a question, returning only the text
    #[wasm_bindgen(js_name = askText)]
    pub fn ask_text(&mut self, question: &str) -> String {
        self.ask(question).response
    }

    /// Register the avatar's start/stop talking callbacks
    #[wasm_bindgen(js_name = setTalkHooks)]
    pub fn js_set_talk_hooks(&mut self, start: Option<js_sys::Function>, stop: Option<js_sys::Function>) {
        self.set_talk_hooks(Box::new(JsTalkHooks::new(start, stop)));
    }

    /// The page finished speaking the last reply
    #[wasm_bindgen(js_name = finishTalking)]
    pub fn finish_talking(&mut self) {
        if self.talking {
            self.talking = false;
            self.hooks.stop_talking();
        }
    }

    #[wasm_bindgen(js_name = isTalking)]
    pub fn is_talking(&self) -> bool {
        self.talking
    }

    /// Reset context, cache, history and stats. The profile is kept.
    #[wasm_bindgen(js_name = clear)]
    pub fn clear(&mut self) {
        self.finish_talking();
        self.context.clear();
        self.cache.clear();
        self.history.clear();
        self.questions = 0;
        self.pipeline_runs = 0;
        self.last_fragments.clear();
    }

    #[wasm_bindgen(js_name = stats)]
    pub fn js_stats(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.stats()).unwrap_or(JsValue::NULL)
    }

    /// Conversation context for debugging
    #[wasm_bindgen(js_name = contextSnapshot)]
    pub fn js_context_snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.context).unwrap_or(JsValue::NULL)
    }

    /// Prompt context for a hosted model, for `question`
    #[wasm_bindgen(js_name = buildPromptContext)]
    pub fn js_build_prompt_context(&self, question: &str) -> JsValue {
        serde_wasm_bindgen::to_value(&self.build_prompt_context(question)).unwrap_or(JsValue::NULL)
    }
}

impl ChatSession {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            context: ConversationContext::new(config.max_topics),
            cache: ResponseCache::new(Duration::from_secs(config.cache_ttl_secs), config.cache_capacity),
            history: ConversationHistory::new(config.max_history),
            profile: default_profile(),
            hooks: Box::new(NoopHooks),
            talking: false,
            questions: 0,
            pipeline_runs: 0,
            last_fragments: Vec::new(),
            #[cfg(test)]
            fail_pipeline: None,
            config,
        }
    }

    pub fn with_profile(config: ChatConfig, profile: Profile) -> Self {
        let mut session = Self::new(config);
        session.profile = profile;
        session
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Fragments retrieved by the last pipeline run
    pub fn last_fragments(&self) -> &[Fragment] {
        &self.last_fragments
    }

    /// Replace the profile. Cached answers were built from the old one.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
        self.cache.clear();
    }

    /// Replace the profile from JSON text, falling back to the built-in
    /// profile. Returns true on fallback.
    pub fn hydrate_profile_json(&mut self, json: &str) -> bool {
        let load = load_profile_or_default(json);
        self.set_profile(load.profile);
        load.used_fallback
    }

    pub fn set_talk_hooks(&mut self, hooks: Box<dyn TalkHooks>) {
        self.hooks = hooks;
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            questions: self.questions,
            pipeline_runs: self.pipeline_runs,
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
            cache_hit_rate: self.cache.hit_rate(),
            cached_entries: self.cache.len(),
            history_len: self.history.len(),
        }
    }

    /// Answer one question
    pub fn ask(&mut self, question: &str) -> ChatReply {
        let start = instant::Instant::now();
        self.questions += 1;

        // A new question cuts off the reply still being spoken
        self.finish_talking();

        let trimmed = question.trim();
        if trimmed.is_empty() {
            return self.respond(ChatReply {
                response: BLANK_QUESTION_NUDGE.to_string(),
                ..ChatReply::default()
            });
        }

        let key = trimmed.to_lowercase();
        if let Some(hit) = self.cache.get(&key) {
            console::log(&format!("[ChatSession] Cache hit: {}", key));
            self.context.update(trimmed, &hit.intents);
            self.history.record_exchange(trimmed, &hit.response);
            let reply = ChatReply {
                response: hit.response,
                sources: hit.sources,
                intents: hit.intents,
                pattern: hit.pattern,
                rule: hit.rule,
                cached: true,
                errors: Vec::new(),
                timings: ReplyTimings {
                    total_us: start.elapsed().as_micros() as u64,
                    ..ReplyTimings::default()
                },
            };
            return self.respond(reply);
        }

        self.pipeline_runs += 1;
        let mut reply = match panic::catch_unwind(AssertUnwindSafe(|| self.run_pipeline(trimmed))) {
            Ok(reply) => reply,
            Err(payload) => {
                let message = panic_message(&*payload);
                console::error(&format!("[ChatSession] Pipeline failed: {}", message));
                ChatReply {
                    response: APOLOGY_MESSAGE.to_string(),
                    errors: vec![StageError {
                        stage: "pipeline".to_string(),
                        message,
                    }],
                    ..ChatReply::default()
                }
            }
        };
        reply.timings.total_us = start.elapsed().as_micros() as u64;

        // Degraded answers are not worth replaying
        if reply.errors.is_empty() && reply.rule.is_some() {
            self.cache.put(
                &key,
                CachedReply {
                    response: reply.response.clone(),
                    sources: reply.sources.clone(),
                    intents: reply.intents.clone(),
                    pattern: reply.pattern.clone(),
                    rule: reply.rule,
                },
            );
        }
        self.history.record_exchange(trimmed, &reply.response);

        self.respond(reply)
    }

    /// Fire the start hook and hand the reply back
    fn respond(&mut self, reply: ChatReply) -> ChatReply {
        self.talking = true;
        self.hooks.start_talking();
        reply
    }

    fn run_pipeline(&mut self, question: &str) -> ChatReply {
        let mut errors: Vec<StageError> = Vec::new();
        let mut timings = ReplyTimings::default();

        #[cfg(test)]
        if let Some(message) = self.fail_pipeline {
            panic!("{}", message);
        }

        let t = instant::Instant::now();
        let normalized = guarded("normalize", &mut errors, question.to_lowercase(), || normalize(question));
        timings.normalize_us = t.elapsed().as_micros() as u64;

        let t = instant::Instant::now();
        let intents = guarded("classify", &mut errors, Vec::new(), || {
            IntentClassifier::shared().detect(&normalized)
        });
        timings.classify_us = t.elapsed().as_micros() as u64;

        self.context.update(question, &intents);

        let t = instant::Instant::now();
        let template: Option<TemplateMatch> = guarded("template", &mut errors, None, || {
            TemplateMatcher::shared().find(question)
        });
        timings.template_us = t.elapsed().as_micros() as u64;

        // A greeting or template answers on its own; extraction is skipped
        let short_circuit = template.is_some() || is_greeting(&normalized);

        let fragments = if short_circuit {
            Vec::new()
        } else {
            let t = instant::Instant::now();
            let req = ExtractRequest {
                profile: &self.profile,
                normalized: &normalized,
                intents: &intents,
                depth: self.context.depth(),
                config: &self.config,
            };
            let fragments = guarded("extract", &mut errors, Vec::new(), || {
                rank_fragments(extract_sections(&req), self.config.max_fragments)
            });
            timings.extract_us = t.elapsed().as_micros() as u64;
            fragments
        };

        let t = instant::Instant::now();
        let selection = {
            let input = SelectInput {
                normalized: &normalized,
                template: template.as_ref(),
                fragments: &fragments,
                sentiment: self.context.sentiment(),
                profile: &self.profile,
                config: &self.config,
            };
            guarded("select", &mut errors, None, || Some(select(&input)))
        };
        timings.select_us = t.elapsed().as_micros() as u64;

        self.last_fragments = fragments;

        match selection {
            Some(selection) => ChatReply {
                response: selection.text,
                sources: selection.sources,
                intents,
                pattern: template.map(|m| m.name),
                rule: Some(selection.rule),
                cached: false,
                errors,
                timings,
            },
            None => ChatReply {
                response: APOLOGY_MESSAGE.to_string(),
                intents,
                pattern: template.map(|m| m.name),
                errors,
                timings,
                ..ChatReply::default()
            },
        }
    }

    /// Prompt context for a hosted model. Does not touch session state.
    pub fn build_prompt_context(&self, question: &str) -> PromptContext {
        let normalized = normalize(question);
        let intents = IntentClassifier::shared().detect(&normalized);
        let req = ExtractRequest {
            profile: &self.profile,
            normalized: &normalized,
            intents: &intents,
            depth: self.context.depth(),
            config: &self.config,
        };
        let retrieved = rank_fragments(extract_sections(&req), self.config.max_fragments);
        PromptContext::build(&self.profile, retrieved, &self.history)
    }
}

// =============================================================================
// Stage guard
// =============================================================================

/// Run one stage; on panic record a `StageError` and use `neutral`
pub(crate) fn guarded<T>(stage: &str, errors: &mut Vec<StageError>, neutral: T, f: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            let message = panic_message(&*payload);
            console::error(&format!("[ChatSession] Stage '{}' failed: {}", stage, message));
            errors.push(StageError {
                stage: stage.to_string(),
                message,
            });
            neutral
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown failure".to_string()
    }
}
