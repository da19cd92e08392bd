//! Tests for ChatSession state: cache, hooks, history, stats
//!
//! Contract tests for everything a session remembers between questions.

use std::cell::RefCell;
use std::rc::Rc;

use crate::chat::session::guarded;
use crate::chat::{
    ChatConfig, ChatSession, ResponseRule, StageError, TalkHooks, APOLOGY_MESSAGE,
    BLANK_QUESTION_NUDGE,
};
use crate::profile::{default_profile, Profile};

/// Records hook calls in order
struct Recorder(Rc<RefCell<Vec<&'static str>>>);

impl TalkHooks for Recorder {
    fn start_talking(&self) {
        self.0.borrow_mut().push("start");
    }

    fn stop_talking(&self) {
        self.0.borrow_mut().push("stop");
    }
}

fn session_with_recorder() -> (ChatSession, Rc<RefCell<Vec<&'static str>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut session = ChatSession::default();
    session.set_talk_hooks(Box::new(Recorder(Rc::clone(&calls))));
    (session, calls)
}

// ============================================================================
// Cache
// ============================================================================

#[test]
fn test_repeat_question_is_served_from_cache() {
    let mut session = ChatSession::default();
    let first = session.ask("Tell me about your projects");
    let second = session.ask("Tell me about your projects");

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(first.response, second.response);
    assert_eq!(first.sources, second.sources);
    assert_eq!(first.intents, second.intents);
    assert_eq!(session.stats().pipeline_runs, 1);
    assert_eq!(session.stats().cache_hits, 1);
}

#[test]
fn test_cache_key_ignores_case_and_padding() {
    let mut session = ChatSession::default();
    session.ask("What are your skills?");
    let reply = session.ask("   what are your SKILLS?  ");
    assert!(reply.cached);
}

#[test]
fn test_51st_question_evicts_oldest() {
    let mut session = ChatSession::default();
    for i in 0..51 {
        session.ask(&format!("question number {}", i));
    }
    assert_eq!(session.stats().cached_entries, 50);

    assert!(session.ask("question number 50").cached);
    assert!(session.ask("question number 1").cached);
    assert!(!session.ask("question number 0").cached);
}

#[test]
fn test_no_cache_config() {
    let mut session = ChatSession::new(ChatConfig::no_cache());
    session.ask("hi");
    let reply = session.ask("hi");
    assert!(!reply.cached);
    assert_eq!(session.stats().pipeline_runs, 2);
}

#[test]
fn test_new_profile_invalidates_cache() {
    let mut session = ChatSession::default();
    session.ask("who are you");
    session.set_profile(Profile {
        name: Some("Sam Okafor".into()),
        ..Profile::default()
    });
    let reply = session.ask("who are you");
    assert!(!reply.cached);
    assert!(reply.response.contains("Sam Okafor"));
}

// ============================================================================
// Talk hooks
// ============================================================================

#[test]
fn test_start_fires_once_per_reply() {
    let (mut session, calls) = session_with_recorder();
    session.ask("hi");
    assert_eq!(*calls.borrow(), vec!["start"]);
    assert!(session.is_talking());
}

#[test]
fn test_finish_talking_fires_stop_once() {
    let (mut session, calls) = session_with_recorder();
    session.ask("hi");
    session.finish_talking();
    session.finish_talking();
    assert_eq!(*calls.borrow(), vec!["start", "stop"]);
    assert!(!session.is_talking());
}

#[test]
fn test_new_question_interrupts_reply() {
    let (mut session, calls) = session_with_recorder();
    session.ask("hi");
    session.ask("what are your skills");
    assert_eq!(*calls.borrow(), vec!["start", "stop", "start"]);
}

#[test]
fn test_no_stop_before_first_reply() {
    let (mut session, calls) = session_with_recorder();
    session.finish_talking();
    assert!(calls.borrow().is_empty());
}

// ============================================================================
// History, context, stats
// ============================================================================

#[test]
fn test_history_records_exchanges() {
    let mut session = ChatSession::default();
    session.ask("hi");
    session.ask("hi");
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.stats().history_len, 4);
}

#[test]
fn test_blank_question_nudges() {
    let mut session = ChatSession::default();
    let reply = session.ask("   ");
    assert_eq!(reply.response, BLANK_QUESTION_NUDGE);
    assert!(reply.rule.is_none());
    assert!(session.history().is_empty());

    let stats = session.stats();
    assert_eq!(stats.questions, 1);
    assert_eq!(stats.pipeline_runs, 0);
    assert_eq!(stats.cached_entries, 0);
}

#[test]
fn test_topics_never_exceed_ten() {
    let mut session = ChatSession::default();
    let questions = [
        "what are your skills in AI and machine learning",
        "tell me about your projects and your work experience",
        "where did you go to university and which certifications do you have",
        "any leadership roles or awards",
        "how can I contact you by email",
        "what are your hobbies and goals",
    ];
    for round in 0..3 {
        for q in questions {
            session.ask(&format!("{} ({})", q, round));
            assert!(session.context().topic_count() <= 10);
        }
    }
    assert_eq!(session.context().topic_count(), 10);
}

#[test]
fn test_clear_keeps_profile() {
    let mut session = ChatSession::with_profile(
        ChatConfig::default(),
        Profile {
            name: Some("Sam Okafor".into()),
            ..Profile::default()
        },
    );
    session.ask("tell me about your projects");
    session.clear();

    let stats = session.stats();
    assert_eq!(stats.questions, 0);
    assert_eq!(stats.cached_entries, 0);
    assert_eq!(stats.history_len, 0);
    assert_eq!(session.context().topic_count(), 0);
    assert_eq!(session.profile().name.as_deref(), Some("Sam Okafor"));
}

#[test]
fn test_hit_rate() {
    let mut session = ChatSession::default();
    session.ask("hi");
    session.ask("hi");
    assert!((session.stats().cache_hit_rate - 50.0).abs() < 0.01);
}

// ============================================================================
// Profile hydration
// ============================================================================

#[test]
fn test_hydrate_valid_json() {
    let mut session = ChatSession::default();
    let fallback = session.hydrate_profile_json(r#"{ "name": "Sam Okafor", "skills": ["Go"] }"#);
    assert!(!fallback);
    assert_eq!(session.profile().display_name(), "Sam Okafor");
}

#[test]
fn test_hydrate_invalid_json_uses_default() {
    let mut session = ChatSession::default();
    session.set_profile(Profile::default());
    let fallback = session.hydrate_profile_json("<html>404</html>");
    assert!(fallback);
    assert_eq!(session.profile(), &default_profile());
}

// ============================================================================
// Stage guard
// ============================================================================

#[test]
fn test_guard_passes_value_through() {
    let mut errors = Vec::new();
    let value = guarded("classify", &mut errors, 0, || 7);
    assert_eq!(value, 7);
    assert!(errors.is_empty());
}

#[test]
fn test_guard_degrades_to_neutral() {
    let mut errors: Vec<StageError> = Vec::new();
    let value: Vec<String> = guarded("classify", &mut errors, Vec::new(), || panic!("table corrupted"));
    assert!(value.is_empty());
    assert_eq!(
        errors,
        vec![StageError {
            stage: "classify".into(),
            message: "table corrupted".into(),
        }]
    );
}

#[test]
fn test_guard_formats_owned_messages() {
    let mut errors = Vec::new();
    let value: i32 = guarded("extract", &mut errors, 1, || panic!("bad item {}", 3));
    assert_eq!(value, 1);
    assert_eq!(errors[0].message, "bad item 3");
}

#[test]
fn test_successful_reply_has_rule_and_no_errors() {
    let mut session = ChatSession::default();
    let reply = session.ask("hi");
    assert_eq!(reply.rule, Some(ResponseRule::Greeting));
    assert!(reply.errors.is_empty());
}

#[test]
fn test_pipeline_failure_apologizes_and_is_not_cached() {
    let (mut session, calls) = session_with_recorder();
    session.fail_pipeline = Some("profile index out of range");

    let reply = session.ask("tell me about your projects");
    assert_eq!(reply.response, APOLOGY_MESSAGE);
    assert!(reply.rule.is_none());
    assert!(!reply.cached);
    assert_eq!(
        reply.errors,
        vec![StageError {
            stage: "pipeline".into(),
            message: "profile index out of range".into(),
        }]
    );
    assert_eq!(session.stats().cached_entries, 0);
    assert_eq!(*calls.borrow(), vec!["start"]);

    let again = session.ask("tell me about your projects");
    assert!(!again.cached);
    assert_eq!(again.response, APOLOGY_MESSAGE);
    assert_eq!(session.stats().pipeline_runs, 2);

    // once the fault clears the question is answered normally
    session.fail_pipeline = None;
    let recovered = session.ask("tell me about your projects");
    assert!(!recovered.cached);
    assert_eq!(recovered.rule, Some(ResponseRule::Sections));
}
