//! TemplateMatcher - Pre-anticipated question phrasings
//!
//! An ordered list of named, case-insensitive regexes run against the
//! *original* question. The first rule (in table order) that matches wins.
//! A match short-circuits intent-based extraction: the selector answers with
//! the canned paragraph bound to the rule name.

use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A matched template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMatch {
    pub name: String,
    /// Position of the rule in the table
    pub rank: usize,
}

// ==================== RULES ====================

/// (name, pattern). Order is priority.
pub const TEMPLATE_RULES: &[(&str, &str)] = &[
    ("walk_through_resume", r"walk (me )?through (your )?(resume|cv|background|career)"),
    ("resume_download", r"(download (your )?(resume|cv)|(resume|cv) (pdf|link)|copy of your (resume|cv))"),
    ("why_hire", r"why should (we|i) hire you"),
    ("greatest_strength", r"(greatest|biggest|main|top) strengths?"),
    ("greatest_weakness", r"((greatest|biggest) weakness|weaknesses)"),
    ("five_years", r"(where do you see yourself|(five|5) years from now|in (five|5) years)"),
    ("why_software", r"why did you (choose|pick|get into|become|start) (a )?(software|programming|coding|tech|engineering)"),
    ("proudest_project", r"(proudest|most proud|favou?rite project)"),
    ("biggest_challenge", r"(biggest|hardest|toughest) (technical )?(challenge|problem)"),
    ("failure", r"(a time you failed|biggest failure|mistake you made|learn from failure)"),
    ("conflict", r"(conflict|disagree(ment)?) with (a |your )?(teammate|coworker|colleague|manager|boss)"),
    ("leadership_example", r"(time you (led|lead)|example of (your )?leadership)"),
    ("teamwork", r"(team player|teamwork|work(ing)? (in|on|with) (a )?teams?)"),
    ("remote_work", r"(remote work|work remotely|remote (job|role|position)|hybrid (work|role))"),
    ("salary", r"(salary|compensation|pay expectations?|rate expectations?)"),
    ("availability", r"(when can you start|notice period|available to start|your availability)"),
    ("relocation", r"(relocat(e|ion)|willing to move)"),
    ("learning_approach", r"how do you (learn|keep up|stay (current|up to date))"),
    ("debugging_approach", r"how do you (debug|troubleshoot)"),
    ("code_quality", r"(code quality|clean code|code reviews?|coding standards)"),
    ("testing_philosophy", r"(how do you test|testing (strategy|philosophy|approach)|unit tests?)"),
    ("system_design", r"(system design|design a system|architecture approach|scalability)"),
    ("favorite_language", r"(favou?rite (programming )?language|language do you (prefer|like))"),
    ("favorite_tech", r"favou?rite (tech|technology|framework|tool|library)"),
    ("ai_opinion", r"(what do you think (about|of) (ai|artificial intelligence)|future of (ai|artificial intelligence)|will ai replace)"),
    ("how_built", r"(how (was|is) this (site|website|portfolio|avatar|page) (built|made)|how did you (build|make) this)"),
    ("are_you_real", r"(are you (real|a bot|an ai|human|a robot)|is this (a bot|an ai|real))"),
    ("hobbies", r"(your hobbies|free time|for fun|outside of (work|coding))"),
    ("motivation", r"(what motivates you|what drives you|what are you passionate about)"),
    ("work_style", r"(work(ing)? style|how do you (like to )?work\b|describe your work)"),
    ("ideal_role", r"(ideal (job|role|position|company)|dream job|looking for in (a|your) next (job|role))"),
    ("feedback", r"(handle (criticism|feedback)|receive feedback|take feedback)"),
    ("pressure", r"(under pressure|tight deadlines?|stressful situations?)"),
    ("mentoring", r"(do you mentor|mentoring others|teach others)"),
    ("open_source", r"(open[- ]source|contribut(e|ions?) to (projects|libraries))"),
    ("side_projects", r"(side projects?|personal projects?|hobby projects?)"),
    ("references", r"(can i (see|get) references|your references|recommendation letters?)"),
    ("fun_fact", r"(fun fact|something interesting about you|surprise me)"),
    ("contact_preference", r"(best way to (contact|reach) you|how (can|do|should) i (contact|reach) you)"),
    ("thank_you", r"^\s*(thanks|thank you|thx|ty)\b"),
    ("goodbye", r"^\s*(bye|goodbye|see you|see ya|later)\b"),
];

// ==================== MAIN IMPLEMENTATION ====================

/// Ordered template matcher over a compiled RegexSet
pub struct TemplateMatcher {
    set: RegexSet,
}

impl Default for TemplateMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateMatcher {
    pub fn new() -> Self {
        let patterns = TEMPLATE_RULES.iter().map(|(_, re)| format!("(?i){}", re));
        let set = RegexSet::new(patterns).expect("template rules must compile");
        Self { set }
    }

    /// Process-wide instance over the static rule table
    pub fn shared() -> &'static TemplateMatcher {
        static SHARED: OnceLock<TemplateMatcher> = OnceLock::new();
        SHARED.get_or_init(TemplateMatcher::new)
    }

    pub fn rule_count(&self) -> usize {
        self.set.len()
    }

    /// First rule (in table order) matching the original question
    pub fn find(&self, question: &str) -> Option<TemplateMatch> {
        // SetMatches iterates in ascending index order
        self.set.matches(question).iter().next().map(|rank| TemplateMatch {
            name: TEMPLATE_RULES[rank].0.to_string(),
            rank,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(question: &str) -> Option<String> {
        TemplateMatcher::shared().find(question).map(|m| m.name)
    }

    #[test]
    fn test_rule_count() {
        assert_eq!(TemplateMatcher::shared().rule_count(), TEMPLATE_RULES.len());
        assert!(TEMPLATE_RULES.len() >= 40);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(name_of("Can you WALK ME THROUGH YOUR RESUME?").as_deref(), Some("walk_through_resume"));
    }

    #[test]
    fn test_first_rule_wins() {
        // Matches both walk_through_resume and resume_download; earlier rule wins
        let m = TemplateMatcher::shared()
            .find("walk me through your resume and send a resume pdf")
            .unwrap();
        assert_eq!(m.name, "walk_through_resume");
        assert_eq!(m.rank, 0);
    }

    #[test]
    fn test_common_phrasings() {
        let cases = [
            ("Why should we hire you?", "why_hire"),
            ("What's your greatest weakness?", "greatest_weakness"),
            ("Where do you see yourself in 5 years?", "five_years"),
            ("What was your biggest challenge?", "biggest_challenge"),
            ("Are you open to remote work?", "remote_work"),
            ("How was this site built?", "how_built"),
            ("Are you a bot?", "are_you_real"),
            ("What's your favourite programming language?", "favorite_language"),
            ("thanks!", "thank_you"),
            ("Bye for now", "goodbye"),
        ];
        for (question, expected) in cases {
            assert_eq!(name_of(question).as_deref(), Some(expected), "question: {}", question);
        }
    }

    #[test]
    fn test_plain_topic_questions_do_not_match() {
        for question in [
            "what are your skills in AI",
            "tell me about your projects",
            "where did you study?",
            "hi",
        ] {
            assert_eq!(name_of(question), None, "question: {}", question);
        }
    }

    #[test]
    fn test_unique_names() {
        let mut names: Vec<&str> = TEMPLATE_RULES.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TEMPLATE_RULES.len());
    }
}
