//! Section Extractor - Ranked profile fragments for a question
//!
//! For every profile section whose trigger intent or keyword is present, each
//! item is scored against the normalized question with
//! [`advanced_similarity`]. Items clearing `min_item_score` become fragments;
//! when none do, the section contributes its fallback (e.g. the first three
//! projects) at a low score so genuine matches still rank first.
//!
//! Extraction never fails: missing fields render as empty, sections without
//! data are skipped.

use serde::{Deserialize, Serialize};

use super::config::ChatConfig;
use super::context::Depth;
use super::similarity::advanced_similarity;
use crate::profile::{Achievement, Certification, Education, Experience, Profile, Project};

/// Score assigned to fallback fragments
const FALLBACK_SCORE: f32 = 0.1;

/// Skills treated as relevant whenever the `ai` intent is present
const AI_SKILL_HINTS: &[&str] = &["machine learning", "llm", "neural", "nlp", "deep learning", "pytorch", "tensorflow"];

// =============================================================================
// Types
// =============================================================================

/// A scored piece of an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub content: String,
    pub score: f32,
    /// Citation label, e.g. `projects:Portfolio Avatar`
    pub source: String,
}

impl Fragment {
    fn new(content: String, score: f32, source: impl Into<String>) -> Self {
        Self {
            content,
            score,
            source: source.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Projects,
    Skills,
    Experience,
    Education,
    Certifications,
    Leadership,
}

/// Evaluation order; also the tie-break order after ranking
pub const SECTIONS: &[Section] = &[
    Section::Projects,
    Section::Skills,
    Section::Experience,
    Section::Education,
    Section::Certifications,
    Section::Leadership,
];

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Certifications => "certifications",
            Section::Leadership => "leadership",
        }
    }

    fn trigger_intents(&self) -> &'static [&'static str] {
        match self {
            Section::Projects => &["projects"],
            Section::Skills => &["skills", "ai"],
            Section::Experience => &["experience"],
            Section::Education => &["education"],
            Section::Certifications => &["certifications"],
            Section::Leadership => &["leadership", "honors"],
        }
    }

    /// Keywords that trigger the section even when intent detection came back empty
    fn trigger_keywords(&self) -> &'static [&'static str] {
        match self {
            Section::Projects => &["project", "projects", "portfolio", "built"],
            Section::Skills => &["skills", "technologies", "stack", "languages"],
            Section::Experience => &["experience", "work", "job", "career"],
            Section::Education => &["education", "degree", "university", "studied"],
            Section::Certifications => &["certifications", "certified", "certificate"],
            Section::Leadership => &["leadership", "mentor", "honors", "awards"],
        }
    }

    fn boost(&self) -> f32 {
        match self {
            Section::Projects => 1.2,
            Section::Skills => 1.5,
            _ => 1.0,
        }
    }

    /// True when the question asks about this section
    pub fn is_triggered(&self, normalized: &str, intents: &[String]) -> bool {
        if intents.iter().any(|i| self.trigger_intents().contains(&i.as_str())) {
            return true;
        }
        normalized
            .split_whitespace()
            .any(|w| self.trigger_keywords().contains(&w))
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Everything one question needs from the extractor
pub struct ExtractRequest<'a> {
    pub profile: &'a Profile,
    pub normalized: &'a str,
    pub intents: &'a [String],
    pub depth: Depth,
    pub config: &'a ChatConfig,
}

/// Collect fragments from every triggered section (unranked)
pub fn extract_sections(req: &ExtractRequest) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for section in SECTIONS {
        if section.is_triggered(req.normalized, req.intents) {
            fragments.extend(extract_section(*section, req));
        }
    }
    fragments
}

/// Fragments for one section; empty when the profile has no data for it
pub fn extract_section(section: Section, req: &ExtractRequest) -> Vec<Fragment> {
    match section {
        Section::Projects => extract_projects(req),
        Section::Skills => extract_skills(req),
        Section::Experience => extract_experience(req),
        Section::Education => extract_education(req),
        Section::Certifications => extract_certifications(req),
        Section::Leadership => extract_leadership(req),
    }
}

/// Sort by score (stable) and keep the best `limit`
pub fn rank_fragments(mut fragments: Vec<Fragment>, limit: usize) -> Vec<Fragment> {
    fragments.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    fragments.truncate(limit);
    fragments
}

/// Score items, keep matches, or fall back to `fallback` items
fn score_items<T>(
    req: &ExtractRequest,
    items: &[T],
    boost: f32,
    text_of: impl Fn(&T) -> String,
    render: impl Fn(&T) -> (String, String),
    fallback: usize,
) -> Vec<Fragment> {
    let matched: Vec<Fragment> = items
        .iter()
        .filter_map(|item| {
            let score = advanced_similarity(req.normalized, &text_of(item), boost);
            (score >= req.config.min_item_score).then(|| {
                let (content, source) = render(item);
                Fragment::new(content, score, source)
            })
        })
        .collect();

    if !matched.is_empty() {
        return matched;
    }

    items
        .iter()
        .take(fallback)
        .map(|item| {
            let (content, source) = render(item);
            Fragment::new(content, FALLBACK_SCORE, source)
        })
        .collect()
}

fn extract_projects(req: &ExtractRequest) -> Vec<Fragment> {
    let depth = req.depth;
    score_items(
        req,
        &req.profile.projects,
        Section::Projects.boost(),
        |p: &Project| format!("{} {} {} {}", p.name, p.description, p.technologies.join(" "), p.highlights.join(" ")),
        |p: &Project| (format_project(p, depth), format!("projects:{}", p.name)),
        req.config.project_fallback_count,
    )
}

fn extract_experience(req: &ExtractRequest) -> Vec<Fragment> {
    let depth = req.depth;
    score_items(
        req,
        &req.profile.experience,
        Section::Experience.boost(),
        |e: &Experience| format!("{} {} {} {}", e.title, e.company, e.description, e.highlights.join(" ")),
        |e: &Experience| (format_experience(e, depth), format!("experience:{}", e.company)),
        req.config.experience_fallback_count,
    )
}

fn extract_education(req: &ExtractRequest) -> Vec<Fragment> {
    let all = req.profile.education.len();
    score_items(
        req,
        &req.profile.education,
        Section::Education.boost(),
        |e: &Education| format!("{} {} {}", e.degree, e.institution, e.details.as_deref().unwrap_or("")),
        |e: &Education| (format_education(e), format!("education:{}", e.institution)),
        all,
    )
}

fn extract_certifications(req: &ExtractRequest) -> Vec<Fragment> {
    let all = req.profile.certifications.len();
    score_items(
        req,
        &req.profile.certifications,
        Section::Certifications.boost(),
        |c: &Certification| format!("{} {}", c.name, c.issuer.as_deref().unwrap_or("")),
        |c: &Certification| (format_certification(c), format!("certifications:{}", c.name)),
        all,
    )
}

fn extract_leadership(req: &ExtractRequest) -> Vec<Fragment> {
    let achievements: Vec<&Achievement> = req
        .profile
        .leadership
        .iter()
        .chain(req.profile.honors.iter())
        .collect();
    let all = achievements.len();
    score_items(
        req,
        &achievements,
        Section::Leadership.boost(),
        |a: &&Achievement| {
            format!(
                "{} {} {}",
                a.title,
                a.organization.as_deref().unwrap_or(""),
                a.description.as_deref().unwrap_or("")
            )
        },
        |a: &&Achievement| (format_achievement(a), format!("leadership:{}", a.title)),
        all,
    )
}

/// Skills collapse into one fragment: matching skills, or the core list
fn extract_skills(req: &ExtractRequest) -> Vec<Fragment> {
    let skills = &req.profile.skills;
    if skills.is_empty() {
        return Vec::new();
    }

    let wants_ai = req.intents.iter().any(|i| i == "ai");
    let boost = Section::Skills.boost();

    let mut best = 0.0f32;
    let mut relevant: Vec<&str> = Vec::new();
    for skill in skills {
        let mut score = advanced_similarity(req.normalized, skill, boost);
        if wants_ai {
            let lowered = skill.to_lowercase();
            let is_ai_word = lowered.split(|c: char| !c.is_alphanumeric()).any(|w| w == "ai");
            if is_ai_word || AI_SKILL_HINTS.iter().any(|hint| lowered.contains(hint)) {
                score = score.max(1.0);
            }
        }
        if score >= req.config.min_item_score {
            best = best.max(score);
            relevant.push(skill);
        }
    }

    if relevant.is_empty() {
        let core: Vec<&str> = skills.iter().take(10).map(String::as_str).collect();
        return vec![Fragment::new(
            format!("My core skills include {}.", core.join(", ")),
            FALLBACK_SCORE,
            "skills",
        )];
    }

    vec![Fragment::new(
        format!("Relevant skills: {}.", relevant.join(", ")),
        best,
        "skills",
    )]
}

// =============================================================================
// Rendering
// =============================================================================

fn format_project(p: &Project, depth: Depth) -> String {
    let mut out = format!("**{}**: {}", p.name, p.description);
    if depth != Depth::Overview && !p.technologies.is_empty() {
        out.push_str(&format!(" Built with {}.", p.technologies.join(", ")));
    }
    if depth == Depth::DeepDive && !p.highlights.is_empty() {
        out.push_str(&format!(" Highlights: {}.", p.highlights.join("; ")));
    }
    if let Some(url) = &p.url {
        out.push_str(&format!(" ({})", url));
    }
    out
}

fn format_experience(e: &Experience, depth: Depth) -> String {
    let mut out = format!("**{}**", e.title);
    if !e.company.is_empty() {
        out.push_str(&format!(" at {}", e.company));
    }
    if let Some(period) = &e.period {
        out.push_str(&format!(" ({})", period));
    }
    if !e.description.is_empty() {
        out.push_str(&format!(": {}", e.description));
    }
    if depth != Depth::Overview && !e.highlights.is_empty() {
        out.push_str(&format!(" Highlights: {}.", e.highlights.join("; ")));
    }
    out
}

fn format_education(e: &Education) -> String {
    let mut out = format!("**{}**", e.degree);
    if !e.institution.is_empty() {
        out.push_str(&format!(", {}", e.institution));
    }
    if let Some(year) = &e.year {
        out.push_str(&format!(" ({})", year));
    }
    if let Some(details) = &e.details {
        out.push_str(&format!(": {}", details));
    }
    out
}

fn format_certification(c: &Certification) -> String {
    let mut out = format!("**{}**", c.name);
    if let Some(issuer) = &c.issuer {
        out.push_str(&format!(" - {}", issuer));
    }
    if let Some(year) = &c.year {
        out.push_str(&format!(" ({})", year));
    }
    out
}

fn format_achievement(a: &Achievement) -> String {
    let mut out = format!("**{}**", a.title);
    if let Some(org) = &a.organization {
        out.push_str(&format!(", {}", org));
    }
    if let Some(year) = &a.year {
        out.push_str(&format!(" ({})", year));
    }
    if let Some(desc) = &a.description {
        out.push_str(&format!(": {}", desc));
    }
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::normalizer::normalize;
    use crate::profile::default_profile;

    fn request<'a>(profile: &'a Profile, normalized: &'a str, intents: &'a [String], config: &'a ChatConfig) -> ExtractRequest<'a> {
        ExtractRequest {
            profile,
            normalized,
            intents,
            depth: Depth::Overview,
            config,
        }
    }

    #[test]
    fn test_matching_project_ranks_first() {
        let profile = default_profile();
        let config = ChatConfig::default();
        let q = normalize("trail planner");
        let intents = vec!["projects".to_string()];

        let fragments = rank_fragments(extract_sections(&request(&profile, &q, &intents, &config)), 5);
        assert_eq!(fragments[0].source, "projects:Trail Planner");
        assert!(fragments[0].score >= config.min_item_score);
    }

    #[test]
    fn test_project_fallback_first_three() {
        let profile = default_profile();
        let config = ChatConfig::default();
        let intents = vec!["projects".to_string()];
        let fragments = extract_section(Section::Projects, &request(&profile, "zzz", &intents, &config));

        assert_eq!(fragments.len(), 3);
        assert!(fragments.iter().all(|f| f.score == FALLBACK_SCORE));
        assert_eq!(fragments[0].source, "projects:Portfolio Avatar");
    }

    #[test]
    fn test_missing_section_is_skipped() {
        let profile = Profile {
            projects: Vec::new(),
            ..default_profile()
        };
        let config = ChatConfig::default();
        let intents = vec!["projects".to_string()];
        let q = normalize("tell me about your projects");
        assert!(extract_sections(&request(&profile, &q, &intents, &config)).is_empty());
    }

    #[test]
    fn test_triggered_by_keyword_without_intents() {
        assert!(Section::Education.is_triggered("where did you get your degree", &[]));
        assert!(!Section::Education.is_triggered("what do you build", &[]));
    }

    #[test]
    fn test_ai_intent_surfaces_ai_skills() {
        let profile = default_profile();
        let config = ChatConfig::default();
        let q = normalize("what are your skills in AI");
        let intents = vec!["skills".to_string(), "ai".to_string()];
        let fragments = extract_section(Section::Skills, &request(&profile, &q, &intents, &config));

        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].content.starts_with("Relevant skills:"));
        assert!(fragments[0].content.contains("Machine Learning"));
        assert!(fragments[0].content.contains("LLM Applications"));
    }

    #[test]
    fn test_skills_fallback_lists_core() {
        let profile = default_profile();
        let config = ChatConfig::default();
        let intents = vec!["skills".to_string()];
        let fragments = extract_section(Section::Skills, &request(&profile, "zzz", &intents, &config));
        assert!(fragments[0].content.starts_with("My core skills include Rust"));
    }

    #[test]
    fn test_rank_is_stable_and_limited() {
        let fragments = vec![
            Fragment::new("a".into(), 1.0, "a"),
            Fragment::new("b".into(), 2.0, "b"),
            Fragment::new("c".into(), 1.0, "c"),
            Fragment::new("d".into(), 0.5, "d"),
        ];
        let ranked = rank_fragments(fragments, 3);
        let order: Vec<&str> = ranked.iter().map(|f| f.source.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_depth_changes_project_rendering() {
        let project = &default_profile().projects[0];
        assert!(!format_project(project, Depth::Overview).contains("Built with"));
        assert!(format_project(project, Depth::Detailed).contains("Built with Three.js"));
    }

    #[test]
    fn test_sparse_items_render() {
        let e = Education {
            degree: "B.A.".into(),
            ..Education::default()
        };
        assert_eq!(format_education(&e), "**B.A.**");
        let x = Experience {
            title: "Consultant".into(),
            period: Some("2020".into()),
            ..Experience::default()
        };
        assert_eq!(format_experience(&x, Depth::Overview), "**Consultant** (2020)");
    }
}
