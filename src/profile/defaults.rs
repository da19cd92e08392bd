//! Built-in fallback profile
//!
//! Substituted whenever the served profile document cannot be fetched or
//! parsed, so the avatar can still hold a conversation.

use super::types::{Achievement, Certification, Contact, Education, Experience, Profile, Project};

/// Small built-in profile used when hydration fails
pub fn default_profile() -> Profile {
    Profile {
        name: Some("Alex Rivera".to_string()),
        location: Some("San Francisco, CA".to_string()),
        bio: Some(
            "Software engineer who builds AI-powered products and interactive 3D web experiences."
                .to_string(),
        ),
        tagline: Some("Building thoughtful software at the edge of AI and the web".to_string()),
        summary: Some(
            "I design and ship full-stack applications, from Rust and TypeScript services to \
             real-time 3D interfaces, with a focus on applied machine learning."
                .to_string(),
        ),
        skills: [
            "Rust", "TypeScript", "Python", "React", "Three.js", "WebAssembly",
            "Machine Learning", "LLM Applications", "PostgreSQL", "Docker",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        experience: vec![
            Experience {
                title: "Senior Software Engineer".to_string(),
                company: "Lumen Labs".to_string(),
                period: Some("2022 - Present".to_string()),
                location: Some("Remote".to_string()),
                description: "Lead development of retrieval-augmented assistants and the \
                              WebAssembly search engine behind them."
                    .to_string(),
                highlights: vec![
                    "Cut answer latency by 60% by moving ranking into Rust/WASM".to_string(),
                ],
            },
            Experience {
                title: "Software Engineer".to_string(),
                company: "Brightwave Studio".to_string(),
                period: Some("2019 - 2022".to_string()),
                location: Some("San Francisco, CA".to_string()),
                description: "Built interactive 3D product configurators with React and Three.js."
                    .to_string(),
                highlights: Vec::new(),
            },
        ],
        projects: vec![
            Project {
                name: "Portfolio Avatar".to_string(),
                description: "A 3D avatar that answers questions about my work in the browser."
                    .to_string(),
                technologies: vec!["Three.js".into(), "Rust".into(), "WebAssembly".into()],
                url: None,
                highlights: Vec::new(),
            },
            Project {
                name: "Semantic Notes".to_string(),
                description: "Local-first note app with hybrid keyword and vector search."
                    .to_string(),
                technologies: vec!["TypeScript".into(), "Rust".into(), "SQLite".into()],
                url: None,
                highlights: Vec::new(),
            },
            Project {
                name: "Trail Planner".to_string(),
                description: "Route planning app that recommends hikes from weather and elevation data."
                    .to_string(),
                technologies: vec!["Python".into(), "React".into(), "PostgreSQL".into()],
                url: None,
                highlights: Vec::new(),
            },
        ],
        education: vec![Education {
            degree: "B.S. Computer Science".to_string(),
            institution: "University of California, Davis".to_string(),
            year: Some("2019".to_string()),
            details: None,
        }],
        certifications: vec![Certification {
            name: "AWS Certified Developer - Associate".to_string(),
            issuer: Some("Amazon Web Services".to_string()),
            year: Some("2023".to_string()),
        }],
        contact: Contact {
            email: Some("hello@example.com".to_string()),
            phone: None,
            linkedin: Some("linkedin.com/in/alex-rivera".to_string()),
            github: Some("github.com/alex-rivera".to_string()),
            website: None,
        },
        leadership: vec![Achievement {
            title: "Engineering Mentor".to_string(),
            organization: Some("Code the Bay".to_string()),
            year: Some("2021 - Present".to_string()),
            description: Some("Mentor early-career developers through their first projects.".to_string()),
        }],
        honors: vec![Achievement {
            title: "Hackathon Winner".to_string(),
            organization: Some("Bay Area AI Hack".to_string()),
            year: Some("2023".to_string()),
            description: None,
        }],
    }
}
