//! Profile document types
//!
//! Mirrors the `profile.json` served next to the page. Every field is optional:
//! missing scalars deserialize to `None`, missing lists to empty vectors, so a
//! sparse document never fails to load for lack of a section. An explicit
//! `null` is read the same as a missing field.

use serde::{Deserialize, Deserializer, Serialize};

/// `null` deserializes to the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    pub url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    pub period: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    pub year: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub issuer: Option<String>,
    pub year: Option<String>,
}

/// Leadership role or honor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Achievement {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub organization: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

impl Contact {
    /// One-line contact summary, `None` when no channel is set
    pub fn summary(&self) -> Option<String> {
        let channels: Vec<String> = [
            self.email.as_ref().map(|v| format!("email: {}", v)),
            self.linkedin.as_ref().map(|v| format!("LinkedIn: {}", v)),
            self.github.as_ref().map(|v| format!("GitHub: {}", v)),
            self.website.as_ref().map(|v| format!("website: {}", v)),
            self.phone.as_ref().map(|v| format!("phone: {}", v)),
        ]
        .into_iter()
        .flatten()
        .collect();

        if channels.is_empty() {
            None
        } else {
            Some(channels.join(", "))
        }
    }
}

// =============================================================================
// Profile
// =============================================================================

/// The personal profile the chat pipeline answers from.
/// Treated as immutable once hydrated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub tagline: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
    #[serde(deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(deserialize_with = "null_as_default")]
    pub leadership: Vec<Achievement>,
    #[serde(deserialize_with = "null_as_default")]
    pub honors: Vec<Achievement>,
}

impl Profile {
    /// Display name, falling back to a neutral first-person label
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("the developer behind this page")
    }

    /// The first `n` skills
    pub fn top_skills(&self, n: usize) -> &[String] {
        &self.skills[..self.skills.len().min(n)]
    }
}

// =============================================================================
// Tests
// =============================================================================
