//! Profile hydration
//!
//! Parses the served JSON document. Any failure falls back to the built-in
//! profile so the pipeline keeps answering.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::defaults::default_profile;
use super::types::Profile;
use crate::console;

/// Outcome of a hydration attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileLoad {
    pub profile: Profile,
    /// True when the built-in profile was substituted
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parse a profile document
pub fn parse_profile(json: &str) -> Result<Profile, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid profile document: {}", e))
}

/// Parse a profile document, substituting the built-in profile on failure
pub fn load_profile_or_default(json: &str) -> ProfileLoad {
    match parse_profile(json) {
        Ok(profile) => {
            console::log(&format!(
                "[Profile] Loaded {} ({} projects, {} skills)",
                profile.display_name(),
                profile.projects.len(),
                profile.skills.len()
            ));
            ProfileLoad {
                profile,
                used_fallback: false,
                error: None,
            }
        }
        Err(e) => {
            console::warn(&format!("[Profile] {}; using built-in profile", e));
            ProfileLoad {
                profile: default_profile(),
                used_fallback: true,
                error: Some(e),
            }
        }
    }
}

/// Fetch the profile document text from `url` (JS binding)
///
/// The caller hands the text to `ChatSession.hydrateProfileJson`, which
/// applies the fallback if the body is unusable.
#[wasm_bindgen(js_name = fetchProfileText)]
pub async fn fetch_profile_text(url: String) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;

    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(&url))
        .await?
        .dyn_into()?;

    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "Profile fetch failed: HTTP {}",
            response.status()
        )));
    }

    let body = JsFuture::from(response.text()?).await?;
    body.as_string()
        .ok_or_else(|| JsValue::from_str("Profile body is not text"))
}

// =============================================================================
// Tests
// =============================================================================
