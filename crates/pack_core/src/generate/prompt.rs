//! Prompt assembly for the grounded generation request.

use serde_json::json;

use crate::models::{ContentPack, Features, Language};

/// System instruction: JSON only, facts only from FEATURES.
pub const SYSTEM_PROMPT: &str = "\
You write football social media content for editors.
Return ONLY valid JSON. No markdown. No explanations.
Do NOT invent facts.
Facts must come from FEATURES: teams, players, minutes, score.
Key moments must use minute, team, player, event_type, and evidence grounded in FEATURES.
evidence must include event_id copied from FEATURES.
";

/// Build the user payload for one attempt.
///
/// On retries, `fix_instructions` quotes the previous attempt's error
/// verbatim so the backend can return corrected JSON.
pub fn build_user_payload(
    features: &Features,
    language: Language,
    last_error: Option<&str>,
) -> serde_json::Value {
    let mut payload = json!({
        "task": "Generate a content pack for one match.",
        "language": language,
        "features": features,
        "output_rules": {
            "titles": "2-3 short options",
            "captions": [
                {"platform": "instagram", "tone": "fun, fan-friendly"},
                {"platform": "tiktok", "tone": "punchy, energetic"},
                {"platform": "x", "tone": "concise, newsy"},
            ],
            "summary": "80-120 words",
            "key_moments": "0-5 items. Use only moments present in FEATURES. Do NOT invent facts.",
            "hashtags": "5-12 items, relevant, no spaces",
        },
        "schema_hint": ContentPack::json_schema(),
    });

    if let Some(error) = last_error {
        payload["fix_instructions"] = json!(format!(
            "Your previous output failed validation. \
             Return ONLY corrected JSON that matches the schema. \
             Validation error: {error}"
        ));
    }

    payload
}
