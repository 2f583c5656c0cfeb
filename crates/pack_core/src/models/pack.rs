//! Generated artifact: the content pack and its wire contract types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::features::EventKind;

/// Social platform a caption is written for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Tiktok,
    X,
}

impl Platform {
    /// The fixed platform set every pack must cover, in caption order.
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::Tiktok, Platform::X];
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Instagram => write!(f, "instagram"),
            Platform::Tiktok => write!(f, "tiktok"),
            Platform::X => write!(f, "x"),
        }
    }
}

/// Output language of a generated pack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Zh,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Zh => write!(f, "zh"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(format!("unsupported language: {other} (expected en|zh)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Caption {
    pub platform: Platform,
    pub text: String,
}

/// A generated, user-facing description of one key event.
///
/// `evidence` is a free-form object on the wire; whether it carries a usable
/// `event_id` is the factual validator's call, not the deserializer's.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct KeyMoment {
    pub minute: u8,
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    pub event_type: EventKind,
    #[serde(default)]
    pub evidence: serde_json::Map<String, serde_json::Value>,
    pub description: String,
}

impl KeyMoment {
    /// The `event_id` the moment claims as its source anchor, if any.
    pub fn evidence_event_id(&self) -> Option<&str> {
        self.evidence.get("event_id").and_then(|v| v.as_str())
    }
}

/// The generated marketing artifact for one match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ContentPack {
    pub match_id: u32,
    pub language: Language,
    pub titles: Vec<String>,
    pub captions: Vec<Caption>,
    pub summary: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub key_moments: Vec<KeyMoment>,
}

impl ContentPack {
    /// JSON schema for the pack shape, also sent to the generation backend
    /// as the schema hint.
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ContentPack)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
