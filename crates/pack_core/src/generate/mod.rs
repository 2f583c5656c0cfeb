//! Grounded generator: schema-constrained generation with bounded
//! self-correction.
//!
//! The loop enforces structural validity only. Factual validity is a
//! separate pass owned by [`crate::validate`].

pub mod backend;
pub mod json;
pub mod prompt;

use tracing::{info, warn};

use crate::contract::PackContract;
use crate::error::{PipelineError, Result};
use crate::models::{ContentPack, Features, Language};

pub use backend::{ChatBackend, ChatMessage, ChatOptions, ChatRequest, OllamaClient};
pub use json::extract_json;

/// Knobs for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub model: String,
    pub language: Language,
    /// Corrective attempts after the first one; total attempts = max_retries + 1.
    pub max_retries: u32,
    /// Kept low so repeated runs stay close to deterministic.
    pub temperature: f64,
    pub contract: PackContract,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "llama3.1:8b".to_string(),
            language: Language::En,
            max_retries: 2,
            temperature: 0.2,
            contract: PackContract::default(),
        }
    }
}

/// Produce a schema-valid content pack grounded in `features`.
///
/// Each attempt issues exactly one backend call. A transport failure, a
/// missing/unparseable JSON payload, or a contract violation all consume one
/// attempt; the error message is fed back to the backend on the next one.
/// Exhausting the budget fails with [`PipelineError::GenerationFailed`]; a
/// partially valid pack is never returned.
pub fn generate_content_pack(
    backend: &dyn ChatBackend,
    features: &Features,
    config: &GeneratorConfig,
) -> Result<ContentPack> {
    let mut last_error: Option<String> = None;

    for attempt in 0..=config.max_retries {
        let payload =
            prompt::build_user_payload(features, config.language, last_error.as_deref());
        let request = ChatRequest {
            model: config.model.clone(),
            stream: false,
            options: ChatOptions {
                temperature: config.temperature,
            },
            messages: vec![
                ChatMessage::system(prompt::SYSTEM_PROMPT),
                ChatMessage::user(payload.to_string()),
            ],
        };

        let raw = match backend.chat(&request) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(attempt, error = %e, "backend call failed");
                last_error = Some(e.to_string());
                continue;
            }
        };

        match parse_and_check(&raw, &config.contract) {
            Ok(pack) => {
                info!(
                    attempt,
                    match_id = pack.match_id,
                    key_moments = pack.key_moments.len(),
                    "generated schema-valid pack"
                );
                return Ok(pack);
            }
            Err(message) => {
                warn!(attempt, error = %message, "attempt failed schema validation");
                last_error = Some(message);
            }
        }
    }

    Err(PipelineError::GenerationFailed(
        last_error.unwrap_or_else(|| "no attempts made".to_string()),
    ))
}

/// Extract, parse, and contract-check one raw backend response.
fn parse_and_check(raw: &str, contract: &PackContract) -> std::result::Result<ContentPack, String> {
    let json = extract_json(raw).ok_or_else(|| "no JSON object found in model output".to_string())?;
    let pack = ContentPack::from_json(json).map_err(|e| e.to_string())?;
    contract.check(&pack)?;
    Ok(pack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchFacts;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    /// Backend stub that replays a script of responses and records requests.
    struct ScriptedBackend {
        script: RefCell<Vec<Result<String>>>,
        requests: RefCell<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Result<String>>) -> Self {
            Self {
                script: RefCell::new(script),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl ChatBackend for ScriptedBackend {
        fn chat(&self, request: &ChatRequest) -> Result<String> {
            self.requests.borrow_mut().push(request.clone());
            let mut script = self.script.borrow_mut();
            assert!(!script.is_empty(), "backend called more often than scripted");
            script.remove(0)
        }
    }

    fn features() -> Features {
        Features::new(
            MatchFacts {
                match_id: 42,
                home_team: "Arsenal".to_string(),
                away_team: "Chelsea".to_string(),
                final_score: "2-1".to_string(),
                competition: "Premier League".to_string(),
                season: "2018/2019".to_string(),
                match_date: NaiveDate::from_ymd_opt(2019, 5, 1).unwrap(),
            },
            vec![],
        )
    }

    fn valid_pack_json() -> String {
        serde_json::json!({
            "match_id": 42,
            "language": "en",
            "titles": ["Gunners edge it", "Derby drama"],
            "captions": [
                {"platform": "instagram", "text": "Scenes in north London"},
                {"platform": "tiktok", "text": "2-1!"},
                {"platform": "x", "text": "FT: Arsenal 2-1 Chelsea"}
            ],
            "summary": "Arsenal beat Chelsea 2-1.",
            "hashtags": ["#AFC"],
            "key_moments": []
        })
        .to_string()
    }

    #[test]
    fn first_valid_response_uses_exactly_one_attempt() {
        let backend = ScriptedBackend::new(vec![Ok(valid_pack_json())]);
        let pack =
            generate_content_pack(&backend, &features(), &GeneratorConfig::default()).unwrap();
        assert_eq!(backend.calls(), 1);
        assert_eq!(pack.match_id, 42);
    }

    #[test]
    fn fenced_response_is_accepted() {
        let backend =
            ScriptedBackend::new(vec![Ok(format!("```json\n{}\n```", valid_pack_json()))]);
        let pack =
            generate_content_pack(&backend, &features(), &GeneratorConfig::default()).unwrap();
        assert_eq!(pack.captions.len(), 3);
    }

    #[test]
    fn always_invalid_output_exhausts_exactly_max_retries_plus_one_attempts() {
        let backend = ScriptedBackend::new(vec![
            Ok("not json at all".to_string()),
            Ok("not json at all".to_string()),
            Ok("not json at all".to_string()),
        ]);
        let err = generate_content_pack(&backend, &features(), &GeneratorConfig::default())
            .unwrap_err();
        assert_eq!(backend.calls(), 3, "max_retries=2 means 3 attempts");
        assert!(
            matches!(err, PipelineError::GenerationFailed(ref m) if m.contains("no JSON object")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn schema_violation_recovers_on_retry_with_fix_instructions() {
        let mut short_titles: serde_json::Value =
            serde_json::from_str(&valid_pack_json()).unwrap();
        short_titles["titles"] = serde_json::json!(["only one"]);

        let backend = ScriptedBackend::new(vec![
            Ok(short_titles.to_string()),
            Ok(valid_pack_json()),
        ]);
        let pack =
            generate_content_pack(&backend, &features(), &GeneratorConfig::default()).unwrap();
        assert_eq!(backend.calls(), 2);
        assert_eq!(pack.titles.len(), 2);

        let requests = backend.requests.borrow();
        let first_user = &requests[0].messages[1].content;
        let second_user = &requests[1].messages[1].content;
        assert!(!first_user.contains("fix_instructions"));
        assert!(second_user.contains("fix_instructions"));
        assert!(second_user.contains("titles"), "prior error should be quoted");
    }

    #[test]
    fn transport_failure_consumes_an_attempt() {
        let backend = ScriptedBackend::new(vec![
            Err(PipelineError::Transport("connection refused".to_string())),
            Ok(valid_pack_json()),
        ]);
        let pack =
            generate_content_pack(&backend, &features(), &GeneratorConfig::default()).unwrap();
        assert_eq!(backend.calls(), 2);
        assert_eq!(pack.language, Language::En);
    }

    #[test]
    fn zero_retries_means_single_attempt() {
        let config = GeneratorConfig {
            max_retries: 0,
            ..GeneratorConfig::default()
        };
        let backend = ScriptedBackend::new(vec![Ok("nope".to_string())]);
        let err = generate_content_pack(&backend, &features(), &config).unwrap_err();
        assert_eq!(backend.calls(), 1);
        assert!(matches!(err, PipelineError::GenerationFailed(_)));
    }

    #[test]
    fn mismatched_enum_value_counts_as_parse_failure() {
        let mut bad: serde_json::Value = serde_json::from_str(&valid_pack_json()).unwrap();
        bad["language"] = serde_json::json!("fr");

        let backend = ScriptedBackend::new(vec![Ok(bad.to_string()), Ok(valid_pack_json())]);
        let pack =
            generate_content_pack(&backend, &features(), &GeneratorConfig::default()).unwrap();
        assert_eq!(backend.calls(), 2);
        assert_eq!(pack.language, Language::En);
    }
}
