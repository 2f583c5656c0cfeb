//! Factual validator: cross-checks a schema-valid pack against its source
//! features.
//!
//! Pure function of its two inputs; no retries, no external calls. Findings
//! are appended to the report, never raised as errors.

use tracing::debug;

use crate::models::{ContentPack, Features, ReportStats, ValidationReport};

/// Check that every factual claim in `pack` is grounded in `features`.
///
/// All key moments are checked even after an earlier failure; error strings
/// are indexed by moment position. The final score is not required to appear
/// verbatim in the summary; differently punctuated renderings are tolerated.
pub fn validate_pack(pack: &ContentPack, features: &Features) -> ValidationReport {
    let mut errors: Vec<String> = Vec::new();
    let allowed = &features.allowed;

    if pack.match_id != features.match_info.match_id {
        errors.push("match_id mismatch".to_string());
    }

    for (i, moment) in pack.key_moments.iter().enumerate() {
        if !moment.team.is_empty() && !allowed.is_allowed_team(&moment.team) {
            errors.push(format!(
                "key_moments[{i}].team not allowed: {}",
                moment.team
            ));
        }

        if !allowed.is_allowed_minute(moment.minute) {
            errors.push(format!(
                "key_moments[{i}].minute not in source events: {}",
                moment.minute
            ));
        }

        if let Some(player) = moment.player.as_deref() {
            if !player.is_empty() && !allowed.is_allowed_player(player) {
                errors.push(format!(
                    "key_moments[{i}].player not in source events: {player}"
                ));
            }
        }

        if !moment.evidence.contains_key("event_id") {
            errors.push(format!("key_moments[{i}].evidence missing event_id"));
        }
    }

    debug!(
        match_id = pack.match_id,
        errors = errors.len(),
        "factual validation finished"
    );

    ValidationReport {
        schema_valid: true,
        factual_valid: errors.is_empty(),
        errors,
        stats: ReportStats {
            num_key_events_source: features.events.len(),
            num_key_moments_generated: pack.key_moments.len(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Caption, EventKind, Evidence, KeyEvent, KeyMoment, Language, MatchFacts, Platform,
    };
    use chrono::NaiveDate;

    fn features() -> Features {
        let events = vec![
            KeyEvent {
                minute: Some(23),
                team: Some("Arsenal".to_string()),
                player: Some("Bukayo Saka".to_string()),
                event_type: EventKind::Goal,
                evidence: Evidence {
                    event_id: "e1".to_string(),
                    source_type: "Shot".to_string(),
                    card: None,
                },
            },
            KeyEvent {
                minute: Some(77),
                team: Some("Chelsea".to_string()),
                player: None,
                event_type: EventKind::RedCard,
                evidence: Evidence {
                    event_id: "e2".to_string(),
                    source_type: "Foul Committed".to_string(),
                    card: Some("Red Card".to_string()),
                },
            },
        ];
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
            events,
        )
    }

    fn moment(minute: u8, team: &str, player: Option<&str>, event_id: Option<&str>) -> KeyMoment {
        let mut evidence = serde_json::Map::new();
        if let Some(id) = event_id {
            evidence.insert("event_id".to_string(), serde_json::json!(id));
        }
        KeyMoment {
            minute,
            team: team.to_string(),
            player: player.map(str::to_string),
            event_type: EventKind::Goal,
            evidence,
            description: "moment".to_string(),
        }
    }

    fn pack_with(moments: Vec<KeyMoment>) -> ContentPack {
        ContentPack {
            match_id: 42,
            language: Language::En,
            titles: vec!["A".to_string(), "B".to_string()],
            captions: Platform::ALL
                .into_iter()
                .map(|platform| Caption {
                    platform,
                    text: "c".to_string(),
                })
                .collect(),
            summary: "Arsenal won 2\u{2013}1.".to_string(),
            hashtags: vec![],
            key_moments: moments,
        }
    }

    #[test]
    fn grounded_moment_yields_no_errors() {
        let pack = pack_with(vec![moment(
            23,
            "Arsenal",
            Some("Bukayo Saka"),
            Some("e1"),
        )]);
        let report = validate_pack(&pack, &features());
        assert!(report.factual_valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.stats.num_key_events_source, 2);
        assert_eq!(report.stats.num_key_moments_generated, 1);
    }

    #[test]
    fn unknown_minute_yields_exactly_one_error() {
        let pack = pack_with(vec![moment(
            45,
            "Arsenal",
            Some("Bukayo Saka"),
            Some("e1"),
        )]);
        let report = validate_pack(&pack, &features());
        assert!(!report.factual_valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0],
            "key_moments[0].minute not in source events: 45"
        );
    }

    #[test]
    fn unknown_team_error_names_the_moment_index() {
        let pack = pack_with(vec![
            moment(23, "Arsenal", None, Some("e1")),
            moment(77, "Tottenham Hotspur", None, Some("e2")),
        ]);
        let report = validate_pack(&pack, &features());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("key_moments[1].team"));
    }

    #[test]
    fn missing_evidence_event_id_is_flagged() {
        let pack = pack_with(vec![moment(23, "Arsenal", None, None)]);
        let report = validate_pack(&pack, &features());
        assert!(!report.factual_valid);
        assert_eq!(report.errors, vec!["key_moments[0].evidence missing event_id"]);
    }

    #[test]
    fn zero_key_moments_is_factually_valid() {
        let report = validate_pack(&pack_with(vec![]), &features());
        assert!(report.factual_valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.stats.num_key_moments_generated, 0);
    }

    #[test]
    fn match_id_mismatch_is_an_error_but_checks_continue() {
        let mut pack = pack_with(vec![moment(45, "Arsenal", None, Some("e1"))]);
        pack.match_id = 7;
        let report = validate_pack(&pack, &features());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0], "match_id mismatch");
        assert!(report.errors[1].contains("minute"));
    }

    #[test]
    fn all_moments_are_checked_without_short_circuit() {
        let pack = pack_with(vec![
            moment(45, "Arsenal", None, Some("e1")),
            moment(46, "Nottingham Forest", Some("Nobody"), None),
        ]);
        let report = validate_pack(&pack, &features());
        // moment 0: bad minute; moment 1: bad minute, team, player, evidence.
        assert_eq!(report.errors.len(), 5);
        assert!(report.errors.iter().any(|e| e.contains("key_moments[1].player")));
    }

    #[test]
    fn empty_team_string_is_tolerated() {
        let pack = pack_with(vec![moment(23, "", None, Some("e1"))]);
        let report = validate_pack(&pack, &features());
        assert!(report.factual_valid, "empty team is not a claim");
    }

    #[test]
    fn differently_punctuated_score_in_summary_is_not_flagged() {
        // Summary uses an en-dash score; validation must not flag it.
        let report = validate_pack(&pack_with(vec![]), &features());
        assert!(report.factual_valid);
    }

    #[test]
    fn validation_is_deterministic() {
        let pack = pack_with(vec![
            moment(45, "Arsenal", None, Some("e1")),
            moment(77, "Chelsea", None, None),
        ]);
        let first = validate_pack(&pack, &features());
        let second = validate_pack(&pack, &features());
        assert_eq!(first, second);
    }
}
