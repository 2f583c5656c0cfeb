//! Derived facts: key events and the allow-lists used for grounding.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of fact a key event or generated key moment describes.
///
/// `Penalty` and `Other` are accepted by the pack schema but no extraction
/// predicate currently produces them; see DESIGN.md.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    RedCard,
    Penalty,
    Other,
}

/// Audit trail back to the originating raw event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evidence {
    pub event_id: String,
    /// Type tag of the source raw event ("Shot", "Foul Committed").
    #[serde(rename = "type")]
    pub source_type: String,
    /// Card name for disciplinary events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
}

/// One verifiable fact derived from the raw timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    pub event_type: EventKind,
    pub evidence: Evidence,
}

/// Match identity facts carried alongside the key events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchFacts {
    pub match_id: u32,
    pub home_team: String,
    pub away_team: String,
    pub final_score: String,
    pub competition: String,
    pub season: String,
    pub match_date: NaiveDate,
}

/// Set-valued index over the key events, used for O(1)-style membership
/// checks during validation. Always rebuilt from the events it indexes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllowedFacts {
    /// Fixed two-element list: `[home, away]`.
    pub teams: Vec<String>,
    /// Sorted, distinct players appearing in the key events.
    pub players: Vec<String>,
    /// Sorted, distinct minutes appearing in the key events.
    pub minutes: Vec<u8>,
    /// Canonical `"H-A"` final score.
    pub score: String,
}

impl AllowedFacts {
    /// Build the allow-lists from a finished key-event list.
    pub fn from_events(home: &str, away: &str, score: &str, events: &[KeyEvent]) -> Self {
        let players: BTreeSet<&str> = events
            .iter()
            .filter_map(|e| e.player.as_deref())
            .collect();
        let minutes: BTreeSet<u8> = events.iter().filter_map(|e| e.minute).collect();

        Self {
            teams: vec![home.to_string(), away.to_string()],
            players: players.into_iter().map(str::to_string).collect(),
            minutes: minutes.into_iter().collect(),
            score: score.to_string(),
        }
    }

    pub fn is_allowed_team(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t == team)
    }

    pub fn is_allowed_player(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    pub fn is_allowed_minute(&self, minute: u8) -> bool {
        self.minutes.contains(&minute)
    }
}

/// The unit of truth passed to generation and validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Features {
    #[serde(rename = "match")]
    pub match_info: MatchFacts,
    pub events: Vec<KeyEvent>,
    pub allowed: AllowedFacts,
}

impl Features {
    /// Assemble features from match facts and the extracted key events.
    ///
    /// The `allowed` index is derived here and nowhere else.
    pub fn new(match_info: MatchFacts, events: Vec<KeyEvent>) -> Self {
        let allowed = AllowedFacts::from_events(
            &match_info.home_team,
            &match_info.away_team,
            &match_info.final_score,
            &events,
        );
        Self {
            match_info,
            events,
            allowed,
        }
    }
}
