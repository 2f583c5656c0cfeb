//! Source data shapes: match metadata and raw timeline events.
//!
//! These mirror the StatsBomb open-data layout on disk. Unknown fields are
//! ignored on deserialize; both types are read-only inputs to the pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One match record from a `matches/{competition}/{season}.json` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchMeta {
    pub match_id: u32,
    pub match_date: NaiveDate,
    pub home_team: HomeTeamRef,
    pub away_team: AwayTeamRef,
    pub home_score: u32,
    pub away_score: u32,
    pub competition: CompetitionRef,
    pub season: SeasonRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomeTeamRef {
    pub home_team_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AwayTeamRef {
    pub away_team_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitionRef {
    pub competition_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonRef {
    pub season_name: String,
}

impl MatchMeta {
    /// Final score in the canonical `"H-A"` form used across the pipeline.
    pub fn final_score(&self) -> String {
        format!("{}-{}", self.home_score, self.away_score)
    }
}

/// One timeline entry from an `events/{match_id}.json` file.
///
/// Only the fields the fact extractor inspects are modeled; everything else
/// in the source record is dropped on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: TypeRef,
    pub minute: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot: Option<ShotDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foul_committed: Option<FoulDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShotDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutcomeRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoulDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardRef {
    pub name: String,
}

impl RawEvent {
    pub fn type_name(&self) -> &str {
        &self.event_type.name
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team.as_ref().map(|t| t.name.as_str())
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player.as_ref().map(|p| p.name.as_str())
    }

    pub fn shot_outcome(&self) -> Option<&str> {
        self.shot
            .as_ref()
            .and_then(|s| s.outcome.as_ref())
            .map(|o| o.name.as_str())
    }

    pub fn card_name(&self) -> Option<&str> {
        self.foul_committed
            .as_ref()
            .and_then(|f| f.card.as_ref())
            .map(|c| c.name.as_str())
    }
}
