//! Fact extractor: raw timeline → key events + grounding allow-lists.

use tracing::debug;

use crate::models::{EventKind, Evidence, Features, KeyEvent, MatchFacts, MatchMeta, RawEvent};

const CARD_RED: &str = "Red Card";
const CARD_SECOND_YELLOW: &str = "Second Yellow";

/// Derive the closed set of verifiable facts for one match.
///
/// Single pass over the timeline in source order; the emitted key events
/// keep that order. Every key event's evidence carries the id of the raw
/// event it was derived from, which the factual validator later anchors on.
pub fn build_features(meta: &MatchMeta, events: &[RawEvent]) -> Features {
    let mut key_events: Vec<KeyEvent> = Vec::new();

    for event in events {
        match event.type_name() {
            "Shot" => {
                if event.shot_outcome() == Some("Goal") {
                    key_events.push(key_event_from(event, EventKind::Goal, None));
                }
            }
            "Foul Committed" => {
                if let Some(card) = event.card_name() {
                    if card == CARD_RED || card == CARD_SECOND_YELLOW {
                        key_events.push(key_event_from(
                            event,
                            EventKind::RedCard,
                            Some(card.to_string()),
                        ));
                    }
                }
            }
            // Substitutions, penalties awarded, etc. are not extracted.
            _ => {}
        }
    }

    debug!(
        match_id = meta.match_id,
        key_events = key_events.len(),
        "extracted key events"
    );

    let facts = MatchFacts {
        match_id: meta.match_id,
        home_team: meta.home_team.home_team_name.clone(),
        away_team: meta.away_team.away_team_name.clone(),
        final_score: meta.final_score(),
        competition: meta.competition.competition_name.clone(),
        season: meta.season.season_name.clone(),
        match_date: meta.match_date,
    };

    Features::new(facts, key_events)
}

fn key_event_from(event: &RawEvent, kind: EventKind, card: Option<String>) -> KeyEvent {
    KeyEvent {
        minute: event.minute,
        team: event.team_name().map(str::to_string),
        player: event.player_name().map(str::to_string),
        event_type: kind,
        evidence: Evidence {
            event_id: event.id.clone(),
            source_type: event.type_name().to_string(),
            card,
        },
    }
}
