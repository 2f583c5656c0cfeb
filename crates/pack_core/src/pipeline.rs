//! Per-match pipeline façade: extract → generate → validate, persisting each
//! artifact as it is produced.

use tracing::info;

use crate::error::Result;
use crate::extract::build_features;
use crate::generate::{generate_content_pack, ChatBackend, GeneratorConfig};
use crate::ingest::MatchDataSource;
use crate::store::OutputStore;
use crate::validate::validate_pack;

/// Condensed result of one match's run, for batch summaries.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MatchOutcome {
    pub match_id: u32,
    pub home: String,
    pub away: String,
    pub score: String,
    pub num_source_key_events: usize,
    pub num_generated_key_moments: usize,
    pub factual_valid: bool,
}

/// Run one match end-to-end.
///
/// A failure in any stage aborts this match only; the caller decides whether
/// to continue with the rest of a batch. On success all three artifacts have
/// been persisted.
pub fn run_match(
    source: &MatchDataSource,
    store: &OutputStore,
    backend: &dyn ChatBackend,
    config: &GeneratorConfig,
    match_id: u32,
) -> Result<MatchOutcome> {
    let meta = source.find_match_meta(match_id)?;
    let events = source.load_events(match_id)?;

    let features = build_features(&meta, &events);
    store.save_features(match_id, &features)?;
    info!(
        match_id,
        key_events = features.events.len(),
        "features extracted"
    );

    let pack = generate_content_pack(backend, &features, config)?;
    store.save_pack(match_id, &pack)?;

    let report = validate_pack(&pack, &features);
    store.save_report(match_id, &report)?;
    info!(
        match_id,
        factual_valid = report.factual_valid,
        errors = report.errors.len(),
        "match processed"
    );

    Ok(MatchOutcome {
        match_id,
        home: features.match_info.home_team.clone(),
        away: features.match_info.away_team.clone(),
        score: features.match_info.final_score.clone(),
        num_source_key_events: features.events.len(),
        num_generated_key_moments: pack.key_moments.len(),
        factual_valid: report.factual_valid,
    })
}
