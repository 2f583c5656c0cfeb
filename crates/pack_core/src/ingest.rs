//! Filesystem collaborators: raw event and match metadata sources.
//!
//! Layout follows the StatsBomb open-data tree:
//! `{base}/events/{match_id}.json` and
//! `{base}/matches/{competition_id}/{season}.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{MatchMeta, RawEvent};

/// Read-only source of raw events and match metadata keyed by match id.
#[derive(Debug, Clone)]
pub struct MatchDataSource {
    base: PathBuf,
}

impl MatchDataSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load the ordered event timeline for one match.
    pub fn load_events(&self, match_id: u32) -> Result<Vec<RawEvent>> {
        let path = self.base.join("events").join(format!("{match_id}.json"));
        if !path.is_file() {
            return Err(PipelineError::NotFound(format!(
                "events for match_id {match_id} not found at {}",
                path.display()
            )));
        }
        Self::read_json(&path)
    }

    /// Scan every season file for the metadata record of one match.
    pub fn find_match_meta(&self, match_id: u32) -> Result<MatchMeta> {
        for season_file in self.season_files()? {
            let matches: Vec<MatchMeta> = Self::read_json(&season_file)?;
            if let Some(meta) = matches.into_iter().find(|m| m.match_id == match_id) {
                debug!(match_id, file = %season_file.display(), "match metadata found");
                return Ok(meta);
            }
        }
        Err(PipelineError::NotFound(format!(
            "match_id {match_id} not found in matches"
        )))
    }

    /// Deduplicated, sorted ids of every match known to the source.
    pub fn all_match_ids(&self) -> Result<Vec<u32>> {
        let mut ids: Vec<u32> = Vec::new();
        for season_file in self.season_files()? {
            let matches: Vec<MatchMeta> = Self::read_json(&season_file)?;
            ids.extend(matches.iter().map(|m| m.match_id));
        }
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    fn season_files(&self) -> Result<Vec<PathBuf>> {
        let matches_dir = self.base.join("matches");
        if !matches_dir.is_dir() {
            return Err(PipelineError::NotFound(format!(
                "matches directory not found at {}",
                matches_dir.display()
            )));
        }

        let mut files: Vec<PathBuf> = Vec::new();
        for competition in fs::read_dir(&matches_dir)? {
            let competition = competition?.path();
            if !competition.is_dir() {
                continue;
            }
            for entry in fs::read_dir(&competition)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    files.push(path);
                }
            }
        }
        // Stable scan order regardless of directory enumeration order.
        files.sort();
        Ok(files)
    }
}
