//! Persistence sink: features, packs, and reports as addressable JSON
//! documents keyed by match id.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::{ContentPack, Features, ValidationReport};

/// Error record written in place of a report when a match's pipeline run
/// fails before validation.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub match_id: u32,
    pub ok: bool,
    pub error: String,
    pub generation_seconds: f64,
}

/// On-disk output layout for one batch run.
#[derive(Debug, Clone)]
pub struct OutputStore {
    processed_dir: PathBuf,
    packs_dir: PathBuf,
    reports_dir: PathBuf,
}

impl OutputStore {
    pub fn new(
        processed_dir: impl Into<PathBuf>,
        packs_dir: impl Into<PathBuf>,
        reports_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            processed_dir: processed_dir.into(),
            packs_dir: packs_dir.into(),
            reports_dir: reports_dir.into(),
        }
    }

    /// Conventional layout: `{data}/processed`, `{out}/packs`, `{out}/reports`.
    pub fn from_roots(data_dir: &Path, out_dir: &Path) -> Self {
        Self::new(
            data_dir.join("processed"),
            out_dir.join("packs"),
            out_dir.join("reports"),
        )
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.processed_dir)?;
        fs::create_dir_all(&self.packs_dir)?;
        fs::create_dir_all(&self.reports_dir)?;
        Ok(())
    }

    pub fn save_features(&self, match_id: u32, features: &Features) -> Result<PathBuf> {
        let path = self.processed_dir.join(format!("features_{match_id}.json"));
        write_pretty(&path, features)?;
        Ok(path)
    }

    pub fn save_pack(&self, match_id: u32, pack: &ContentPack) -> Result<PathBuf> {
        let path = self.packs_dir.join(format!("match_{match_id}.json"));
        write_pretty(&path, pack)?;
        Ok(path)
    }

    pub fn save_report(&self, match_id: u32, report: &ValidationReport) -> Result<PathBuf> {
        let path = self.reports_dir.join(format!("report_{match_id}.json"));
        write_pretty(&path, report)?;
        Ok(path)
    }

    pub fn save_error_report(&self, report: &ErrorReport) -> Result<PathBuf> {
        let path = self
            .reports_dir
            .join(format!("report_{}.json", report.match_id));
        write_pretty(&path, report)?;
        Ok(path)
    }

    /// Write a batch-level summary document under the reports directory.
    pub fn save_batch_summary<T: Serialize>(&self, timestamp: i64, summary: &T) -> Result<PathBuf> {
        let path = self
            .reports_dir
            .join(format!("random_batch_{timestamp}.json"));
        write_pretty(&path, summary)?;
        Ok(path)
    }
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "wrote document");
    Ok(())
}
