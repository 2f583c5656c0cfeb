//! Batch driver: sample matches, generate content packs, validate, persist.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use pack_core::{
    ErrorReport, GeneratorConfig, Language, MatchDataSource, OllamaClient, OutputStore,
};

#[derive(Parser)]
#[command(name = "pack_cli")]
#[command(about = "Generate grounded content packs for a random sample of matches", long_about = None)]
struct Cli {
    /// StatsBomb open-data root (contains events/ and matches/)
    #[arg(long, default_value = "data/raw/statsbomb-open-data/data")]
    data_dir: PathBuf,

    /// Root for processed features (written to {processed-root}/processed)
    #[arg(long, default_value = "data")]
    processed_root: PathBuf,

    /// Root for packs and reports (written to {out-dir}/packs, {out-dir}/reports)
    #[arg(long, default_value = "outputs")]
    out_dir: PathBuf,

    /// Number of matches to sample
    #[arg(long, default_value_t = 10)]
    n: usize,

    /// Sampling seed (same seed = same sample)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output language: en|zh
    #[arg(long, default_value = "en")]
    language: Language,

    /// Backend model identifier
    #[arg(long, default_value = "llama3.1:8b")]
    model: String,

    /// Generation backend base URL
    #[arg(long, default_value = "http://localhost:11434")]
    base_url: String,

    /// Corrective retries per match after the first attempt
    #[arg(long, default_value_t = 2)]
    max_retries: u32,
}

/// One row in the batch summary, mirroring the per-match report files.
#[derive(Serialize)]
struct MatchStatus {
    match_id: u32,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    home: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    away: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_source_key_events: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_generated_key_moments: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    factual_valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    generation_seconds: f64,
}

#[derive(Serialize)]
struct BatchSummary {
    n: usize,
    seed: u64,
    model: String,
    language: String,
    match_ids: Vec<u32>,
    results: Vec<MatchStatus>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let source = MatchDataSource::new(&cli.data_dir);
    let store = OutputStore::from_roots(&cli.processed_root, &cli.out_dir);
    store.ensure_dirs().context("creating output directories")?;

    let all_ids = source
        .all_match_ids()
        .context("enumerating match ids")?;
    if all_ids.len() < cli.n {
        bail!(
            "Only found {} matches, cannot sample {}.",
            all_ids.len(),
            cli.n
        );
    }

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    let sample_ids: Vec<u32> = all_ids
        .choose_multiple(&mut rng, cli.n)
        .copied()
        .collect();
    info!(n = cli.n, seed = cli.seed, "sampled match ids");

    let backend = OllamaClient::new(cli.base_url.as_str()).context("backend client setup")?;
    let config = GeneratorConfig {
        model: cli.model.clone(),
        language: cli.language,
        max_retries: cli.max_retries,
        ..GeneratorConfig::default()
    };

    let mut summary = BatchSummary {
        n: cli.n,
        seed: cli.seed,
        model: cli.model.clone(),
        language: cli.language.to_string(),
        match_ids: sample_ids.clone(),
        results: Vec::with_capacity(cli.n),
    };

    for (idx, &match_id) in sample_ids.iter().enumerate() {
        let started = Instant::now();
        let status = match pack_core::run_match(&source, &store, &backend, &config, match_id) {
            Ok(outcome) => {
                let seconds = started.elapsed().as_secs_f64();
                println!(
                    "[{}/{}] OK match_id={} factual={}",
                    idx + 1,
                    cli.n,
                    match_id,
                    outcome.factual_valid
                );
                MatchStatus {
                    match_id,
                    ok: true,
                    home: Some(outcome.home),
                    away: Some(outcome.away),
                    score: Some(outcome.score),
                    num_source_key_events: Some(outcome.num_source_key_events),
                    num_generated_key_moments: Some(outcome.num_generated_key_moments),
                    factual_valid: Some(outcome.factual_valid),
                    error: None,
                    generation_seconds: seconds,
                }
            }
            Err(e) => {
                let seconds = started.elapsed().as_secs_f64();
                let error_report = ErrorReport {
                    match_id,
                    ok: false,
                    error: e.to_string(),
                    generation_seconds: seconds,
                };
                // A failed match still leaves a report behind; the batch
                // moves on regardless.
                if let Err(save_err) = store.save_error_report(&error_report) {
                    eprintln!("could not write error report for {match_id}: {save_err}");
                }
                println!(
                    "[{}/{}] FAIL match_id={} error={}",
                    idx + 1,
                    cli.n,
                    match_id,
                    e
                );
                MatchStatus {
                    match_id,
                    ok: false,
                    home: None,
                    away: None,
                    score: None,
                    num_source_key_events: None,
                    num_generated_key_moments: None,
                    factual_valid: None,
                    error: Some(e.to_string()),
                    generation_seconds: seconds,
                }
            }
        };
        summary.results.push(status);
    }

    let timestamp = chrono::Utc::now().timestamp();
    let path = store
        .save_batch_summary(timestamp, &summary)
        .context("writing batch summary")?;
    println!("batch saved: {}", path.display());

    Ok(())
}
