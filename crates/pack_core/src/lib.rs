//! # pack_core - Grounded Match Content Pack Pipeline
//!
//! Turns structured football match data into short marketing copy via a
//! generative backend, then verifies that every factual claim in the copy is
//! traceable to the source events.
//!
//! ## Pipeline
//! raw events + metadata → fact extractor → `Features` → grounded generator
//! → `ContentPack` → factual validator → `ValidationReport`
//!
//! The generator enforces structural validity (schema contract, bounded
//! self-correction); the validator enforces factual validity as an
//! independent pass that also accepts packs produced by other means.

pub mod contract;
pub mod error;
pub mod extract;
pub mod generate;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod validate;

pub use contract::{LenBounds, PackContract};
pub use error::{PipelineError, Result};
pub use extract::build_features;
pub use generate::{
    generate_content_pack, ChatBackend, ChatMessage, ChatRequest, GeneratorConfig, OllamaClient,
};
pub use ingest::MatchDataSource;
pub use models::{
    AllowedFacts, Caption, ContentPack, EventKind, Evidence, Features, KeyEvent, KeyMoment,
    Language, MatchFacts, MatchMeta, Platform, RawEvent, ReportStats, ValidationReport,
};
pub use pipeline::{run_match, MatchOutcome};
pub use store::{ErrorReport, OutputStore};
pub use validate::validate_pack;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
