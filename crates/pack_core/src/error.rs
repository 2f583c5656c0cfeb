use thiserror::Error;

/// Pipeline-wide error type.
///
/// Factual inconsistencies are not errors: they are findings carried in
/// [`crate::models::ValidationReport::errors`] and never abort a run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Requested match or metadata record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Generation backend unreachable or returned a non-success response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Parsed model output does not satisfy the pack schema contract.
    #[error("schema invalid: {0}")]
    SchemaInvalid(String),

    /// All generation attempts exhausted; carries the last parse/schema error.
    #[error("generation failed after retries: {0}")]
    GenerationFailed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
