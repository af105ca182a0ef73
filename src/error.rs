//! Error types for the LUIS middleware.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Failures of a single analysis call against the NLU provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    #[error("No LUIS endpoint configured")]
    NotConfigured,

    #[error("LUIS request failed: {0}")]
    Transport(String),

    #[error("LUIS returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid LUIS response: {0}")]
    Parse(String),
}

/// Errors surfaced by the accessor functions.
#[derive(Debug, thiserror::Error)]
pub enum LuisError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error("LUIS response has no `{field}` field. {hint}")]
    MissingCapability { field: String, hint: String },
}

/// Pipeline-related errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Luis(#[from] LuisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
