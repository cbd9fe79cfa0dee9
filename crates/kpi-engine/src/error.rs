use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A record failed ingestion checks. Aggregation for the whole scope
    /// fails rather than silently excluding the record, so data-quality
    /// issues surface instead of skewing totals.
    #[error("Invalid record {code}: {reason}")]
    InvalidRecord { code: String, reason: String },

    /// The scope matched no underlying records at all. Distinct from a scope
    /// whose records legitimately sum to zero.
    #[error("Scope matched no records: {0}")]
    EmptyScope(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] configuration::error::ConfigError),
}

impl EngineError {
    pub(crate) fn invalid_record(code: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidRecord {
            code: code.to_string(),
            reason: reason.into(),
        }
    }
}
