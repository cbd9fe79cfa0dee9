use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Record store error: {0}")]
    Store(#[from] record_store::StoreError),

    #[error("Engine error: {0}")]
    Engine(#[from] kpi_engine::EngineError),
}

impl ReportError {
    /// True when the failure is the expected "no data in scope" condition,
    /// which callers render as an empty state rather than an error.
    pub fn is_empty_scope(&self) -> bool {
        matches!(
            self,
            ReportError::Engine(kpi_engine::EngineError::EmptyScope(_))
        )
    }
}
