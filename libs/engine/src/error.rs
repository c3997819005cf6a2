use scan_api::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("scan of '{table}' did not finish within {limit} pages")]
    PageLimitExceeded { table: String, limit: usize },

    #[error("serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EngineError {
    /// Add context to the error.
    ///
    /// For `StoreUnavailable`, context is added to the inner `StoreError`.
    /// Other variants already name what failed and are returned unchanged.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::StoreUnavailable(e) => EngineError::StoreUnavailable(e.with_context(ctx)),
            other => other,
        }
    }
}
