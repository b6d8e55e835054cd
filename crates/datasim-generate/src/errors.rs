use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Core(#[from] datasim_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl GenerationError {
    pub fn is_validation(&self) -> bool {
        matches!(self, GenerationError::Core(datasim_core::Error::Validation(_)))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GenerationError::Core(datasim_core::Error::Configuration(_))
        )
    }
}
