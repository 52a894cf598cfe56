use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilityError {
    /// The record source could not be read at all. An empty store is never this.
    #[error("reading store unavailable: {source}")]
    StoreUnavailable {
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write to reading store: {source}")]
    StoreWrite {
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid window: {0}")]
    InvalidWindow(String),

    #[error("invalid reading: {0}")]
    InvalidReading(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl UtilityError {
    pub fn unavailable(source: anyhow::Error) -> Self {
        tracing::error!("reading store unavailable: {:#}", source);
        UtilityError::StoreUnavailable { source }
    }

    pub fn write_failed(source: anyhow::Error) -> Self {
        tracing::error!("reading store write failed: {:#}", source);
        UtilityError::StoreWrite { source }
    }

    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, UtilityError::StoreUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, UtilityError>;
