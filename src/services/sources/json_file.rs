use std::path::PathBuf;

use crate::{
    error::{AppError, AppResult},
    models::RawTransaction,
};

use super::TransactionSource;

/// Reads rows from a JSON array of objects keyed by the source column names
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl TransactionSource for JsonFileSource {
    async fn load(&self) -> AppResult<Vec<RawTransaction>> {
        tracing::debug!(path = %self.path.display(), "Reading transaction file");

        let bytes = tokio::fs::read(&self.path).await?;
        let rows: Vec<RawTransaction> = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::DataQuality(format!(
                "{} is not a JSON array of transactions: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::info!(path = %self.path.display(), rows = rows.len(), "Loaded transaction file");

        Ok(rows)
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
