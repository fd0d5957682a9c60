use crate::{error::AppResult, models::RawTransaction};

use super::TransactionSource;

/// Serves a fixed set of rows held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<RawTransaction>,
}

impl MemorySource {
    pub fn new(rows: Vec<RawTransaction>) -> Self {
        Self { rows }
    }
}

#[async_trait::async_trait]
impl TransactionSource for MemorySource {
    async fn load(&self) -> AppResult<Vec<RawTransaction>> {
        Ok(self.rows.clone())
    }

    fn name(&self) -> String {
        format!("memory ({} rows)", self.rows.len())
    }
}
