use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{DatasetStats, ProductFrequencySummary, TransactionRecord},
    services::{
        frequency,
        sources::{self, TransactionSource},
    },
};

/// Immutable view of one loaded dataset and its derived frequency summary
#[derive(Debug)]
pub struct DatasetSnapshot {
    pub generation: u64,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub transactions: Vec<TransactionRecord>,
    pub summary: Vec<ProductFrequencySummary>,
}

impl DatasetSnapshot {
    /// Builds a snapshot from clean rows, computing the frequency summary once
    pub fn build(
        generation: u64,
        source: impl Into<String>,
        transactions: Vec<TransactionRecord>,
    ) -> AppResult<Self> {
        let summary = frequency::aggregate(&transactions)?;

        Ok(Self {
            generation,
            source: source.into(),
            loaded_at: Utc::now(),
            transactions,
            summary,
        })
    }

    pub fn empty() -> Self {
        Self {
            generation: 0,
            source: "empty".to_string(),
            loaded_at: Utc::now(),
            transactions: Vec::new(),
            summary: Vec::new(),
        }
    }

    pub fn stats(&self) -> DatasetStats {
        let customers: HashSet<i64> = self.transactions.iter().map(|t| t.customer_id).collect();
        let products: HashSet<i64> = self.transactions.iter().map(|t| t.product_id).collect();

        DatasetStats {
            generation: self.generation,
            source: self.source.clone(),
            loaded_at: self.loaded_at,
            transaction_count: self.transactions.len(),
            customer_count: customers.len(),
            product_count: products.len(),
        }
    }
}

/// Holds the current dataset snapshot and swaps it atomically on reload
///
/// Readers get an `Arc` to the snapshot and never hold the lock while computing.
#[derive(Clone)]
pub struct DatasetStore {
    current: Arc<RwLock<Arc<DatasetSnapshot>>>,
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new(DatasetSnapshot::empty())
    }
}

impl DatasetStore {
    pub fn new(snapshot: DatasetSnapshot) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    /// Returns the snapshot in effect right now
    pub async fn snapshot(&self) -> Arc<DatasetSnapshot> {
        self.current.read().await.clone()
    }

    /// Loads, cleans and aggregates a fresh dataset, then makes it current
    ///
    /// On any failure the previous snapshot stays in place.
    pub async fn reload(
        &self,
        source: &dyn TransactionSource,
        excluded_product_lines: &[String],
    ) -> AppResult<Arc<DatasetSnapshot>> {
        let start = Instant::now();
        let name = source.name();

        tracing::info!(source = %name, "Reloading dataset");

        let rows = source.load().await?;
        let transactions = sources::clean(rows, excluded_product_lines)?;

        let mut fresh = DatasetSnapshot::build(0, name, transactions)?;

        let mut current = self.current.write().await;
        let generation = current.generation + 1;
        fresh.generation = generation;
        let snapshot = Arc::new(fresh);
        *current = snapshot.clone();
        drop(current);

        tracing::info!(
            generation,
            transactions = snapshot.transactions.len(),
            products = snapshot.summary.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Dataset reloaded"
        );

        Ok(snapshot)
    }
}
