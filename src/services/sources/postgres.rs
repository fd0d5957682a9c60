use sqlx::PgPool;

use crate::{error::AppResult, models::RawTransaction};

use super::TransactionSource;

const LOAD_TRANSACTIONS: &str = r#"
    SELECT
        customer_id,
        product_id,
        product_name,
        quantity::BIGINT AS quantity,
        sale_value::FLOAT8 AS sale_value,
        product_line,
        latitude::FLOAT8 AS latitude,
        longitude::FLOAT8 AS longitude
    FROM sales_transactions
"#;

/// Reads rows from the `sales_transactions` table
#[derive(Debug, Clone)]
pub struct PostgresSource {
    pool: PgPool,
}

impl PostgresSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TransactionSource for PostgresSource {
    async fn load(&self) -> AppResult<Vec<RawTransaction>> {
        let rows = sqlx::query_as::<_, RawTransaction>(LOAD_TRANSACTIONS)
            .fetch_all(&self.pool)
            .await?;

        tracing::info!(rows = rows.len(), "Loaded transactions from database");

        Ok(rows)
    }

    fn name(&self) -> String {
        "postgres:sales_transactions".to_string()
    }
}
