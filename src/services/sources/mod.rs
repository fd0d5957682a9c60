/// Transaction data sources
///
/// A source only knows how to fetch raw rows. Cleaning is shared by every
/// source so that all of them enforce the same invariants on the rows the
/// recommender sees.
use crate::{
    error::{AppError, AppResult},
    models::{GeoPoint, RawTransaction, TransactionRecord},
};

pub mod json_file;
pub mod memory;
pub mod postgres;

pub use json_file::JsonFileSource;
pub use memory::MemorySource;
pub use postgres::PostgresSource;

/// Trait for transaction data sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch every raw transaction row the source holds
    async fn load(&self) -> AppResult<Vec<RawTransaction>>;

    /// Source name for logging and dataset stats
    fn name(&self) -> String;
}

/// Turns raw rows into clean transaction records
///
/// Rows in an excluded product line, rows with a zero latitude or longitude,
/// and rows with a zero sale value are dropped. Any other row with a missing
/// or malformed field fails the whole load.
pub fn clean(
    rows: Vec<RawTransaction>,
    excluded_product_lines: &[String],
) -> AppResult<Vec<TransactionRecord>> {
    let total = rows.len();
    let mut records = Vec::with_capacity(total);
    let mut dropped = 0usize;

    for (index, raw) in rows.into_iter().enumerate() {
        let record = match clean_row(index, raw, excluded_product_lines)? {
            Some(record) => record,
            None => {
                dropped += 1;
                continue;
            }
        };
        records.push(record);
    }

    tracing::info!(
        total,
        kept = records.len(),
        dropped,
        "Cleaned transaction rows"
    );

    Ok(records)
}

fn clean_row(
    index: usize,
    raw: RawTransaction,
    excluded_product_lines: &[String],
) -> AppResult<Option<TransactionRecord>> {
    let missing =
        |field: &str| AppError::DataQuality(format!("row {}: missing required field {}", index, field));

    let customer_id = raw.customer_id.ok_or_else(|| missing("Cod_Cliente"))?;
    let product_id = raw.product_id.ok_or_else(|| missing("Id_Producto"))?;
    let product_name = raw.product_name.ok_or_else(|| missing("Producto"))?;
    let quantity = raw.quantity.ok_or_else(|| missing("Cantidad"))?;
    let sale_value = raw.sale_value.ok_or_else(|| missing("ValorVenta"))?;
    let product_line = raw.product_line.ok_or_else(|| missing("Linea"))?;
    let latitude = raw.latitude.ok_or_else(|| missing("LATITUD"))?;
    let longitude = raw.longitude.ok_or_else(|| missing("LONGITUD"))?;

    if excluded_product_lines.contains(&product_line)
        || latitude == 0.0
        || longitude == 0.0
        || sale_value == 0.0
    {
        return Ok(None);
    }

    if !GeoPoint::new(latitude, longitude).is_valid() {
        return Err(AppError::DataQuality(format!(
            "row {}: coordinate ({}, {}) is out of range",
            index, latitude, longitude
        )));
    }

    if !sale_value.is_finite() {
        return Err(AppError::DataQuality(format!(
            "row {}: sale value {} is not a number",
            index, sale_value
        )));
    }

    let quantity = u32::try_from(quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| {
            AppError::DataQuality(format!(
                "row {}: quantity {} is not a positive integer",
                index, quantity
            ))
        })?;

    if product_name.trim().is_empty() {
        return Err(AppError::DataQuality(format!(
            "row {}: product {} has a blank product name",
            index, product_id
        )));
    }

    Ok(Some(TransactionRecord {
        customer_id,
        product_id,
        product_name,
        quantity,
        sale_value,
        product_line,
        latitude,
        longitude,
    }))
}
