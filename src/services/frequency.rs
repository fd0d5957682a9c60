use std::collections::{BTreeMap, HashMap};

use crate::{
    error::{AppError, AppResult},
    models::{ProductFrequencySummary, TransactionRecord},
};

/// Reduces transactions to one summary row per (product id, product name)
///
/// Each row carries the modal purchased quantity of its group. Groups are
/// emitted in ascending (product id, product name) order.
pub fn aggregate(transactions: &[TransactionRecord]) -> AppResult<Vec<ProductFrequencySummary>> {
    let mut groups: BTreeMap<(i64, &str), Vec<u32>> = BTreeMap::new();

    for (row, record) in transactions.iter().enumerate() {
        if record.product_name.trim().is_empty() {
            return Err(AppError::DataQuality(format!(
                "row {}: product {} has a blank product name",
                row, record.product_id
            )));
        }

        groups
            .entry((record.product_id, record.product_name.as_str()))
            .or_default()
            .push(record.quantity);
    }

    let summary: Vec<ProductFrequencySummary> = groups
        .into_iter()
        .map(|((product_id, product_name), quantities)| ProductFrequencySummary {
            product_id,
            product_name: product_name.to_string(),
            modal_quantity: modal_quantity(&quantities),
        })
        .collect();

    tracing::debug!(
        transactions = transactions.len(),
        products = summary.len(),
        "Aggregated product frequencies"
    );

    Ok(summary)
}

/// Most frequent value; ties go to the smallest value, empty input has no mode
pub fn modal_quantity(quantities: &[u32]) -> Option<u32> {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for &quantity in quantities {
        *counts.entry(quantity).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(qty_a, count_a), (qty_b, count_b)| {
            count_a.cmp(count_b).then_with(|| qty_b.cmp(qty_a))
        })
        .map(|(quantity, _)| quantity)
}
