use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::{
    error::{AppError, AppResult},
    models::{ProductFrequencySummary, RecommendationEntry, TransactionRecord},
};

pub const DEFAULT_TOP_N: usize = 5;

/// Ranks products for `target_customer_id`
///
/// With no nearby customers the customer's own purchases are ranked by modal
/// quantity. Otherwise the candidates are products bought by any nearby
/// customer that the target has never bought, ranked by modal quantity and
/// then by their dataset-wide total sale value.
pub fn recommend(
    transactions: &[TransactionRecord],
    summary: &[ProductFrequencySummary],
    target_customer_id: i64,
    nearby_customer_ids: &[i64],
    top_n: usize,
) -> AppResult<Vec<RecommendationEntry>> {
    let own_products = products_bought_by(transactions, |id| id == target_customer_id);
    if own_products.is_empty() {
        return Err(AppError::CustomerNotFound(target_customer_id));
    }

    if nearby_customer_ids.is_empty() {
        let mut entries: Vec<RecommendationEntry> = summary
            .iter()
            .filter(|row| own_products.contains(&row.product_id))
            .map(|row| entry(row, None))
            .collect();

        entries.sort_by(by_modal_quantity);
        entries.truncate(top_n);
        return Ok(entries);
    }

    let nearby: HashSet<i64> = nearby_customer_ids.iter().copied().collect();
    let nearby_products = products_bought_by(transactions, |id| nearby.contains(&id));
    let candidates: HashSet<i64> = nearby_products.difference(&own_products).copied().collect();

    if candidates.is_empty() {
        tracing::debug!(
            customer_id = target_customer_id,
            nearby_customers = nearby.len(),
            "Nearby customers bought nothing new"
        );
        return Ok(Vec::new());
    }

    let totals = sale_totals(transactions, &candidates);
    let mut entries: Vec<RecommendationEntry> = summary
        .iter()
        .filter(|row| candidates.contains(&row.product_id))
        .map(|row| entry(row, totals.get(&row.product_id).copied()))
        .collect();

    entries.sort_by(|a, b| {
        descending_option(a.modal_quantity, b.modal_quantity, |x, y| x.cmp(&y))
            .then_with(|| {
                descending_option(a.total_sale_value, b.total_sale_value, |x, y| x.total_cmp(&y))
            })
            .then_with(|| tie_break(a, b))
    });
    entries.truncate(top_n);

    Ok(entries)
}

/// Sums sale value per product over every transaction, restricted to `products`
pub fn sale_totals(
    transactions: &[TransactionRecord],
    products: &HashSet<i64>,
) -> HashMap<i64, f64> {
    let mut totals: HashMap<i64, f64> = HashMap::new();
    for record in transactions {
        if products.contains(&record.product_id) {
            *totals.entry(record.product_id).or_insert(0.0) += record.sale_value;
        }
    }
    totals
}

fn products_bought_by(
    transactions: &[TransactionRecord],
    is_buyer: impl Fn(i64) -> bool,
) -> HashSet<i64> {
    transactions
        .iter()
        .filter(|record| is_buyer(record.customer_id))
        .map(|record| record.product_id)
        .collect()
}

fn entry(row: &ProductFrequencySummary, total_sale_value: Option<f64>) -> RecommendationEntry {
    RecommendationEntry {
        product_id: row.product_id,
        product_name: row.product_name.clone(),
        modal_quantity: row.modal_quantity,
        total_sale_value,
    }
}

fn by_modal_quantity(a: &RecommendationEntry, b: &RecommendationEntry) -> Ordering {
    descending_option(a.modal_quantity, b.modal_quantity, |x, y| x.cmp(&y))
        .then_with(|| tie_break(a, b))
}

fn tie_break(a: &RecommendationEntry, b: &RecommendationEntry) -> Ordering {
    a.product_id
        .cmp(&b.product_id)
        .then_with(|| a.product_name.cmp(&b.product_name))
}

/// Larger values first; absent values after every present one
fn descending_option<T: Copy>(
    a: Option<T>,
    b: Option<T>,
    cmp: impl Fn(T, T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(y, x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
