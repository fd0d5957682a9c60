use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A single sales row as it arrives from a source, before cleaning
///
/// Every field is optional so that missing columns surface as data-quality
/// errors during cleaning instead of deserialization failures with no row context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RawTransaction {
    #[serde(rename = "Cod_Cliente", default)]
    pub customer_id: Option<i64>,
    #[serde(rename = "Id_Producto", default)]
    pub product_id: Option<i64>,
    #[serde(rename = "Producto", default)]
    pub product_name: Option<String>,
    #[serde(rename = "Cantidad", default)]
    pub quantity: Option<i64>,
    #[serde(rename = "ValorVenta", default)]
    pub sale_value: Option<f64>,
    #[serde(rename = "Linea", default)]
    pub product_line: Option<String>,
    #[serde(rename = "LATITUD", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "LONGITUD", default)]
    pub longitude: Option<f64>,
}

/// A cleaned sales row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub customer_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: u32,
    /// Sale value in currency units
    pub sale_value: f64,
    pub product_line: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl TransactionRecord {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// One row per distinct (product id, product name) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFrequencySummary {
    pub product_id: i64,
    pub product_name: String,
    /// Most frequent quantity for the product; `None` when the group had no quantities
    pub modal_quantity: Option<u32>,
}
