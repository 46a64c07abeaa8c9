//! Sales Ledger Model

use super::catalog::Catalog;
use super::document;
use crate::error::{DocumentError, DocumentResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One line of a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: String,
    pub qty: i64,
}

impl SaleItem {
    pub fn new(product_id: impl Into<String>, qty: i64) -> Self {
        Self {
            product_id: product_id.into(),
            qty,
        }
    }
}

/// Sale record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    #[serde(default)]
    pub customer: String,
    /// Free-form date as entered by the admin
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub items: Vec<SaleItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sale {
    pub fn units(&self) -> i64 {
        self.items.iter().fold(0i64, |units, i| units.saturating_add(i.qty))
    }

    /// Value of the sale at current catalog prices
    ///
    /// Items whose product no longer exists count as zero.
    pub fn total(&self, catalog: &Catalog) -> Decimal {
        self.items
            .iter()
            .filter_map(|item| {
                catalog
                    .product(&item.product_id)
                    .map(|p| p.price.saturating_mul(Decimal::from(item.qty)))
            })
            .fold(Decimal::ZERO, |total, line| total.saturating_add(line))
    }
}

/// Sales ledger document (`sales.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesLedger {
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SalesLedger {
    pub const KIND: &'static str = "sales ledger";

    pub fn from_json(json: &str) -> DocumentResult<Self> {
        document::parse(Self::KIND, json)
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        document::render(Self::KIND, self)
    }

    pub fn sale(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    pub fn remove_sale(&mut self, id: &str) -> Option<Sale> {
        let index = self.sales.iter().position(|s| s.id == id)?;
        Some(self.sales.remove(index))
    }

    /// Next free id of the form `s<n>`
    pub fn next_id(&self) -> DocumentResult<String> {
        let max = self
            .sales
            .iter()
            .filter_map(|s| s.id.strip_prefix('s')?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let next = max
            .checked_add(1)
            .ok_or_else(|| DocumentError::IdsExhausted(format!("s{}", max)))?;
        Ok(format!("s{}", next))
    }
}
