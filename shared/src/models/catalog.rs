//! Catalog Model

use super::document;
use super::product::Product;
use crate::error::DocumentResult;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Product catalog document (`products.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "shopName", default)]
    pub shop_name: String,
    /// Ordered category names, duplicates removed on load
    #[serde(default, deserialize_with = "deserialize_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn deserialize_categories<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(dedup_preserving_order(raw))
}

/// Keep the first occurrence of each name
fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

impl Catalog {
    pub const KIND: &'static str = "catalog";

    pub fn from_json(json: &str) -> DocumentResult<Self> {
        document::parse(Self::KIND, json)
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        document::render(Self::KIND, self)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Remove a product, returning it if it existed
    pub fn remove_product(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }
}
