//! Product Model

use super::i18n::{Language, LocalizedText};
use crate::error::DocumentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Availability tag of a product
///
/// Independent of `stock`: nothing forces `Out` when stock reaches zero,
/// the two only meet in the restock/sell helpers below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// In stock
    #[default]
    Ok,
    /// Out of stock
    Out,
    /// Coming soon
    Soon,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Ok => "ok",
            ProductStatus::Out => "out",
            ProductStatus::Soon => "soon",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ok" => Ok(ProductStatus::Ok),
            "out" => Ok(ProductStatus::Out),
            "soon" => Ok(ProductStatus::Soon),
            _ => Err(DocumentError::UnknownStatus(s.to_string())),
        }
    }
}

/// Prices as JSON numbers: whole amounts as integers, the rest as floats
mod price_number {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::{Deserialize, Deserializer, Serializer, ser::Error};

    pub fn serialize<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let price = price.normalize();
        if price.scale() == 0
            && let Some(whole) = price.to_i64()
        {
            return serializer.serialize_i64(whole);
        }
        match price.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(S::Error::custom(format!("price {} is not representable", price))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default, skip_serializing_if = "LocalizedText::is_absent")]
    pub name: LocalizedText,
    #[serde(default, skip_serializing_if = "LocalizedText::is_absent")]
    pub flavor: LocalizedText,
    /// Category name (matches an entry of `Catalog::categories`)
    #[serde(default)]
    pub category: String,
    /// Written as a JSON number; strings are accepted on read
    #[serde(default, with = "price_number")]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub status: ProductStatus,
    /// Image path or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Fields this crate does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: LocalizedText, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name,
            flavor: LocalizedText::default(),
            category: category.into(),
            price: Decimal::ZERO,
            stock: 0,
            status: ProductStatus::Ok,
            image: None,
            extra: Map::new(),
        }
    }

    pub fn display_name(&self, lang: Language) -> &str {
        self.name.resolve(lang)
    }

    pub fn display_flavor(&self, lang: Language) -> &str {
        self.flavor.resolve(lang)
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.status == ProductStatus::Out
    }

    pub fn is_coming_soon(&self) -> bool {
        self.status == ProductStatus::Soon
    }

    /// Add `qty` units back
    ///
    /// An `Out` product whose stock becomes positive is flipped to `Ok`.
    /// Returns `true` when the status changed.
    pub fn restock(&mut self, qty: i64) -> bool {
        self.stock = self.stock.saturating_add(qty);
        if self.stock > 0 && self.status == ProductStatus::Out {
            self.status = ProductStatus::Ok;
            return true;
        }
        false
    }

    /// Take `qty` units out
    ///
    /// An `Ok` product whose stock drops to zero or below is flipped to
    /// `Out`. Returns `true` when the status changed.
    pub fn take_stock(&mut self, qty: i64) -> bool {
        self.stock = self.stock.saturating_sub(qty);
        if self.stock <= 0 && self.status == ProductStatus::Ok {
            self.status = ProductStatus::Out;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, status: ProductStatus) -> Product {
        let mut p = Product::new("p1", LocalizedText::new("Fresa", "Strawberry"), "Frutas");
        p.stock = stock;
        p.status = status;
        p
    }

    #[test]
    fn test_restock_flips_out_to_ok() {
        let mut p = product(0, ProductStatus::Out);
        assert!(p.restock(3));
        assert_eq!(p.stock, 3);
        assert_eq!(p.status, ProductStatus::Ok);
    }

    #[test]
    fn test_restock_keeps_out_when_still_empty() {
        let mut p = product(-5, ProductStatus::Out);
        assert!(!p.restock(2));
        assert_eq!(p.stock, -3);
        assert_eq!(p.status, ProductStatus::Out);
    }

    #[test]
    fn test_restock_never_touches_soon() {
        let mut p = product(0, ProductStatus::Soon);
        assert!(!p.restock(4));
        assert_eq!(p.status, ProductStatus::Soon);
    }

    #[test]
    fn test_take_stock_flips_ok_to_out() {
        let mut p = product(2, ProductStatus::Ok);
        assert!(!p.take_stock(1));
        assert!(p.take_stock(1));
        assert_eq!(p.stock, 0);
        assert_eq!(p.status, ProductStatus::Out);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(" OUT ".parse::<ProductStatus>().unwrap(), ProductStatus::Out);
        assert!("sold".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let json = r#"{
            "id": "p9",
            "name": {"es": "Menta", "en": "Mint"},
            "category": "Hierbas",
            "price": 2.5,
            "stock": 7,
            "status": "ok",
            "image": "img/mint.png",
            "badge": "new"
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.price, Decimal::new(25, 1));
        assert_eq!(p.extra.get("badge"), Some(&Value::from("new")));

        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["badge"], "new");
        assert_eq!(back["status"], "ok");
        assert!(back["price"].is_number());
        assert_eq!(back["price"], serde_json::json!(2.5));
        assert!(back.get("flavor").is_none());
    }

    #[test]
    fn test_price_written_as_number() {
        let mut p = product(1, ProductStatus::Ok);
        p.price = Decimal::new(200, 2);
        assert_eq!(serde_json::to_value(&p).unwrap()["price"], serde_json::json!(2));

        p.price = Decimal::new(1999, 2);
        assert_eq!(serde_json::to_value(&p).unwrap()["price"], serde_json::json!(19.99));

        // older files with string prices still load
        let p: Product = serde_json::from_str(r#"{"id": "p1", "price": "4.25"}"#).unwrap();
        assert_eq!(p.price, Decimal::new(425, 2));
    }

    #[test]
    fn test_stock_arithmetic_saturates() {
        let mut p = product(i64::MAX, ProductStatus::Ok);
        assert!(!p.restock(10));
        assert_eq!(p.stock, i64::MAX);

        let mut p = product(i64::MIN + 1, ProductStatus::Ok);
        assert!(p.take_stock(5));
        assert_eq!(p.stock, i64::MIN);
    }
}
