//! Card ordering

use serde::{Deserialize, Serialize};
use shared::{Language, Product};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortRule {
    /// Display name, case-insensitive
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
}

impl SortRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortRule::Name => "name",
            SortRule::PriceAsc => "price-asc",
            SortRule::PriceDesc => "price-desc",
        }
    }
}

impl std::fmt::Display for SortRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unrecognized sort rule name
#[derive(Debug, thiserror::Error)]
#[error("Unknown sort rule: {0}")]
pub struct UnknownSortRule(pub String);

impl FromStr for SortRule {
    type Err = UnknownSortRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortRule::Name),
            "price-asc" | "price" => Ok(SortRule::PriceAsc),
            "price-desc" => Ok(SortRule::PriceDesc),
            _ => Err(UnknownSortRule(s.to_string())),
        }
    }
}

fn name_key(product: &Product, lang: Language) -> String {
    product.display_name(lang).to_lowercase()
}

/// In-stock before out-of-stock
fn stock_rank(product: &Product) -> u8 {
    u8::from(product.is_out_of_stock())
}

fn compare(a: &Product, b: &Product, rule: SortRule, lang: Language) -> Ordering {
    let by_name = || name_key(a, lang).cmp(&name_key(b, lang));
    let primary = match rule {
        SortRule::Name => by_name(),
        SortRule::PriceAsc => a.price.cmp(&b.price),
        SortRule::PriceDesc => b.price.cmp(&a.price),
    };
    let primary = primary.then_with(|| stock_rank(a).cmp(&stock_rank(b)));
    let primary = match rule {
        SortRule::Name => primary,
        SortRule::PriceAsc | SortRule::PriceDesc => primary.then_with(by_name),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Order cards for display
///
/// Total order (ids break every remaining tie), so sorting an already
/// sorted list leaves it unchanged.
pub fn sort_products(products: &mut [&Product], rule: SortRule, lang: Language) {
    products.sort_by(|a, b| compare(a, b, rule, lang));
}
