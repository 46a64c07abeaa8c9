//! Render instructions

use super::filter::{CategoryFilter, filter_products};
use super::labels::Label;
use super::sort::{SortRule, sort_products};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{Catalog, Language, Product, ProductStatus};

/// Everything the grid depends on besides the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub category: CategoryFilter,
    pub language: Language,
    pub sort: SortRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTab {
    pub filter: CategoryFilter,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub flavor: String,
    pub price: String,
    pub stock: i64,
    pub status: ProductStatus,
    pub badge: String,
    pub image: Option<String>,
    /// Shown greyed out
    pub unavailable: bool,
}

/// The whole page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub language: Language,
    pub tabs: Vec<CategoryTab>,
    pub cards: Vec<ProductCard>,
    /// Set when no card matches the active tab
    pub empty_message: Option<String>,
}

/// Inline panel shown instead of the grid when loading fails
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPanel {
    pub title: String,
    pub detail: String,
}

pub fn format_price(price: Decimal) -> String {
    format!("${:.2}", price.round_dp(2))
}

fn badge(status: ProductStatus, lang: Language) -> &'static str {
    match status {
        ProductStatus::Ok => Label::InStock.text(lang),
        ProductStatus::Out => Label::OutOfStock.text(lang),
        ProductStatus::Soon => Label::Upcoming.text(lang),
    }
}

fn card(product: &Product, lang: Language) -> ProductCard {
    ProductCard {
        id: product.id.clone(),
        name: product.display_name(lang).to_string(),
        flavor: product.display_flavor(lang).to_string(),
        price: format_price(product.price),
        stock: product.stock,
        status: product.status,
        badge: badge(product.status, lang).to_string(),
        image: product.image.clone(),
        unavailable: product.status != ProductStatus::Ok,
    }
}

fn tabs(catalog: &Catalog, state: &ViewState) -> Vec<CategoryTab> {
    let reserved = [CategoryFilter::All, CategoryFilter::ComingSoon];
    let named = catalog
        .categories
        .iter()
        .map(|name| CategoryFilter::Named(name.clone()));

    reserved
        .into_iter()
        .chain(named)
        .map(|filter| CategoryTab {
            label: filter.label(state.language),
            active: filter == state.category,
            filter,
        })
        .collect()
}

/// Build the page for `state`
pub fn render(catalog: &Catalog, state: &ViewState) -> ViewModel {
    let mut products = filter_products(catalog, &state.category);
    sort_products(&mut products, state.sort, state.language);

    let cards: Vec<ProductCard> = products
        .into_iter()
        .map(|p| card(p, state.language))
        .collect();
    let empty_message = cards
        .is_empty()
        .then(|| Label::NoProducts.text(state.language).to_string());

    ViewModel {
        title: catalog.shop_name.clone(),
        language: state.language,
        tabs: tabs(catalog, state),
        cards,
        empty_message,
    }
}

/// Panel for a failed load
pub fn render_error(lang: Language, error: &dyn std::fmt::Display) -> ErrorPanel {
    ErrorPanel {
        title: Label::LoadFailed.text(lang).to_string(),
        detail: error.to_string(),
    }
}
