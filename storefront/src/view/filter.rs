//! Category filter

use super::labels::Label;
use serde::{Deserialize, Serialize};
use shared::{Catalog, Language, Product};

/// Active category tab
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Every product that is not coming soon
    #[default]
    All,
    /// Only products that are coming soon
    ComingSoon,
    /// One catalog category, coming-soon products excluded
    Named(String),
}

impl CategoryFilter {
    /// `all` and `soon` are reserved; anything else names a category
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => CategoryFilter::All,
            "soon" => CategoryFilter::ComingSoon,
            name => CategoryFilter::Named(name.to_string()),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => !product.is_coming_soon(),
            CategoryFilter::ComingSoon => product.is_coming_soon(),
            CategoryFilter::Named(name) => {
                !product.is_coming_soon() && product.category == *name
            }
        }
    }

    pub fn label(&self, lang: Language) -> String {
        match self {
            CategoryFilter::All => Label::AllProducts.text(lang).to_string(),
            CategoryFilter::ComingSoon => Label::ComingSoon.text(lang).to_string(),
            CategoryFilter::Named(name) => name.clone(),
        }
    }
}

/// Products visible under `filter`, in catalog order
pub fn filter_products<'a>(catalog: &'a Catalog, filter: &CategoryFilter) -> Vec<&'a Product> {
    catalog.products.iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{LocalizedText, ProductStatus};

    fn product(id: &str, category: &str, status: ProductStatus) -> Product {
        let mut p = Product::new(id, LocalizedText::new(id, ""), category);
        p.status = status;
        p
    }

    fn catalog() -> Catalog {
        Catalog {
            products: vec![
                product("a", "Helados", ProductStatus::Ok),
                product("b", "Helados", ProductStatus::Soon),
                product("c", "Paletas", ProductStatus::Out),
                product("d", "Paletas", ProductStatus::Soon),
            ],
            ..Default::default()
        }
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_all_excludes_soon() {
        let catalog = catalog();
        assert_eq!(ids(&filter_products(&catalog, &CategoryFilter::All)), ["a", "c"]);
    }

    #[test]
    fn test_coming_soon_only_soon() {
        let catalog = catalog();
        assert_eq!(
            ids(&filter_products(&catalog, &CategoryFilter::ComingSoon)),
            ["b", "d"]
        );
    }

    #[test]
    fn test_named_category_excludes_soon() {
        let catalog = catalog();
        let helados = CategoryFilter::Named("Helados".into());
        assert_eq!(ids(&filter_products(&catalog, &helados)), ["a"]);
        let none = CategoryFilter::Named("Bebidas".into());
        assert!(filter_products(&catalog, &none).is_empty());
    }

    #[test]
    fn test_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(" soon "), CategoryFilter::ComingSoon);
        assert_eq!(
            CategoryFilter::parse("Paletas"),
            CategoryFilter::Named("Paletas".into())
        );
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(CategoryFilter::Named("Helados".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "named", "name": "Helados"}));
        let all: CategoryFilter = serde_json::from_str(r#"{"kind": "all"}"#).unwrap();
        assert_eq!(all, CategoryFilter::All);
    }
}
