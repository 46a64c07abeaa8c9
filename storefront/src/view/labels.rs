//! UI labels in both languages

use shared::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    AllProducts,
    ComingSoon,
    InStock,
    OutOfStock,
    Upcoming,
    Stock,
    NoProducts,
    LoadFailed,
}

impl Label {
    pub fn text(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Label::AllProducts, Language::Es) => "Todos los productos",
            (Label::AllProducts, Language::En) => "All products",
            (Label::ComingSoon, Language::Es) => "Próximamente",
            (Label::ComingSoon, Language::En) => "Coming soon",
            (Label::InStock, Language::Es) => "Disponible",
            (Label::InStock, Language::En) => "In stock",
            (Label::OutOfStock, Language::Es) => "Agotado",
            (Label::OutOfStock, Language::En) => "Out of stock",
            (Label::Upcoming, Language::Es) => "Muy pronto",
            (Label::Upcoming, Language::En) => "Soon",
            (Label::Stock, Language::Es) => "Existencias",
            (Label::Stock, Language::En) => "Stock",
            (Label::NoProducts, Language::Es) => "No hay productos en esta categoría",
            (Label::NoProducts, Language::En) => "No products in this category",
            (Label::LoadFailed, Language::Es) => "No se pudo cargar el catálogo",
            (Label::LoadFailed, Language::En) => "Could not load the catalog",
        }
    }
}
