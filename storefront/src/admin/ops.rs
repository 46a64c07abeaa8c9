//! In-memory edits
//!
//! Pure mutations of the loaded documents. Nothing here touches the
//! store; the editor wraps each one in a save-and-reload cycle.

use super::error::{AdminError, AdminResult};
use shared::{Catalog, ProductStatus, Sale, SaleItem, SalesLedger};

/// What deleting a sale did to the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct SaleReversal {
    pub sale: Sale,
    /// Products whose stock was given back
    pub restocked: Vec<String>,
    /// Products flipped from `out` to `ok`
    pub reopened: Vec<String>,
    /// Item product ids no longer in the catalog
    pub missing: Vec<String>,
}

pub fn set_status(catalog: &mut Catalog, id: &str, status: ProductStatus) -> AdminResult<ProductStatus> {
    let product = catalog
        .product_mut(id)
        .ok_or_else(|| AdminError::ProductNotFound(id.to_string()))?;
    Ok(std::mem::replace(&mut product.status, status))
}

pub fn set_stock(catalog: &mut Catalog, id: &str, stock: i64) -> AdminResult<i64> {
    let product = catalog
        .product_mut(id)
        .ok_or_else(|| AdminError::ProductNotFound(id.to_string()))?;
    Ok(std::mem::replace(&mut product.stock, stock))
}

/// Remove a sale and give its items back to stock
///
/// Items whose product is gone are skipped.
pub fn delete_sale(
    catalog: &mut Catalog,
    ledger: &mut SalesLedger,
    sale_id: &str,
) -> AdminResult<SaleReversal> {
    let sale = ledger
        .remove_sale(sale_id)
        .ok_or_else(|| AdminError::SaleNotFound(sale_id.to_string()))?;

    let mut restocked = Vec::new();
    let mut reopened = Vec::new();
    let mut missing = Vec::new();

    for item in &sale.items {
        match catalog.product_mut(&item.product_id) {
            Some(product) => {
                if product.restock(item.qty) {
                    reopened.push(item.product_id.clone());
                }
                restocked.push(item.product_id.clone());
            }
            None => {
                tracing::warn!(product = %item.product_id, sale = %sale_id, "Sale item references missing product");
                missing.push(item.product_id.clone());
            }
        }
    }

    Ok(SaleReversal {
        sale,
        restocked,
        reopened,
        missing,
    })
}

/// Record a sale and take its items out of stock
///
/// All items are checked before anything changes.
pub fn record_sale(
    catalog: &mut Catalog,
    ledger: &mut SalesLedger,
    customer: &str,
    date: &str,
    items: Vec<SaleItem>,
) -> AdminResult<Sale> {
    if items.is_empty() {
        return Err(AdminError::InvalidSale("no items".into()));
    }
    for item in &items {
        if item.qty <= 0 {
            return Err(AdminError::InvalidSale(format!(
                "quantity for {} must be positive",
                item.product_id
            )));
        }
        if catalog.product(&item.product_id).is_none() {
            return Err(AdminError::ProductNotFound(item.product_id.clone()));
        }
    }

    let id = ledger.next_id()?;
    for item in &items {
        if let Some(product) = catalog.product_mut(&item.product_id) {
            product.take_stock(item.qty);
        }
    }

    let sale = Sale {
        id,
        customer: customer.to_string(),
        date: date.to_string(),
        items,
        extra: Default::default(),
    };
    ledger.sales.push(sale.clone());
    Ok(sale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{LocalizedText, Product};

    fn product(id: &str, stock: i64, status: ProductStatus) -> Product {
        let mut p = Product::new(id, LocalizedText::new(id, ""), "Helados");
        p.stock = stock;
        p.status = status;
        p
    }

    fn sale(id: &str, items: Vec<SaleItem>) -> Sale {
        Sale {
            id: id.into(),
            customer: "Ana".into(),
            date: "2024-05-01".into(),
            items,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_delete_sale_restores_stock_and_status() {
        let mut catalog = Catalog {
            products: vec![product("p1", 0, ProductStatus::Out)],
            ..Default::default()
        };
        let mut ledger = SalesLedger {
            sales: vec![sale("s1", vec![SaleItem::new("p1", 3)])],
            ..Default::default()
        };

        let reversal = delete_sale(&mut catalog, &mut ledger, "s1").unwrap();
        let p1 = catalog.product("p1").unwrap();
        assert_eq!(p1.stock, 3);
        assert_eq!(p1.status, ProductStatus::Ok);
        assert_eq!(reversal.reopened, ["p1"]);
        assert!(ledger.sales.is_empty());
    }

    #[test]
    fn test_delete_sale_with_missing_product() {
        let mut catalog = Catalog {
            products: vec![product("p2", 5, ProductStatus::Ok)],
            ..Default::default()
        };
        let before = catalog.clone();
        let mut ledger = SalesLedger {
            sales: vec![sale("s1", vec![SaleItem::new("ghost", 2)])],
            ..Default::default()
        };

        let reversal = delete_sale(&mut catalog, &mut ledger, "s1").unwrap();
        assert_eq!(reversal.missing, ["ghost"]);
        assert!(reversal.restocked.is_empty());
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_delete_unknown_sale() {
        let mut catalog = Catalog::default();
        let mut ledger = SalesLedger::default();
        assert!(matches!(
            delete_sale(&mut catalog, &mut ledger, "s9"),
            Err(AdminError::SaleNotFound(_))
        ));
    }

    #[test]
    fn test_set_status_returns_previous() {
        let mut catalog = Catalog {
            products: vec![product("p1", 0, ProductStatus::Ok)],
            ..Default::default()
        };
        let old = set_status(&mut catalog, "p1", ProductStatus::Soon).unwrap();
        assert_eq!(old, ProductStatus::Ok);
        // stock is left alone
        assert_eq!(catalog.product("p1").unwrap().stock, 0);
        assert!(set_status(&mut catalog, "nope", ProductStatus::Ok).is_err());
    }

    #[test]
    fn test_record_sale_takes_stock() {
        let mut catalog = Catalog {
            products: vec![product("p1", 2, ProductStatus::Ok), product("p2", 9, ProductStatus::Ok)],
            ..Default::default()
        };
        let mut ledger = SalesLedger::default();

        let sale = record_sale(
            &mut catalog,
            &mut ledger,
            "Luis",
            "2024-06-01",
            vec![SaleItem::new("p1", 2), SaleItem::new("p2", 1)],
        )
        .unwrap();

        assert_eq!(sale.id, "s1");
        assert_eq!(ledger.sales.len(), 1);
        let p1 = catalog.product("p1").unwrap();
        assert_eq!((p1.stock, p1.status), (0, ProductStatus::Out));
        assert_eq!(catalog.product("p2").unwrap().stock, 8);
    }

    #[test]
    fn test_record_sale_validates_before_mutating() {
        let mut catalog = Catalog {
            products: vec![product("p1", 2, ProductStatus::Ok)],
            ..Default::default()
        };
        let before = catalog.clone();
        let mut ledger = SalesLedger::default();

        let err = record_sale(
            &mut catalog,
            &mut ledger,
            "Luis",
            "2024-06-01",
            vec![SaleItem::new("p1", 1), SaleItem::new("ghost", 1)],
        )
        .unwrap_err();
        assert!(matches!(err, AdminError::ProductNotFound(ref id) if id == "ghost"));
        assert_eq!(catalog, before);
        assert!(ledger.sales.is_empty());

        let err = record_sale(&mut catalog, &mut ledger, "Luis", "", vec![SaleItem::new("p1", 0)])
            .unwrap_err();
        assert!(matches!(err, AdminError::InvalidSale(_)));
    }

    #[test]
    fn test_record_sale_without_free_id_changes_nothing() {
        let mut catalog = Catalog {
            products: vec![product("p1", 2, ProductStatus::Ok)],
            ..Default::default()
        };
        let before = catalog.clone();
        let mut ledger = SalesLedger {
            sales: vec![sale(&format!("s{}", u64::MAX), vec![])],
            ..Default::default()
        };

        let err = record_sale(&mut catalog, &mut ledger, "Luis", "", vec![SaleItem::new("p1", 1)])
            .unwrap_err();
        assert!(matches!(err, AdminError::Document(_)));
        assert_eq!(catalog, before);
        assert_eq!(ledger.sales.len(), 1);
    }
}
