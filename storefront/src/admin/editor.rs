//! Admin editor - read, modify, write back, reload

use super::commit::{CommitReport, PendingWrite, commit_in_order};
use super::error::{AdminError, AdminResult};
use super::ops::{self, SaleReversal};
use rust_decimal::Decimal;
use shared::{Catalog, Product, ProductStatus, Sale, SaleItem, SalesLedger};
use vitrine_client::FileStore;

/// Repository paths of the two documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pub catalog: String,
    pub ledger: String,
}

impl DocumentPaths {
    pub fn new(catalog: impl Into<String>, ledger: impl Into<String>) -> Self {
        Self {
            catalog: catalog.into(),
            ledger: ledger.into(),
        }
    }
}

impl Default for DocumentPaths {
    fn default() -> Self {
        Self::new("data/products.json", "data/sales.json")
    }
}

/// One line of the sales listing
#[derive(Debug, Clone, PartialEq)]
pub struct SaleSummary {
    pub id: String,
    pub customer: String,
    pub date: String,
    pub units: i64,
    pub total: Decimal,
}

/// Editing session over a file store
///
/// Every edit is applied in memory, then both documents are written in a
/// fixed order (catalog, ledger) and reloaded. Edits take `&mut self`, so
/// one editor never interleaves two saves.
pub struct AdminEditor<S: FileStore> {
    store: S,
    paths: DocumentPaths,
    catalog: Catalog,
    catalog_revision: Option<String>,
    ledger: SalesLedger,
    ledger_revision: Option<String>,
    /// Writes left over from a partial save
    pending: Vec<PendingWrite>,
}

impl<S: FileStore> AdminEditor<S> {
    /// Load both documents
    ///
    /// A missing ledger starts empty and is created on the first save.
    pub async fn load(store: S, paths: DocumentPaths) -> AdminResult<Self> {
        let mut editor = Self {
            store,
            paths,
            catalog: Catalog::default(),
            catalog_revision: None,
            ledger: SalesLedger::default(),
            ledger_revision: None,
            pending: Vec::new(),
        };
        editor.reload().await?;
        Ok(editor)
    }

    /// Replace local state with what the store holds now
    pub async fn reload(&mut self) -> AdminResult<()> {
        let catalog_file = self.store.read_file(&self.paths.catalog).await?;
        let catalog = Catalog::from_json(&catalog_file.content)?;

        let (ledger, ledger_revision) = match self.store.read_file(&self.paths.ledger).await {
            Ok(file) => (SalesLedger::from_json(&file.content)?, Some(file.revision)),
            Err(e) if e.is_not_found() => {
                tracing::info!(path = %self.paths.ledger, "No sales ledger yet, starting empty");
                (SalesLedger::default(), None)
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            products = catalog.products.len(),
            sales = ledger.sales.len(),
            "Documents loaded"
        );
        self.catalog = catalog;
        self.catalog_revision = Some(catalog_file.revision);
        self.ledger = ledger;
        self.ledger_revision = ledger_revision;
        self.pending.clear();
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    pub fn catalog_revision(&self) -> Option<&str> {
        self.catalog_revision.as_deref()
    }

    pub fn ledger_revision(&self) -> Option<&str> {
        self.ledger_revision.as_deref()
    }

    /// Writes not yet committed after a partial save
    pub fn pending(&self) -> &[PendingWrite] {
        &self.pending
    }

    // ========== Edits ==========

    pub async fn edit_status(&mut self, product_id: &str, status: ProductStatus) -> AdminResult<()> {
        let old = ops::set_status(&mut self.catalog, product_id, status)?;
        tracing::info!(product = %product_id, from = %old, to = %status, "Status changed");
        self.save_and_reload(&format!("Set {} status to {}", product_id, status))
            .await
    }

    pub async fn set_stock(&mut self, product_id: &str, stock: i64) -> AdminResult<()> {
        let old = ops::set_stock(&mut self.catalog, product_id, stock)?;
        tracing::info!(product = %product_id, from = old, to = stock, "Stock changed");
        self.save_and_reload(&format!("Set {} stock to {}", product_id, stock))
            .await
    }

    pub async fn delete_product(&mut self, product_id: &str) -> AdminResult<Product> {
        let product = self
            .catalog
            .remove_product(product_id)
            .ok_or_else(|| AdminError::ProductNotFound(product_id.to_string()))?;
        tracing::info!(product = %product_id, "Product deleted");
        self.save_and_reload(&format!("Delete product {}", product_id))
            .await?;
        Ok(product)
    }

    /// Remove a sale, returning its items to stock
    pub async fn delete_sale(&mut self, sale_id: &str) -> AdminResult<SaleReversal> {
        let reversal = ops::delete_sale(&mut self.catalog, &mut self.ledger, sale_id)?;
        tracing::info!(
            sale = %sale_id,
            restocked = reversal.restocked.len(),
            missing = reversal.missing.len(),
            "Sale deleted"
        );
        self.save_and_reload(&format!("Delete sale {}", sale_id))
            .await?;
        Ok(reversal)
    }

    pub async fn record_sale(
        &mut self,
        customer: &str,
        date: &str,
        items: Vec<SaleItem>,
    ) -> AdminResult<Sale> {
        let sale = ops::record_sale(&mut self.catalog, &mut self.ledger, customer, date, items)?;
        tracing::info!(sale = %sale.id, customer, units = sale.units(), "Sale recorded");
        self.save_and_reload(&format!("Record sale {}", sale.id))
            .await?;
        Ok(sale)
    }

    /// Sales in ledger order, valued at current prices
    pub fn sales_summary(&self) -> Vec<SaleSummary> {
        self.ledger
            .sales
            .iter()
            .map(|sale| SaleSummary {
                id: sale.id.clone(),
                customer: sale.customer.clone(),
                date: sale.date.clone(),
                units: sale.units(),
                total: sale.total(&self.catalog),
            })
            .collect()
    }

    // ========== Save cycle ==========

    /// Serialize both documents and write them in order
    ///
    /// Revisions of the writes that landed are recorded; the rest are kept
    /// as pending. Does not reload.
    pub async fn save(&mut self, action: &str) -> AdminResult<CommitReport> {
        let writes = vec![
            PendingWrite {
                path: self.paths.catalog.clone(),
                content: self.catalog.to_json()?,
                message: format!("{} (catalog)", action),
                revision: self.catalog_revision.clone(),
            },
            PendingWrite {
                path: self.paths.ledger.clone(),
                content: self.ledger.to_json()?,
                message: format!("{} (sales)", action),
                revision: self.ledger_revision.clone(),
            },
        ];
        Ok(self.commit(writes).await)
    }

    /// Resend what a partial save left behind, then reload
    pub async fn retry_save(&mut self) -> AdminResult<()> {
        if self.pending.is_empty() {
            return Err(AdminError::NothingPending);
        }
        let writes = std::mem::take(&mut self.pending);
        let report = self.commit(writes).await;
        self.finish(report).await
    }

    async fn save_and_reload(&mut self, action: &str) -> AdminResult<()> {
        let report = self.save(action).await?;
        self.finish(report).await
    }

    async fn commit(&mut self, writes: Vec<PendingWrite>) -> CommitReport {
        let report = commit_in_order(&self.store, writes).await;

        if let Some(revision) = report.revision_for(&self.paths.catalog) {
            self.catalog_revision = Some(revision.to_string());
        }
        if let Some(revision) = report.revision_for(&self.paths.ledger) {
            self.ledger_revision = Some(revision.to_string());
        }
        self.pending = report.remaining();
        report
    }

    /// Reload after a full save; hand anything else back to the caller
    async fn finish(&mut self, mut report: CommitReport) -> AdminResult<()> {
        if report.is_complete() {
            return self.reload().await;
        }
        if report.is_partial() {
            tracing::warn!("Save only partly applied: {}", report);
            return Err(AdminError::PartialSave(report));
        }
        match report.failed.take() {
            Some(failed) => Err(AdminError::Store(failed.error)),
            None => Err(AdminError::PartialSave(report)),
        }
    }
}
