use async_trait::async_trait;

use super::entities::{Customer, Invoice, InvoiceChanges, InvoiceSummary, NewInvoice};
use super::errors::InvoiceError;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Inserts a row and returns it with the store-assigned id
  async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError>;
  /// Returns the number of rows changed
  async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64, InvoiceError>;
  async fn delete(&self, id: &str) -> Result<(), InvoiceError>;
  async fn find_by_id(&self, id: &str) -> Result<Option<Invoice>, InvoiceError>;
  async fn list_summaries(&self) -> Result<Vec<InvoiceSummary>, InvoiceError>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
  async fn list(&self) -> Result<Vec<Customer>, InvoiceError>;
}

/// Signals that cached renderings of a path are stale.
///
/// Implementations must not fail the caller: a cache that cannot be reached
/// is logged and left to expire.
#[async_trait]
pub trait PathRevalidator: Send + Sync {
  async fn revalidate_path(&self, path: &str);
}
