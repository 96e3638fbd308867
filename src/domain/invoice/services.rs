use chrono::Utc;
use std::sync::Arc;

use super::entities::{Customer, Invoice, InvoiceChanges, InvoiceSummary, NewInvoice};
use super::errors::InvoiceError;
use super::ports::{CustomerRepository, InvoiceRepository, PathRevalidator};
use super::validation::InvoiceInput;

/// Listing view revalidated after every successful mutation
pub const INVOICES_PATH: &str = "/dashboard/invoices";

pub struct InvoiceServiceDependencies {
  pub invoice_repo: Arc<dyn InvoiceRepository>,
  pub customer_repo: Arc<dyn CustomerRepository>,
  pub revalidator: Arc<dyn PathRevalidator>,
}

/// Persists validated invoice input and keeps the listing view fresh.
///
/// Every mutation runs a single statement; the listing path is revalidated
/// only after the statement succeeds.
pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  customer_repo: Arc<dyn CustomerRepository>,
  revalidator: Arc<dyn PathRevalidator>,
}

impl InvoiceService {
  pub fn new(deps: InvoiceServiceDependencies) -> Self {
    Self {
      invoice_repo: deps.invoice_repo,
      customer_repo: deps.customer_repo,
      revalidator: deps.revalidator,
    }
  }

  /// Inserts a new invoice dated today (UTC)
  pub async fn create_invoice(&self, input: InvoiceInput) -> Result<Invoice, InvoiceError> {
    let new_invoice = NewInvoice {
      customer_id: input.customer_id.into_inner(),
      amount: input.amount.minor_units(),
      status: input.status,
      date: Utc::now().date_naive(),
    };

    let invoice = self.invoice_repo.insert(new_invoice).await.map_err(|e| {
      tracing::error!("Failed to insert invoice: {}", e);
      e
    })?;

    tracing::info!(
      invoice_id = %invoice.id,
      amount = invoice.amount,
      status = invoice.status.as_str(),
      "Invoice created"
    );

    self.revalidator.revalidate_path(INVOICES_PATH).await;
    Ok(invoice)
  }

  pub async fn update_invoice(&self, id: &str, input: InvoiceInput) -> Result<(), InvoiceError> {
    let changes = InvoiceChanges {
      customer_id: input.customer_id.into_inner(),
      amount: input.amount.minor_units(),
      status: input.status,
    };

    let updated = self.invoice_repo.update(id, changes).await.map_err(|e| {
      tracing::error!("Failed to update invoice {}: {}", id, e);
      e
    })?;

    if updated == 0 {
      tracing::warn!(invoice_id = %id, "Update matched no invoice");
    } else {
      tracing::info!(invoice_id = %id, "Invoice updated");
    }

    self.revalidator.revalidate_path(INVOICES_PATH).await;
    Ok(())
  }

  pub async fn delete_invoice(&self, id: &str) -> Result<(), InvoiceError> {
    self.invoice_repo.delete(id).await?;
    tracing::info!(invoice_id = %id, "Invoice deleted");

    self.revalidator.revalidate_path(INVOICES_PATH).await;
    Ok(())
  }

  pub async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, InvoiceError> {
    self.invoice_repo.list_summaries().await
  }

  pub async fn get_invoice(&self, id: &str) -> Result<Invoice, InvoiceError> {
    self
      .invoice_repo
      .find_by_id(id)
      .await?
      .ok_or_else(|| InvoiceError::InvoiceNotFound(id.to_string()))
  }

  pub async fn list_customers(&self) -> Result<Vec<Customer>, InvoiceError> {
    self.customer_repo.list().await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::form::FormData;
  use crate::domain::invoice::InvoiceStatus;
  use crate::test_support::{Event, EventLog, InMemoryInvoiceRepository, invoice_service};

  fn input(customer_id: &str, amount: &str, status: &str) -> InvoiceInput {
    let form = FormData::new()
      .with_text("customerId", customer_id)
      .with_text("amount", amount)
      .with_text("status", status);
    InvoiceInput::parse(&form).unwrap()
  }

  #[tokio::test]
  async fn test_create_stores_minor_units_and_today() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));
    let service = invoice_service(repo.clone(), log.clone());

    let before = Utc::now().date_naive();
    let invoice = service
      .create_invoice(input("c1", "157.95", "pending"))
      .await
      .unwrap();
    let after = Utc::now().date_naive();

    assert_eq!(invoice.amount, 15795);
    assert_eq!(invoice.customer_id, "c1");
    assert_eq!(invoice.status, InvoiceStatus::Pending);
    assert!(invoice.date == before || invoice.date == after);
    assert!(!invoice.id.is_empty());
    assert_eq!(repo.invoices().len(), 1);
  }

  #[tokio::test]
  async fn test_create_persists_before_revalidating() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));
    let service = invoice_service(repo, log.clone());

    service
      .create_invoice(input("c1", "10", "paid"))
      .await
      .unwrap();

    let events = log.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Event::Inserted(_)));
    assert_eq!(events[1], Event::Revalidated(INVOICES_PATH.to_string()));
  }

  #[tokio::test]
  async fn test_update_keeps_id_and_date() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));
    let service = invoice_service(repo.clone(), log.clone());

    let created = service
      .create_invoice(input("c1", "10", "pending"))
      .await
      .unwrap();
    let other = service
      .create_invoice(input("c2", "20", "pending"))
      .await
      .unwrap();

    service
      .update_invoice(&created.id, input("c3", "12.5", "paid"))
      .await
      .unwrap();

    let updated = service.get_invoice(&created.id).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.customer_id, "c3");
    assert_eq!(updated.amount, 1250);
    assert_eq!(updated.status, InvoiceStatus::Paid);

    // Other rows are untouched
    assert_eq!(service.get_invoice(&other.id).await.unwrap(), other);
  }

  #[tokio::test]
  async fn test_storage_failure_skips_revalidation() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::failing(log.clone()));
    let service = invoice_service(repo, log.clone());

    assert!(
      service
        .create_invoice(input("c1", "10", "paid"))
        .await
        .is_err()
    );
    assert!(service.delete_invoice("i1").await.is_err());
    assert!(log.events().is_empty());
  }

  #[tokio::test]
  async fn test_delete_revalidates_listing() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));
    let service = invoice_service(repo.clone(), log.clone());

    let created = service
      .create_invoice(input("c1", "10", "paid"))
      .await
      .unwrap();
    service.delete_invoice(&created.id).await.unwrap();

    assert!(repo.invoices().is_empty());
    assert_eq!(
      log.events().last(),
      Some(&Event::Revalidated(INVOICES_PATH.to_string()))
    );
  }

  #[tokio::test]
  async fn test_get_missing_invoice() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));
    let service = invoice_service(repo, log);

    assert!(matches!(
      service.get_invoice("nope").await,
      Err(InvoiceError::InvoiceNotFound(_))
    ));
  }
}
