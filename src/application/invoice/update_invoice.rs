use std::sync::Arc;

use crate::application::outcome::Redirect;
use crate::domain::form::FormData;
use crate::domain::invoice::{INVOICES_PATH, InvoiceError, InvoiceInput, InvoiceService};

#[derive(Debug, Clone)]
pub struct UpdateInvoiceCommand {
  pub id: String,
  pub form: FormData,
}

pub struct UpdateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Overwrites customer, amount and status of an invoice.
  ///
  /// # Errors
  /// `InvoiceError::Validation` when the form is invalid; nothing is written
  /// in that case.
  pub async fn execute(&self, command: UpdateInvoiceCommand) -> Result<Redirect, InvoiceError> {
    let input = InvoiceInput::parse(&command.form)?;

    self
      .invoice_service
      .update_invoice(&command.id, input)
      .await?;

    Ok(Redirect::to(INVOICES_PATH))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::InvoiceStatus;
  use crate::domain::invoice::validation::{AMOUNT_FIELD, STATUS_FIELD};
  use crate::test_support::{Event, EventLog, InMemoryInvoiceRepository, invoice_service};

  fn form(customer_id: &str, amount: &str, status: &str) -> FormData {
    FormData::new()
      .with_text("customerId", customer_id)
      .with_text("amount", amount)
      .with_text("status", status)
  }

  #[tokio::test]
  async fn test_update_redirects_to_listing() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));
    let service = Arc::new(invoice_service(repo.clone(), log.clone()));
    let created = service
      .create_invoice(InvoiceInput::parse(&form("c1", "10", "pending")).unwrap())
      .await
      .unwrap();

    let redirect = UpdateInvoiceUseCase::new(service.clone())
      .execute(UpdateInvoiceCommand {
        id: created.id.clone(),
        form: form("c2", "99.99", "paid"),
      })
      .await
      .unwrap();

    assert_eq!(redirect.location(), INVOICES_PATH);
    let updated = service.get_invoice(&created.id).await.unwrap();
    assert_eq!(updated.amount, 9999);
    assert_eq!(updated.status, InvoiceStatus::Paid);
    assert_eq!(updated.customer_id, "c2");
    assert_eq!(
      log.events().last(),
      Some(&Event::Revalidated(INVOICES_PATH.to_string()))
    );
  }

  #[tokio::test]
  async fn test_invalid_form_fails_without_writing() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));
    let use_case = UpdateInvoiceUseCase::new(Arc::new(invoice_service(repo, log.clone())));

    let result = use_case
      .execute(UpdateInvoiceCommand {
        id: "i1".to_string(),
        form: form("c1", "abc", "overdue"),
      })
      .await;

    match result {
      Err(InvoiceError::Validation(errors)) => {
        assert!(errors.get(AMOUNT_FIELD).is_some());
        assert!(errors.get(STATUS_FIELD).is_some());
      }
      other => panic!("expected validation error, got {:?}", other),
    }
    assert!(log.events().is_empty());
  }

  #[tokio::test]
  async fn test_missing_invoice_still_redirects() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));
    let use_case = UpdateInvoiceUseCase::new(Arc::new(invoice_service(repo.clone(), log)));

    let redirect = use_case
      .execute(UpdateInvoiceCommand {
        id: "missing".to_string(),
        form: form("c1", "10", "paid"),
      })
      .await
      .unwrap();

    assert_eq!(redirect.location(), INVOICES_PATH);
    assert!(repo.invoices().is_empty());
  }
}
