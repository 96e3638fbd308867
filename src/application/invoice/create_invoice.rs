use std::sync::Arc;

use crate::application::outcome::{ActionOutcome, FormState, Redirect};
use crate::domain::form::FormData;
use crate::domain::invoice::{INVOICES_PATH, InvoiceError, InvoiceInput, InvoiceService, Validation};

pub const CREATE_FAILED_MESSAGE: &str = "Missing Fields. Failed to Create Invoice.";

#[derive(Debug, Clone)]
pub struct CreateInvoiceCommand {
  pub form: FormData,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Creates an invoice from a submitted form.
  ///
  /// Invalid input is returned as [`FormState`] without touching storage.
  /// Storage failures propagate.
  pub async fn execute(
    &self,
    command: CreateInvoiceCommand,
  ) -> Result<ActionOutcome<FormState>, InvoiceError> {
    let input = match InvoiceInput::safe_parse(&command.form) {
      Validation::Valid(input) => input,
      Validation::Invalid(errors) => {
        tracing::warn!("Rejected invoice form: {}", errors);
        return Ok(ActionOutcome::Render(FormState::invalid(
          errors,
          CREATE_FAILED_MESSAGE,
        )));
      }
    };

    self.invoice_service.create_invoice(input).await?;

    Ok(ActionOutcome::Redirect(Redirect::to(INVOICES_PATH)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::validation::{
    AMOUNT_MESSAGE, CUSTOMER_ID_FIELD, CUSTOMER_ID_MESSAGE, STATUS_MESSAGE,
  };
  use crate::test_support::{Event, EventLog, InMemoryInvoiceRepository, invoice_service};

  fn use_case(repo: Arc<InMemoryInvoiceRepository>, log: EventLog) -> CreateInvoiceUseCase {
    CreateInvoiceUseCase::new(Arc::new(invoice_service(repo, log)))
  }

  fn form(customer_id: Option<&str>, amount: &str, status: &str) -> CreateInvoiceCommand {
    let mut form = FormData::new();
    if let Some(customer_id) = customer_id {
      form.append_text("customerId", customer_id);
    }
    form.append_text("amount", amount);
    form.append_text("status", status);
    CreateInvoiceCommand { form }
  }

  fn rendered(outcome: ActionOutcome<FormState>) -> FormState {
    match outcome {
      ActionOutcome::Render(state) => state,
      ActionOutcome::Redirect(r) => panic!("unexpected redirect to {}", r.location()),
    }
  }

  #[tokio::test]
  async fn test_valid_form_persists_then_redirects() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));

    let outcome = use_case(repo.clone(), log.clone())
      .execute(form(Some("c1"), "42.10", "paid"))
      .await
      .unwrap();

    assert_eq!(outcome, ActionOutcome::Redirect(Redirect::to(INVOICES_PATH)));
    let stored = repo.invoices();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].amount, 4210);

    let events = log.events();
    assert!(matches!(events[0], Event::Inserted(_)));
    assert_eq!(events[1], Event::Revalidated(INVOICES_PATH.to_string()));
  }

  #[tokio::test]
  async fn test_missing_customer_is_rendered_back() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));

    let state = rendered(
      use_case(repo.clone(), log.clone())
        .execute(form(None, "10", "pending"))
        .await
        .unwrap(),
    );

    assert_eq!(state.message.as_deref(), Some(CREATE_FAILED_MESSAGE));
    let errors = state.errors.unwrap();
    assert_eq!(
      errors.get(CUSTOMER_ID_FIELD),
      Some(&[CUSTOMER_ID_MESSAGE.to_string()][..])
    );
    assert!(repo.invoices().is_empty());
    assert!(log.events().is_empty());
  }

  #[tokio::test]
  async fn test_non_positive_amount_is_rendered_back() {
    for amount in ["0", "-5"] {
      let log = EventLog::default();
      let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));

      let state = rendered(
        use_case(repo.clone(), log.clone())
          .execute(form(Some("c1"), amount, "pending"))
          .await
          .unwrap(),
      );

      assert_eq!(
        state.errors.unwrap().get("amount"),
        Some(&[AMOUNT_MESSAGE.to_string()][..])
      );
      assert!(log.events().is_empty());
    }
  }

  #[tokio::test]
  async fn test_unknown_status_is_rendered_back() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::new(log.clone()));

    let state = rendered(
      use_case(repo, log)
        .execute(form(Some("c1"), "10", "void"))
        .await
        .unwrap(),
    );

    assert_eq!(
      state.errors.unwrap().get("status"),
      Some(&[STATUS_MESSAGE.to_string()][..])
    );
  }

  #[tokio::test]
  async fn test_storage_failure_propagates() {
    let log = EventLog::default();
    let repo = Arc::new(InMemoryInvoiceRepository::failing(log.clone()));

    let result = use_case(repo, log.clone())
      .execute(form(Some("c1"), "10", "paid"))
      .await;

    assert!(matches!(result, Err(InvoiceError::Repository(_))));
    assert!(log.events().is_empty());
  }
}
