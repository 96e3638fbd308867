use std::sync::Arc;

use crate::application::outcome::ActionMessage;
use crate::domain::invoice::InvoiceService;

pub const DELETED_MESSAGE: &str = "Deleted Invoice";
pub const DELETE_FAILED_MESSAGE: &str = "Database error: Failed to Delete Error";

#[derive(Debug, Clone)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteInvoiceResult {
  pub deleted: bool,
  pub message: ActionMessage,
}

impl DeleteInvoiceResult {
  fn deleted() -> Self {
    Self {
      deleted: true,
      message: ActionMessage::new(DELETED_MESSAGE),
    }
  }

  fn failed() -> Self {
    Self {
      deleted: false,
      message: ActionMessage::new(DELETE_FAILED_MESSAGE),
    }
  }
}

pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Deletes the invoice and reports whether it succeeded along with the message to show.
  ///
  /// Never fails; storage errors are logged and turned into
  /// [`DELETE_FAILED_MESSAGE`]. Deleting an id that does not exist succeeds.
  pub async fn execute(&self, command: DeleteInvoiceCommand) -> DeleteInvoiceResult {
    match self
      .invoice_service
      .delete_invoice(&command.invoice_id)
      .await
    {
      Ok(()) => DeleteInvoiceResult::deleted(),
      Err(e) => {
        tracing::error!("Failed to delete invoice {}: {}", command.invoice_id, e);
        DeleteInvoiceResult::failed()
      }
    }
  }
}
