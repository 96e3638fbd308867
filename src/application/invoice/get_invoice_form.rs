use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoice::{Customer, InvoiceError, InvoiceService};

#[derive(Debug, Clone, Default)]
pub struct GetInvoiceFormCommand {
  /// `None` for the create form
  pub invoice_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomerOptionDto {
  pub id: String,
  pub name: String,
}

#[derive(Debug, Serialize)]
pub struct EditableInvoiceDto {
  pub id: String,
  pub customer_id: String,
  /// Major units, as typed into the amount input
  pub amount: String,
  pub status: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceFormResponse {
  pub customers: Vec<CustomerOptionDto>,
  pub invoice: Option<EditableInvoiceDto>,
}

/// Loads what the create and edit forms need to render
pub struct GetInvoiceFormUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceFormUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceFormCommand,
  ) -> Result<InvoiceFormResponse, InvoiceError> {
    let invoice = match command.invoice_id {
      Some(id) => {
        let invoice = self.invoice_service.get_invoice(&id).await?;
        Some(EditableInvoiceDto {
          amount: invoice.amount_major().to_string(),
          status: invoice.status.as_str().to_string(),
          id: invoice.id,
          customer_id: invoice.customer_id,
        })
      }
      None => None,
    };

    let customers = self
      .invoice_service
      .list_customers()
      .await?
      .into_iter()
      .map(|Customer { id, name, .. }| CustomerOptionDto { id, name })
      .collect();

    Ok(InvoiceFormResponse { customers, invoice })
  }
}
