use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoice::{Amount, InvoiceError, InvoiceService};

#[derive(Debug, Serialize)]
pub struct InvoiceListItemDto {
  pub id: String,
  pub customer_name: String,
  pub customer_email: String,
  /// Rendered as `$1,234.56`
  pub amount: String,
  pub status: String,
  pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<ListInvoicesResponse, InvoiceError> {
    let invoices = self.invoice_service.list_invoices().await?;

    let invoice_dtos = invoices
      .into_iter()
      .map(|i| InvoiceListItemDto {
        id: i.id,
        customer_name: i.customer_name,
        customer_email: i.customer_email,
        amount: format_currency(i.amount),
        status: i.status.as_str().to_string(),
        date: i.date,
      })
      .collect();

    Ok(ListInvoicesResponse {
      invoices: invoice_dtos,
    })
  }
}

/// Formats minor units as US dollars with thousands separators
fn format_currency(minor: i64) -> String {
  let major = Amount::major_from_minor(minor.abs());
  let fixed = format!("{:.2}", major);
  let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

  let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
  for (i, digit) in whole.chars().enumerate() {
    if i > 0 && (whole.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(digit);
  }

  let sign = if minor < 0 { "-" } else { "" };
  format!("{}${}.{}", sign, grouped, cents)
}
