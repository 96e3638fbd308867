use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::{Amount, InvoiceStatus};

/// Stored invoice row. `amount` is held in minor units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: String,
  pub customer_id: String,
  pub amount: i64,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

impl Invoice {
  pub fn amount_major(&self) -> Decimal {
    Amount::major_from_minor(self.amount)
  }
}

/// Values for a new invoice row; the id is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
  pub customer_id: String,
  pub amount: i64,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

/// Mutable invoice columns. `id` and `date` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
  pub customer_id: String,
  pub amount: i64,
  pub status: InvoiceStatus,
}

/// Invoice joined with its customer, for the dashboard listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSummary {
  pub id: String,
  pub customer_name: String,
  pub customer_email: String,
  pub amount: i64,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
  pub id: String,
  pub name: String,
  pub email: String,
}
