//! Invoice form validation.
//!
//! Turns raw submitted fields into a typed [`InvoiceInput`] or a field error
//! report. `safe_parse` reports problems as data for forms that show errors
//! inline; `parse` fails with [`InvoiceError::Validation`] for callers that
//! treat bad input as a failed request.

use serde::Serialize;
use serde::ser::SerializeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::form::FormData;

use super::errors::InvoiceError;
use super::value_objects::{Amount, CustomerId, InvoiceStatus};

pub const CUSTOMER_ID_FIELD: &str = "customerId";
pub const AMOUNT_FIELD: &str = "amount";
pub const STATUS_FIELD: &str = "status";

pub const CUSTOMER_ID_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status.";

/// Validation messages keyed by form field, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
  fields: Vec<(&'static str, Vec<String>)>,
}

impl FieldErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
    let message = message.into();
    match self.fields.iter_mut().find(|(name, _)| *name == field) {
      Some((_, messages)) => messages.push(message),
      None => self.fields.push((field, vec![message])),
    }
  }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self
      .fields
      .iter()
      .find(|(name, _)| *name == field)
      .map(|(_, messages)| messages.as_slice())
  }

  pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.fields.iter().map(|(name, _)| *name)
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }
}

impl Serialize for FieldErrors {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.fields.len()))?;
    for (field, messages) in &self.fields {
      map.serialize_entry(field, messages)?;
    }
    map.end()
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let rendered: Vec<String> = self
      .fields
      .iter()
      .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
      .collect();
    f.write_str(&rendered.join("; "))
  }
}

/// Outcome of non-failing validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
  Valid(InvoiceInput),
  Invalid(FieldErrors),
}

/// User-supplied invoice fields. `id` and `date` are never taken from input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceInput {
  pub customer_id: CustomerId,
  pub amount: Amount,
  pub status: InvoiceStatus,
}

impl InvoiceInput {
  /// Validates every field and collects all failures
  pub fn safe_parse(form: &FormData) -> Validation {
    let mut errors = FieldErrors::new();

    let customer_id = form
      .get_text(CUSTOMER_ID_FIELD)
      .and_then(|raw| CustomerId::new(raw).ok());
    if customer_id.is_none() {
      errors.add(CUSTOMER_ID_FIELD, CUSTOMER_ID_MESSAGE);
    }

    let amount = form
      .get_text(AMOUNT_FIELD)
      .and_then(|raw| Amount::parse(raw).ok());
    if amount.is_none() {
      errors.add(AMOUNT_FIELD, AMOUNT_MESSAGE);
    }

    let status = form
      .get_text(STATUS_FIELD)
      .and_then(|raw| InvoiceStatus::from_str(raw).ok());
    if status.is_none() {
      errors.add(STATUS_FIELD, STATUS_MESSAGE);
    }

    match (customer_id, amount, status) {
      (Some(customer_id), Some(amount), Some(status)) => Validation::Valid(InvoiceInput {
        customer_id,
        amount,
        status,
      }),
      _ => Validation::Invalid(errors),
    }
  }

  /// Validates the form, failing on the first invalid submission
  pub fn parse(form: &FormData) -> Result<Self, InvoiceError> {
    match Self::safe_parse(form) {
      Validation::Valid(input) => Ok(input),
      Validation::Invalid(errors) => Err(InvoiceError::Validation(errors)),
    }
  }
}
