use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid customer id: {0}")]
  InvalidCustomerId(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid invoice status: {0}")]
  InvalidStatus(String),
}

// Customer Id - opaque reference, existence is checked by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidCustomerId(
        "Customer id cannot be empty".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Invoice Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Pending,
  Paid,
}

impl InvoiceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Pending => "pending",
      InvoiceStatus::Paid => "paid",
    }
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(InvoiceStatus::Pending),
      "paid" => Ok(InvoiceStatus::Paid),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Positive amount entered in whole currency units.
///
/// The minor-unit value (cents) is computed once at construction and is what
/// gets persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Amount {
  major: Decimal,
  minor: i64,
}

impl Amount {
  const MINOR_PER_MAJOR: i64 = 100;

  pub fn new(major: Decimal) -> Result<Self, ValueObjectError> {
    if major <= Decimal::ZERO {
      return Err(ValueObjectError::InvalidAmount(
        "Amount must be greater than zero".to_string(),
      ));
    }

    let minor = major
      .checked_mul(Decimal::from(Self::MINOR_PER_MAJOR))
      .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
      .and_then(|cents| cents.to_i64())
      .ok_or_else(|| ValueObjectError::InvalidAmount("Amount is too large".to_string()))?;

    if minor == 0 {
      return Err(ValueObjectError::InvalidAmount(
        "Amount is smaller than one cent".to_string(),
      ));
    }

    Ok(Self { major, minor })
  }

  /// Coerces raw form text into an amount; exponent notation is accepted
  pub fn parse(raw: &str) -> Result<Self, ValueObjectError> {
    let text = raw.trim();
    let major = Decimal::from_str(text)
      .or_else(|_| Decimal::from_scientific(text))
      .map_err(|_| ValueObjectError::InvalidAmount(format!("Not a number: {}", raw)))?;
    Self::new(major)
  }

  pub fn major_from_minor(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
  }

  pub fn major_units(&self) -> Decimal {
    self.major
  }

  pub fn minor_units(&self) -> i64 {
    self.minor
  }
}

impl fmt::Display for Amount {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "${:.2}", Self::major_from_minor(self.minor))
  }
}
