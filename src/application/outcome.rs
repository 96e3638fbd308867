use serde::Serialize;

use crate::domain::invoice::FieldErrors;

/// Navigation instruction ending an action.
///
/// Returning a `Redirect` is the only way an action reports success; callers
/// never see a success payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Redirect {
  location: String,
}

impl Redirect {
  pub fn to(location: impl Into<String>) -> Self {
    Self {
      location: location.into(),
    }
  }

  pub fn location(&self) -> &str {
    &self.location
  }
}

/// Result of a form action: navigate away, or render the form again
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ActionOutcome<T> {
  Redirect(Redirect),
  Render(T),
}

/// State rendered back into a form after a rejected submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors: Option<FieldErrors>,
  pub message: Option<String>,
}

impl FormState {
  pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
    Self {
      errors: Some(errors),
      message: Some(message.into()),
    }
  }
}

/// Message-only action result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionMessage {
  pub message: String,
}

impl ActionMessage {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}
