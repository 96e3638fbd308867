use serde::Serialize;

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Per-field messages for rejected forms
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

/// Field values echoed back into an invoice form
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceFormValues {
  pub customer_id: String,
  pub amount: String,
  pub status: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_response_omits_empty_details() {
    let response = ErrorResponse {
      error: "not_found".to_string(),
      message: "Invoice not found".to_string(),
      details: None,
    };

    let json = serde_json::to_string(&response).unwrap();
    assert_eq!(json, r#"{"error":"not_found","message":"Invoice not found"}"#);
  }
}
