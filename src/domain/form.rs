use serde::Serialize;

/// Metadata for an uploaded file field. The contents are not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileField {
  pub file_name: Option<String>,
  pub content_type: Option<String>,
  pub size: usize,
}

/// A single submitted form value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FormValue {
  Text(String),
  File(FileField),
}

impl FormValue {
  pub fn as_text(&self) -> Option<&str> {
    match self {
      FormValue::Text(value) => Some(value),
      FormValue::File(_) => None,
    }
  }
}

/// Submitted form fields in the order they were received.
///
/// A field may appear more than once; lookups return the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
  entries: Vec<(String, FormValue)>,
}

impl FormData {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn append(&mut self, name: impl Into<String>, value: FormValue) {
    self.entries.push((name.into(), value));
  }

  pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.append(name, FormValue::Text(value.into()));
  }

  /// Builder-style variant of `append_text`
  pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.append_text(name, value);
    self
  }

  pub fn get(&self, name: &str) -> Option<&FormValue> {
    self
      .entries
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value)
  }

  pub fn get_text(&self, name: &str) -> Option<&str> {
    self.get(name).and_then(FormValue::as_text)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
    self
      .entries
      .iter()
      .map(|(key, value)| (key.as_str(), value))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut form = FormData::new();
    for (name, value) in iter {
      form.append_text(name, value);
    }
    form
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_returns_first_value() {
    let form = FormData::from_iter([("status", "paid"), ("status", "pending")]);
    assert_eq!(form.get_text("status"), Some("paid"));
    assert_eq!(form.len(), 2);
  }

  #[test]
  fn test_file_value_is_not_text() {
    let mut form = FormData::new();
    form.append(
      "customerId",
      FormValue::File(FileField {
        file_name: Some("avatar.png".to_string()),
        content_type: Some("image/png".to_string()),
        size: 42,
      }),
    );

    assert!(form.get("customerId").is_some());
    assert_eq!(form.get_text("customerId"), None);
    assert_eq!(form.get_text("missing"), None);
  }
}
