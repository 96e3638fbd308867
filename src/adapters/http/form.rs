//! Request body decoding into [`FormData`]

use actix_multipart::Multipart;
use actix_web::{HttpRequest, http::header, web};
use futures_util::{StreamExt, TryStreamExt};

use crate::domain::form::{FileField, FormData, FormValue};

use super::errors::ApiError;

/// Largest form body accepted, in bytes
const MAX_FORM_BYTES: usize = 256 * 1024;

/// Reads a `application/x-www-form-urlencoded` or `multipart/form-data` body
pub async fn read_form(req: &HttpRequest, payload: web::Payload) -> Result<FormData, ApiError> {
  let content_type = req
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default()
    .to_ascii_lowercase();

  if content_type.starts_with("multipart/form-data") {
    read_multipart(Multipart::new(req.headers(), payload)).await
  } else if content_type.starts_with("application/x-www-form-urlencoded") {
    let body = read_body(payload).await?;
    parse_urlencoded(&body)
  } else {
    Err(ApiError::Validation(format!(
      "Unsupported form encoding: {}",
      content_type
    )))
  }
}

async fn read_body(mut payload: web::Payload) -> Result<Vec<u8>, ApiError> {
  let mut body = Vec::new();
  while let Some(chunk) = payload.next().await {
    let chunk = chunk.map_err(|e| ApiError::Validation(format!("Failed to read body: {}", e)))?;
    if body.len() + chunk.len() > MAX_FORM_BYTES {
      return Err(ApiError::Validation("Form body too large".to_string()));
    }
    body.extend_from_slice(&chunk);
  }
  Ok(body)
}

pub fn parse_urlencoded(body: &[u8]) -> Result<FormData, ApiError> {
  let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
    .map_err(|e| ApiError::Validation(format!("Malformed form body: {}", e)))?;
  Ok(pairs.into_iter().collect())
}

/// Parts with a filename become [`FormValue::File`]; their content is
/// counted, not kept.
async fn read_multipart(mut multipart: Multipart) -> Result<FormData, ApiError> {
  let mut form = FormData::new();
  let mut total = 0usize;

  while let Some(mut field) = multipart
    .try_next()
    .await
    .map_err(|e| ApiError::Validation(format!("Failed to read multipart field: {}", e)))?
  {
    let Some(disposition) = field.content_disposition() else {
      continue;
    };
    let Some(name) = disposition.get_name().map(str::to_string) else {
      continue;
    };
    let file_name = disposition.get_filename().map(str::to_string);
    let content_type = field.content_type().map(|m| m.to_string());

    let mut data = Vec::new();
    let mut size = 0usize;
    while let Some(chunk) = field
      .try_next()
      .await
      .map_err(|e| ApiError::Validation(format!("Failed to read multipart field: {}", e)))?
    {
      size += chunk.len();
      if file_name.is_none() {
        total += chunk.len();
        if total > MAX_FORM_BYTES {
          return Err(ApiError::Validation("Form body too large".to_string()));
        }
        data.extend_from_slice(&chunk);
      }
    }

    let value = match file_name {
      Some(file_name) => FormValue::File(FileField {
        file_name: Some(file_name),
        content_type,
        size,
      }),
      None => FormValue::Text(
        String::from_utf8(data)
          .map_err(|_| ApiError::Validation(format!("Field {} is not valid UTF-8", name)))?,
      ),
    };
    form.append(name, value);
  }

  Ok(form)
}
