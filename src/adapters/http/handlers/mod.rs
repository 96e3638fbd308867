pub mod invoices_web;
pub mod web_auth;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, http::header};

use crate::adapters::http::errors::{ApiError, AuthErrorKind};
use crate::adapters::http::middleware::CurrentUser;
use crate::application::Redirect;

/// Extract the signed-in user set by `WebAuthMiddleware`
pub fn current_user(req: &HttpRequest) -> Result<CurrentUser, ApiError> {
  req
    .extensions()
    .get::<CurrentUser>()
    .cloned()
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidSession))
}

/// htmx requests get `HX-Redirect`, plain form posts a 303
pub fn redirect_response(req: &HttpRequest, redirect: &Redirect) -> HttpResponse {
  if req.headers().contains_key("HX-Request") {
    HttpResponse::Ok()
      .insert_header(("HX-Redirect", redirect.location()))
      .finish()
  } else {
    HttpResponse::SeeOther()
      .insert_header((header::LOCATION, redirect.location()))
      .finish()
  }
}
