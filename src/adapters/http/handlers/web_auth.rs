use actix_web::{
  HttpRequest, HttpResponse,
  cookie::{Cookie, SameSite, time::Duration as CookieDuration},
  http::header,
  web,
};
use chrono::Utc;
use std::sync::Arc;

use crate::adapters::http::errors::ApiError;
use crate::adapters::http::form::read_form;
use crate::adapters::http::middleware::SESSION_COOKIE;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::{AuthenticateOutcome, AuthenticateUseCase, LogoutUserUseCase};

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";

fn render_login(
  templates: &TemplateEngine,
  email: Option<&str>,
  error: Option<&str>,
) -> Result<String, ApiError> {
  let mut context = tera::Context::new();
  context.insert("title", "Login");
  context.insert("email", email.unwrap_or_default());
  context.insert("error", &error);
  Ok(templates.render("pages/login.html.tera", &context)?)
}

// GET /login
pub async fn login_page(templates: web::Data<TemplateEngine>) -> Result<HttpResponse, ApiError> {
  let html = render_login(&templates, None, None)?;
  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

// POST /login
pub async fn login_submit(
  req: HttpRequest,
  payload: web::Payload,
  use_case: web::Data<Arc<AuthenticateUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let form = read_form(&req, payload).await?;

  match use_case.execute(&form).await? {
    AuthenticateOutcome::SignedIn { session, redirect } => {
      let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
      let cookie = Cookie::build(SESSION_COOKIE, session.session_token.into_inner())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age))
        .finish();

      Ok(
        HttpResponse::SeeOther()
          .cookie(cookie)
          .insert_header((header::LOCATION, redirect.location()))
          .finish(),
      )
    }
    AuthenticateOutcome::Rejected(signal) => {
      tracing::debug!("Login rejected: {}", signal);
      let html = render_login(
        &templates,
        form.get_text("email"),
        Some(INVALID_CREDENTIALS_MESSAGE),
      )?;
      Ok(HttpResponse::Ok().content_type("text/html").body(html))
    }
  }
}

// POST /logout
pub async fn logout(
  req: HttpRequest,
  use_case: web::Data<Arc<LogoutUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  if let Some(cookie) = req.cookie(SESSION_COOKIE) {
    if let Err(e) = use_case.execute(cookie.value().to_string()).await {
      tracing::debug!("Logout without a live session: {}", e);
    }
  }

  let cookie = Cookie::build(SESSION_COOKIE, "")
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(CookieDuration::seconds(0))
    .finish();

  Ok(
    HttpResponse::SeeOther()
      .cookie(cookie)
      .insert_header((header::LOCATION, "/login"))
      .finish(),
  )
}
