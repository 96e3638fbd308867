use actix_web::{HttpResponse, http::header, web};
use std::sync::Arc;

use crate::application::auth::{AuthenticateUseCase, GetCurrentUserUseCase, LogoutUserUseCase};
use crate::application::invoice::{
  CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceFormUseCase, ListInvoicesUseCase,
  UpdateInvoiceUseCase,
};
use crate::infrastructure::cache::PageCache;

use super::handlers::{invoices_web, web_auth};
use super::middleware::WebAuthMiddleware;
use super::templates::TemplateEngine;

/// Everything the web UI handlers pull from app data
#[derive(Clone)]
pub struct WebRouteDependencies {
  pub templates: TemplateEngine,
  pub page_cache: Arc<dyn PageCache>,
  pub get_user_use_case: Arc<GetCurrentUserUseCase>,
  pub authenticate_use_case: Arc<AuthenticateUseCase>,
  pub logout_use_case: Arc<LogoutUserUseCase>,
  pub create_invoice_use_case: Arc<CreateInvoiceUseCase>,
  pub update_invoice_use_case: Arc<UpdateInvoiceUseCase>,
  pub delete_invoice_use_case: Arc<DeleteInvoiceUseCase>,
  pub list_invoices_use_case: Arc<ListInvoicesUseCase>,
  pub get_invoice_form_use_case: Arc<GetInvoiceFormUseCase>,
}

/// Configure web UI routes
///
/// # Routes
///
/// - GET /login, POST /login - Credentials sign-in
/// - POST /logout - End the current session
/// - GET /dashboard/invoices - Invoice table
/// - GET|POST /dashboard/invoices/create - Create form and action
/// - GET|POST /dashboard/invoices/{id}/edit - Edit form and action
/// - POST /dashboard/invoices/{id}/delete - Delete action
pub fn configure_web_routes(cfg: &mut web::ServiceConfig, deps: WebRouteDependencies) {
  cfg.app_data(web::Data::new(deps.templates.clone()));

  // Public routes (no authentication required)
  cfg
    .route(
      "/",
      web::get().to(|| async {
        HttpResponse::Found()
          .insert_header((header::LOCATION, "/login"))
          .finish()
      }),
    )
    .service(
      web::resource("/login")
        .app_data(web::Data::new(deps.authenticate_use_case))
        .route(web::get().to(web_auth::login_page))
        .route(web::post().to(web_auth::login_submit)),
    )
    .service(
      web::resource("/logout")
        .app_data(web::Data::new(deps.logout_use_case))
        .route(web::post().to(web_auth::logout)),
    );

  // Protected routes (require authentication)
  cfg.service(
    web::scope("/dashboard")
      .wrap(WebAuthMiddleware::new(deps.get_user_use_case))
      .app_data(web::Data::new(deps.page_cache))
      .app_data(web::Data::new(deps.create_invoice_use_case))
      .app_data(web::Data::new(deps.update_invoice_use_case))
      .app_data(web::Data::new(deps.delete_invoice_use_case))
      .app_data(web::Data::new(deps.list_invoices_use_case))
      .app_data(web::Data::new(deps.get_invoice_form_use_case))
      .route("", web::get().to(invoices_web::dashboard))
      .route("/invoices", web::get().to(invoices_web::invoices_page))
      .route(
        "/invoices/create",
        web::get().to(invoices_web::invoice_create_page),
      )
      .route(
        "/invoices/create",
        web::post().to(invoices_web::create_invoice_submit),
      )
      .route(
        "/invoices/{id}/edit",
        web::get().to(invoices_web::invoice_edit_page),
      )
      .route(
        "/invoices/{id}/edit",
        web::post().to(invoices_web::update_invoice_submit),
      )
      .route(
        "/invoices/{id}/delete",
        web::post().to(invoices_web::delete_invoice_submit),
      ),
  );
}
