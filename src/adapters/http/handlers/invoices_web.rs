use actix_web::{
  HttpRequest, HttpResponse,
  http::{StatusCode, header},
  web,
};
use std::sync::Arc;

use crate::adapters::http::dtos::InvoiceFormValues;
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::form::read_form;
use crate::adapters::http::handlers::{current_user, redirect_response};
use crate::adapters::http::templates::TemplateEngine;
use crate::application::invoice::{
  CreateInvoiceCommand, CreateInvoiceUseCase, DeleteInvoiceCommand, DeleteInvoiceUseCase,
  GetInvoiceFormCommand, GetInvoiceFormUseCase, ListInvoicesUseCase, UpdateInvoiceCommand,
  UpdateInvoiceUseCase,
};
use crate::application::{ActionOutcome, FormState};
use crate::domain::form::FormData;
use crate::domain::invoice::INVOICES_PATH;
use crate::domain::invoice::validation::{AMOUNT_FIELD, CUSTOMER_ID_FIELD, STATUS_FIELD};
use crate::infrastructure::cache::{PageCache, PageLookup};

fn values_from_form(form: &FormData) -> InvoiceFormValues {
  let text = |name: &str| form.get_text(name).unwrap_or_default().to_string();
  InvoiceFormValues {
    customer_id: text(CUSTOMER_ID_FIELD),
    amount: text(AMOUNT_FIELD),
    status: text(STATUS_FIELD),
  }
}

/// Renders the create form, or the edit form when `invoice_id` is set
async fn render_invoice_form(
  templates: &TemplateEngine,
  get_form_use_case: &GetInvoiceFormUseCase,
  invoice_id: Option<String>,
  values: Option<InvoiceFormValues>,
  state: &FormState,
) -> Result<String, ApiError> {
  let response = get_form_use_case
    .execute(GetInvoiceFormCommand { invoice_id })
    .await?;

  let (title, action, prefill) = match &response.invoice {
    Some(invoice) => (
      "Edit Invoice",
      format!("{}/{}/edit", INVOICES_PATH, invoice.id),
      InvoiceFormValues {
        customer_id: invoice.customer_id.clone(),
        amount: invoice.amount.clone(),
        status: invoice.status.clone(),
      },
    ),
    None => (
      "Create Invoice",
      format!("{}/create", INVOICES_PATH),
      InvoiceFormValues::default(),
    ),
  };

  let mut context = tera::Context::new();
  context.insert("title", title);
  context.insert("action", &action);
  context.insert("customers", &response.customers);
  context.insert("values", &values.unwrap_or(prefill));
  context.insert("errors", &state.errors.clone().unwrap_or_default());
  context.insert("message", &state.message);

  Ok(templates.render("pages/invoice_form.html.tera", &context)?)
}

// GET /dashboard
pub async fn dashboard() -> HttpResponse {
  HttpResponse::Found()
    .insert_header((header::LOCATION, INVOICES_PATH))
    .finish()
}

// GET /dashboard/invoices - served from the page cache when fresh
pub async fn invoices_page(
  templates: web::Data<TemplateEngine>,
  page_cache: web::Data<Arc<dyn PageCache>>,
  list_invoices_use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let generation = match page_cache.lookup(INVOICES_PATH).await {
    PageLookup::Hit(html) => {
      tracing::debug!("Page cache hit for {}", INVOICES_PATH);
      return Ok(HttpResponse::Ok().content_type("text/html").body(html));
    }
    PageLookup::Miss(generation) => Some(generation),
    PageLookup::Unavailable => None,
  };

  let response = list_invoices_use_case.execute().await?;

  let mut context = tera::Context::new();
  context.insert("title", "Invoices");
  context.insert("invoices", &response.invoices);

  let html = templates.render("pages/invoices.html.tera", &context)?;
  if let Some(generation) = generation {
    page_cache.put(INVOICES_PATH, generation, &html).await;
  }

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

// GET /dashboard/invoices/create
pub async fn invoice_create_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
  get_form_use_case: web::Data<Arc<GetInvoiceFormUseCase>>,
) -> Result<HttpResponse, ApiError> {
  current_user(&req)?;

  let html = render_invoice_form(
    &templates,
    &get_form_use_case,
    None,
    None,
    &FormState::default(),
  )
  .await?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

// POST /dashboard/invoices/create
pub async fn create_invoice_submit(
  req: HttpRequest,
  payload: web::Payload,
  templates: web::Data<TemplateEngine>,
  create_use_case: web::Data<Arc<CreateInvoiceUseCase>>,
  get_form_use_case: web::Data<Arc<GetInvoiceFormUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = current_user(&req)?;
  let form = read_form(&req, payload).await?;
  let values = values_from_form(&form);

  match create_use_case
    .execute(CreateInvoiceCommand { form })
    .await?
  {
    ActionOutcome::Redirect(redirect) => {
      tracing::info!("Invoice created by {}", user.email);
      Ok(redirect_response(&req, &redirect))
    }
    ActionOutcome::Render(state) => {
      let html =
        render_invoice_form(&templates, &get_form_use_case, None, Some(values), &state).await?;
      Ok(
        HttpResponse::build(StatusCode::UNPROCESSABLE_ENTITY)
          .content_type("text/html")
          .body(html),
      )
    }
  }
}

// GET /dashboard/invoices/{id}/edit
pub async fn invoice_edit_page(
  req: HttpRequest,
  path: web::Path<String>,
  templates: web::Data<TemplateEngine>,
  get_form_use_case: web::Data<Arc<GetInvoiceFormUseCase>>,
) -> Result<HttpResponse, ApiError> {
  current_user(&req)?;

  let html = render_invoice_form(
    &templates,
    &get_form_use_case,
    Some(path.into_inner()),
    None,
    &FormState::default(),
  )
  .await?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

// POST /dashboard/invoices/{id}/edit - invalid forms surface as 400 JSON
pub async fn update_invoice_submit(
  req: HttpRequest,
  path: web::Path<String>,
  payload: web::Payload,
  update_use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = current_user(&req)?;
  let id = path.into_inner();
  let form = read_form(&req, payload).await?;

  let redirect = update_use_case
    .execute(UpdateInvoiceCommand {
      id: id.clone(),
      form,
    })
    .await?;

  tracing::info!("Invoice {} updated by {}", id, user.email);
  Ok(redirect_response(&req, &redirect))
}

// POST /dashboard/invoices/{id}/delete
pub async fn delete_invoice_submit(
  req: HttpRequest,
  path: web::Path<String>,
  delete_use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = current_user(&req)?;
  let invoice_id = path.into_inner();

  let result = delete_use_case
    .execute(DeleteInvoiceCommand {
      invoice_id: invoice_id.clone(),
    })
    .await;

  let mut response = HttpResponse::Ok();
  if result.deleted {
    tracing::info!("Invoice {} deleted by {}", invoice_id, user.email);
    response.insert_header(("HX-Redirect", INVOICES_PATH));
  }

  Ok(response.json(result.message))
}
