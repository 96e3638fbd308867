pub mod dtos;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod templates;

// Re-export commonly used types
pub use dtos::{ErrorResponse, InvoiceFormValues};
pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{
  CurrentUser, RequestId, RequestIdExt, RequestIdMiddleware, SESSION_COOKIE, WebAuthMiddleware,
};
pub use routes::{WebRouteDependencies, configure_web_routes};
pub use templates::TemplateEngine;
