pub mod auth;
pub mod form;
pub mod invoice;

pub use form::{FileField, FormData, FormValue};
