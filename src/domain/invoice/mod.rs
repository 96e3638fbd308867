pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod validation;
pub mod value_objects;

pub use entities::{Customer, Invoice, InvoiceChanges, InvoiceSummary, NewInvoice};
pub use errors::InvoiceError;
pub use ports::{CustomerRepository, InvoiceRepository, PathRevalidator};
pub use services::{INVOICES_PATH, InvoiceService, InvoiceServiceDependencies};
pub use validation::{FieldErrors, InvoiceInput, Validation};
pub use value_objects::{Amount, CustomerId, InvoiceStatus, ValueObjectError};
