pub mod create_invoice;
pub mod delete_invoice;
pub mod get_invoice_form;
pub mod list_invoices;
pub mod update_invoice;

pub use create_invoice::{CREATE_FAILED_MESSAGE, CreateInvoiceCommand, CreateInvoiceUseCase};
pub use delete_invoice::{
  DELETE_FAILED_MESSAGE, DELETED_MESSAGE, DeleteInvoiceCommand, DeleteInvoiceResult,
  DeleteInvoiceUseCase,
};
pub use get_invoice_form::{
  CustomerOptionDto, EditableInvoiceDto, GetInvoiceFormCommand, GetInvoiceFormUseCase,
  InvoiceFormResponse,
};
pub use list_invoices::{InvoiceListItemDto, ListInvoicesResponse, ListInvoicesUseCase};
pub use update_invoice::{UpdateInvoiceCommand, UpdateInvoiceUseCase};
