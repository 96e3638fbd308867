//! Application layer
//!
//! Use cases behind the dashboard forms. Each one validates submitted input,
//! calls the domain services and reports where the browser should go next.

pub mod auth;
pub mod invoice;
pub mod outcome;

pub use outcome::{ActionMessage, ActionOutcome, FormState, Redirect};
