//! Authentication use cases
//!
//! Credential sign-in through a pluggable provider, plus the session lookups
//! the web layer needs around it.

mod authenticate;
mod get_current_user;
mod logout_user;

pub use authenticate::{AuthenticateOutcome, AuthenticateUseCase, CREDENTIAL_SIGNIN};
pub use get_current_user::{GetCurrentUserResponse, GetCurrentUserUseCase};
pub use logout_user::LogoutUserUseCase;
