pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Session, User};
pub use errors::{AuthError, HashError, RepositoryError};
pub use ports::{PasswordHasher, SessionRepository, SignInProvider, SignedIn, UserRepository};
pub use services::{AuthService, AuthServiceConfig, CREDENTIALS_PROVIDER};
pub use value_objects::{Email, Password, PasswordHash, SessionToken, TokenHash};
