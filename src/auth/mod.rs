//! Password hashing, bearer tokens, signup/signin, and the ownership guard.

pub mod guard;
pub mod password;
pub mod service;
pub mod token;

pub use guard::{authorize, authorize_resource, Access, Owned};
pub use password::{PasswordError, PasswordHasher};
pub use service::{AuthService, AuthToken};
pub use token::{AuthError, Claims, TokenIssuer};
