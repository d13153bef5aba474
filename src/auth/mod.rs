//! Credential login and bearer token authentication.
//!
//! Login checks an email/password pair against the account store and issues a
//! signed, time-limited JWT. The token is self-contained: there is no
//! server-side session or revocation list, and the role claim it carries is
//! informational only.

mod errors;
mod extractors;
mod service;
mod state;

pub use errors::{ApiAuthError, AuthErrorKind};
pub use extractors::{Auth, AuthenticatedUser, bearer_token};
pub use service::{AuthError, AuthService, LoginSuccess};
pub use state::HasAuthBackend;
