//! Authentication state trait and macro.

use crate::auth::AuthService;

/// Trait for state types that can authenticate bearer tokens.
pub trait HasAuthBackend {
    fn auth(&self) -> &AuthService;
}

/// Macro to implement `HasAuthBackend` for state structs with the standard field.
///
/// The struct must have an `auth: Arc<AuthService>` field.
///
/// # Example
/// ```ignore
/// use crate::impl_has_auth_backend;
///
/// #[derive(Clone)]
/// pub struct MyState {
///     pub auth: Arc<AuthService>,
/// }
///
/// impl_has_auth_backend!(MyState);
/// ```
#[macro_export]
macro_rules! impl_has_auth_backend {
    ($state_type:ty) => {
        impl $crate::auth::HasAuthBackend for $state_type {
            fn auth(&self) -> &$crate::auth::AuthService {
                &self.auth
            }
        }
    };
}
