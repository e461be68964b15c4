use thiserror::Error;

/// Verifier-level failures. All are terminal for the request and map to 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Bearer token required")]
    MissingCredential,
    #[error("Invalid token")]
    InvalidCredential,
}
