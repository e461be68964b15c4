//! Bearer secret extraction and verification.
//!
//! The bearer value is compared only against `User.secret`; it is never stored.

use axum::http::{HeaderMap, header};

use crate::repos::user_repo::{User, UserRepo};
use crate::services::auth::error::AuthError;

const BEARER_PREFIX: &[u8] = b"Bearer ";

/// Returns the raw bytes after the literal `Bearer ` prefix of the
/// `authorization` header.
///
/// No trimming and no case-insensitive matching: `bearer abc` and
/// `Basic abc` both yield `None`. The remainder is not required to be UTF-8;
/// `verify_bearer` rejects such a value as an invalid credential.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&[u8]> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.as_bytes().strip_prefix(BEARER_PREFIX))
}

pub fn verify_bearer(users: &dyn UserRepo, token: Option<&[u8]>) -> Result<User, AuthError> {
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AuthError::MissingCredential),
    };

    // Secrets are strings, so a non UTF-8 token can never match one.
    let token = std::str::from_utf8(token).map_err(|_| AuthError::InvalidCredential)?;

    users
        .find_by_secret(token)
        .ok_or(AuthError::InvalidCredential)
}
