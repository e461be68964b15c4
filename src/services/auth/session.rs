use std::collections::HashSet;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity seed carried by a session token.
///
/// There is deliberately no `exp`/`iat`: the token never expires on its own,
/// expiry is enforced by the cookie `Max-Age`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub name: String,
}

impl SessionClaims {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to sign session token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// Signer/verifier capability for session tokens.
///
/// `verify` never fails loudly: malformed, tampered or foreign tokens all
/// come back as `None`.
pub trait SessionCodec: Send + Sync {
    fn sign(&self, claims: &SessionClaims) -> Result<String, SessionError>;
    fn verify(&self, token: &str) -> Option<SessionClaims>;
}

/// HS256 session tokens keyed by a static shared secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtSessionCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtSessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionCodec")
            .field("alg", &self.header.alg)
            .finish()
    }
}

impl JwtSessionCodec {
    pub fn new(secret: &str) -> Self {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no registered claims at all.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            header,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl SessionCodec for JwtSessionCodec {
    fn sign(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        Ok(jsonwebtoken::encode(
            &self.header,
            claims,
            &self.encoding_key,
        )?)
    }

    fn verify(&self, token: &str) -> Option<SessionClaims> {
        if token.is_empty() {
            return None;
        }

        match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(err) => {
                tracing::debug!(error = %err, "session token rejected");
                None
            }
        }
    }
}

/// Sign an identity seed with the given codec.
pub fn sign_session(codec: &dyn SessionCodec, seed: &SessionClaims) -> Result<String, SessionError> {
    codec.sign(seed)
}

/// Verify a previously signed value. An absent value verifies to `None`.
pub fn verify_session(codec: &dyn SessionCodec, signed: Option<&str>) -> Option<SessionClaims> {
    signed.and_then(|token| codec.verify(token))
}
