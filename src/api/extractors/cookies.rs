use std::collections::BTreeMap;
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::services::cookie::parse_cookies;

/// Incoming cookies by name. Never rejects; a request without cookies yields an empty jar.
#[derive(Debug, Clone, Default)]
pub struct CookieJar(pub BTreeMap<String, String>);

impl CookieJar {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<S> FromRequestParts<S> for CookieJar
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CookieJar(parse_cookies(&parts.headers)))
    }
}
