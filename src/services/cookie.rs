/*
 * Responsibility
 * - Cookie ヘッダの parse (name → value の jar)
 * - Set-Cookie の組み立て (value, Max-Age/Expires, Path, HttpOnly, Secure)
 * - 署名付き cookie 値の sign / unsign (HMAC-SHA256, static secret)
 */
use std::collections::BTreeMap;

use axum::http::{HeaderMap, HeaderValue, header};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac, digest::InvalidLength};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Request cookies, keyed by name. Later duplicates do not override earlier ones.
pub fn parse_cookies(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut jar = BTreeMap::new();

    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else {
            continue;
        };

        for pair in raw.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim().trim_matches('"');
            jar.entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    jar
}

/// An outgoing cookie with the attributes this server uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub max_age_seconds: Option<u64>,
    pub path: Option<String>,
    pub http_only: bool,
    pub secure: bool,
}

impl SetCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age_seconds: None,
            path: None,
            http_only: false,
            secure: false,
        }
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age_seconds = Some(seconds);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn http_only(mut self, on: bool) -> Self {
        self.http_only = on;
        self
    }

    pub fn secure(mut self, on: bool) -> Self {
        self.secure = on;
        self
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);

        if let Some(max_age) = self.max_age_seconds {
            out.push_str(&format!("; Max-Age={max_age}"));
            // Expires for clients that ignore Max-Age.
            let expires = i64::try_from(max_age)
                .ok()
                .and_then(Duration::try_seconds)
                .and_then(|ttl| Utc::now().checked_add_signed(ttl));
            if let Some(expires) = expires {
                out.push_str(&format!(
                    "; Expires={}",
                    expires.format("%a, %d %b %Y %H:%M:%S GMT")
                ));
            }
        }
        if let Some(path) = &self.path {
            out.push_str(&format!("; Path={path}"));
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        if self.secure {
            out.push_str("; Secure");
        }

        out
    }

    pub fn to_header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.render()).ok()
    }
}

/// Signs cookie values as `<value>.<base64url(hmac)>`.
#[derive(Clone)]
pub struct CookieSigner {
    mac: HmacSha256,
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("CookieSigner").finish_non_exhaustive()
    }
}

impl CookieSigner {
    pub fn new(secret: &str) -> Result<Self, InvalidLength> {
        Ok(Self {
            mac: HmacSha256::new_from_slice(secret.as_bytes())?,
        })
    }

    pub fn sign(&self, value: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(value.as_bytes());
        let sig = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{value}.{sig}")
    }

    /// Returns the original value when the signature matches, `None` otherwise.
    pub fn unsign<'a>(&self, signed: &'a str) -> Option<&'a str> {
        let (value, sig) = signed.rsplit_once('.')?;
        let sig = URL_SAFE_NO_PAD.decode(sig).ok()?;

        let mut mac = self.mac.clone();
        mac.update(value.as_bytes());
        mac.verify_slice(&sig).ok()?;

        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("name=elysia; auth=abc.def;  theme=\"dark\"; broken"),
        );
        headers.append(header::COOKIE, HeaderValue::from_static("name=other; extra=1"));

        let jar = parse_cookies(&headers);
        assert_eq!(jar.get("name").map(String::as_str), Some("elysia"));
        assert_eq!(jar.get("auth").map(String::as_str), Some("abc.def"));
        assert_eq!(jar.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(jar.get("extra").map(String::as_str), Some("1"));
        assert!(!jar.contains_key("broken"));
    }

    #[test]
    fn empty_headers_give_empty_jar() {
        assert!(parse_cookies(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn renders_attributes() {
        let rendered = SetCookie::new("auth", "tok")
            .max_age(3600)
            .path("/")
            .http_only(true)
            .secure(true)
            .render();

        assert!(rendered.starts_with("auth=tok; Max-Age=3600; Expires="));
        assert!(rendered.ends_with("GMT; Path=/; HttpOnly; Secure"));

        let bare = SetCookie::new("name", "elysia").render();
        assert_eq!(bare, "name=elysia");
    }

    #[test]
    fn sign_unsign_and_tamper() {
        let signer = CookieSigner::new("cookie-secret").unwrap();
        let signed = signer.sign("a.b.c");
        assert_eq!(signer.unsign(&signed), Some("a.b.c"));

        let mut tampered = signed.clone().into_bytes();
        tampered[0] = b'x';
        let tampered = String::from_utf8(tampered).unwrap();
        assert_eq!(signer.unsign(&tampered), None);

        assert_eq!(CookieSigner::new("other").unwrap().unsign(&signed), None);
        assert_eq!(signer.unsign("no-signature"), None);
        assert_eq!(signer.unsign("value.!!!"), None);
    }
}
