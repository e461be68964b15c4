use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CookieCheckResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
