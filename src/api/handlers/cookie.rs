/*
 * Responsibility
 * - GET /api/cookie: 受け取った cookie jar を返し、`name` cookie を set する
 * - この endpoint の cookie 属性 (HttpOnly, Secure なし) は session cookie とは別の契約
 */
use axum::{Json, http::header, response::IntoResponse};

use crate::api::extractors::CookieJar;
use crate::error::AppError;
use crate::services::cookie::SetCookie;

const DEMO_COOKIE: &str = "name";
const DEMO_COOKIE_VALUE: &str = "elysia";

pub async fn echo_cookies(CookieJar(jar): CookieJar) -> Result<impl IntoResponse, AppError> {
    let set_cookie = SetCookie::new(DEMO_COOKIE, DEMO_COOKIE_VALUE)
        .path("/")
        .http_only(true)
        .to_header_value()
        .ok_or(AppError::Internal)?;

    Ok(([(header::SET_COOKIE, set_cookie)], Json(jar)))
}
