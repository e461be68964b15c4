/*
 * Responsibility
 * - GET /api/jwt/{name}: session token を発行し、署名付き `auth` cookie に入れる
 * - GET /api/profile: `auth` cookie を検証し、name を返す (失敗は 401 Unauthorized)
 * - GET /api/cookie-check: `auth` cookie の有無と正当性を返す (失敗しても 200)
 *
 * Notes
 * - token 自体に exp は無い。期限は cookie の Max-Age のみ
 * - cookie 値は `<jwt>.<hmac>`。先に cookie 署名を外し、次に JWT を検証する
 */
use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use crate::api::dto::session::CookieCheckResponse;
use crate::api::extractors::CookieJar;
use crate::error::AppError;
use crate::services::auth::session::{SessionClaims, sign_session, verify_session};
use crate::services::cookie::SetCookie;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "auth";

/// Unsigned session token and its claims, if the `auth` cookie verifies.
fn session_from_cookie(state: &AppState, jar: &CookieJar) -> Option<(String, SessionClaims)> {
    let token = jar
        .get(SESSION_COOKIE)
        .and_then(|signed| state.cookies.unsign(signed))?;
    let claims = verify_session(state.sessions.as_ref(), Some(token))?;
    Some((token.to_string(), claims))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let token = sign_session(state.sessions.as_ref(), &SessionClaims::new(name))?;

    let policy = &state.session_cookie;
    let set_cookie = SetCookie::new(SESSION_COOKIE, state.cookies.sign(&token))
        .max_age(policy.max_age_seconds)
        .path(policy.path.clone())
        .http_only(true)
        .secure(policy.secure)
        .to_header_value()
        .ok_or(AppError::Internal)?;

    Ok((
        [(header::SET_COOKIE, set_cookie)],
        format!("Sign in as {token}"),
    ))
}

pub async fn profile(State(state): State<AppState>, jar: CookieJar) -> Result<String, AppError> {
    match session_from_cookie(&state, &jar) {
        Some((_, claims)) => Ok(format!("Hello {}", claims.name)),
        None => {
            tracing::warn!(
                cookie_present = jar.get(SESSION_COOKIE).is_some(),
                "session verification failed"
            );
            Err(AppError::Unauthorized)
        }
    }
}

pub async fn cookie_check(State(state): State<AppState>, jar: CookieJar) -> Json<CookieCheckResponse> {
    let session = session_from_cookie(&state, &jar);
    Json(CookieCheckResponse {
        authenticated: session.is_some(),
        token: session.map(|(token, _)| token),
    })
}
