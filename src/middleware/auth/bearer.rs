//! Bearer secret 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <secret>` を受け取り、UserRepo の secret と照合する
//! - 失敗時は handler を実行せず 401 `{"error": ...}` を返す
//! - 認可 (role) は handler/service 側で行う

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::bearer::{extract_bearer, verify_bearer};
use crate::state::AppState;

/// Guard a single route with bearer verification.
///
/// ```ignore
/// let route = middleware::auth::bearer::guard(get(handler), state.clone());
/// ```
pub fn guard(route: MethodRouter<AppState>, state: AppState) -> MethodRouter<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    route.route_layer(middleware::from_fn_with_state(state, bearer_middleware))
}

async fn bearer_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(req.headers());

    let user = match verify_bearer(state.users.as_ref(), token) {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!(error = %err, "bearer verification failed");
            return Err(err.into());
        }
    };

    tracing::debug!(user_id = user.id, role = %user.role, "bearer verified");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::from(user));

    Ok(next.run(req).await)
}
