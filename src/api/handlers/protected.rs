/*
 * Responsibility
 * - POST /api/protected_route: admin role の gate
 *
 * Notes
 * - username の lookup だけで role を判定する。password も token も検証しない。
 *   認証としては不十分だが、この endpoint の既存の挙動として残している。
 */
use axum::{Json, extract::State};

use crate::api::dto::{credentials::CredentialsRequest, message::MessageResponse};
use crate::api::extractors::ValidatedJson;
use crate::repos::user_repo::Role;
use crate::services::auth::authorize::authorize_role;
use crate::state::AppState;

pub async fn protected_route(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Json<MessageResponse> {
    let user = state.users.find_by_username(&req.username);
    let decision = authorize_role(user.as_ref(), Role::Admin);

    if !decision.is_granted() {
        tracing::info!(username = %req.username, "protected route denied");
    }

    Json(MessageResponse {
        message: decision.message(),
    })
}
