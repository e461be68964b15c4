/*
 * Responsibility
 * - GET /api/public: 認証なしの固定メッセージ
 * - GET|POST /api/private: body schema を通った credentials をそのまま返す
 *   (認証はしない。schema validation のデモ)
 */
use axum::Json;

use crate::api::dto::{credentials::CredentialsRequest, message::MessageResponse};
use crate::api::extractors::ValidatedJson;

pub async fn public_info() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "This is public information",
    })
}

pub async fn private_echo(
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Json<CredentialsRequest> {
    Json(req)
}
