/*
 * Responsibility
 * - GET /api/verify-secret
 * - bearer middleware が入れた AuthCtx を受け、認証済み user を返す
 */
use axum::Json;

use crate::api::dto::verify::VerifySecretResponse;
use crate::api::extractors::AuthCtxExtractor;

pub async fn verify_secret(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<VerifySecretResponse> {
    Json(VerifySecretResponse {
        message: "Secret verified",
        user: ctx.into(),
    })
}
