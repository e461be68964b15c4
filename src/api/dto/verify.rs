use serde::Serialize;

use crate::api::extractors::AuthCtx;
use crate::repos::user_repo::Role;

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: u32,
    pub username: String,
    pub role: Role,
}

impl From<AuthCtx> for UserSummary {
    fn from(ctx: AuthCtx) -> Self {
        Self {
            id: ctx.user_id,
            username: ctx.username,
            role: ctx.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifySecretResponse {
    pub message: &'static str,
    pub user: UserSummary,
}
