/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 */

use crate::repos::user_repo::{Role, User};

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - password / secret は持たない (handler に credential を渡さない)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: u32,
    pub username: String,
    pub role: Role,
}

impl From<User> for AuthCtx {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}
