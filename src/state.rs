/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - users: UserRepo, sessions: SessionCodec, cookies: CookieSigner, session cookie policy
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - 全て read-only (request 間で共有される mutable state は無い)
 */
use std::sync::Arc;

use crate::config::SessionCookiePolicy;
use crate::repos::user_repo::UserRepo;
use crate::services::{auth::session::SessionCodec, cookie::CookieSigner};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub sessions: Arc<dyn SessionCodec>,
    pub cookies: Arc<CookieSigner>,
    pub session_cookie: Arc<SessionCookiePolicy>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepo>,
        sessions: Arc<dyn SessionCodec>,
        cookies: Arc<CookieSigner>,
        session_cookie: SessionCookiePolicy,
    ) -> Self {
        Self {
            users,
            sessions,
            cookies,
            session_cookie: Arc::new(session_cookie),
        }
    }
}

#[cfg(test)]
impl AppState {
    pub fn for_tests() -> Self {
        use crate::config::Config;
        use crate::repos::user_repo::InMemoryUserRepo;
        use crate::services::auth::build_session_codec;

        let config = Config::for_tests();
        Self::new(
            Arc::new(InMemoryUserRepo::seeded()),
            build_session_codec(&config),
            Arc::new(CookieSigner::new(&config.cookie_secret).unwrap()),
            config.session_cookie,
        )
    }
}
