/*
 * Responsibility
 * - handler が受け取る extractor の公開インターフェース
 */
pub mod auth_ctx;
pub mod cookies;
pub mod validated;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use cookies::CookieJar;
pub use validated::{ValidatedHeaders, ValidatedJson};
