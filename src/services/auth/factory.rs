/// Factory: build the session capability from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::session::{JwtSessionCodec, SessionCodec};

pub fn build_session_codec(config: &Config) -> Arc<dyn SessionCodec> {
    Arc::new(JwtSessionCodec::new(&config.jwt_secret))
}
