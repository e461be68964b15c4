pub mod authorize;
pub mod bearer;
pub mod error;
pub mod factory;
pub mod session;

pub use error::AuthError;
pub use factory::build_session_codec;
