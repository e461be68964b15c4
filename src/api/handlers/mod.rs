pub mod cookie;
pub mod docs;
pub mod headers;
pub mod protected;
pub mod public;
pub mod root;
pub mod secret;
pub mod session;
