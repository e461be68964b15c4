pub mod credentials;
pub mod headers;
pub mod message;
pub mod session;
pub mod verify;
