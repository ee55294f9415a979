//! Authentication middleware for API callers

pub mod user_auth;

pub use user_auth::UserIdentity;
