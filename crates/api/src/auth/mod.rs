//! Access-token handling.
//!
//! Tokens are issued by the identity service with a shared HS256 secret;
//! this server only validates them.

pub mod jwt;
