//! Middleware for caller resolution.

mod auth;

pub use auth::caller_middleware;
