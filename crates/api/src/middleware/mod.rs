//! HTTP middleware and request extractors.
//!
//! Route-level guards are extractors rather than layers: a handler that
//! takes [`RequireAuth`] is authenticated, one that takes [`RequireAdmin`]
//! is admin-only, and one that takes neither is public. `TraceLayer` and
//! CORS are applied router-wide in `main`.

pub mod auth;

pub use auth::{AdminRejection, AuthRejection, RequireAdmin, RequireAuth};
