//! Request handlers, one module per resource.
//!
//! Extractors are taken as `Result<_, Rejection>` so malformed bodies and
//! paths come back as `ApiError` (400 with the JSON error body) instead of
//! axum's plain-text rejections.

pub mod experiments;
pub mod health;
pub mod problems;
pub mod research;
