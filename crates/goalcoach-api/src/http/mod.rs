//! HTTP layer for goalcoach.
//!
//! Axum router exposing the goal-feedback endpoint to the dashboard, with
//! CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
