//! Shared domain types for goalcoach.
//!
//! Request/result shapes for goal-feedback resolution, the model-call types
//! used by the provider chain, configuration, and the error enums shared by
//! every layer.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod context;
pub mod credential;
pub mod error;
pub mod feedback;
pub mod llm;
