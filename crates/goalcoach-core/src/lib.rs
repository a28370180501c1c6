//! Feedback resolution logic and port trait definitions for goalcoach.
//!
//! This crate defines the "ports" (`ModelClient`, `CredentialStore`) that the
//! infrastructure layer implements, plus all the pure logic of the flow. It
//! depends only on `goalcoach-types` -- never on `goalcoach-infra` or any
//! HTTP/database crate.

pub mod credential;
pub mod feedback;
pub mod llm;
pub mod repository;
