//! Infrastructure layer for goalcoach.
//!
//! Contains implementations of the port traits defined in `goalcoach-core`:
//! the Gemini `generateContent` client, SQLite per-user credential storage,
//! the `config.toml` loader, and data-directory helpers.

pub mod config;
pub mod credential;
pub mod filesystem;
pub mod llm;
pub mod sqlite;
