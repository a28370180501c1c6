//! Model-call abstractions for goalcoach.
//!
//! - `ModelClient`: RPITIT trait for concrete API clients
//! - `BoxModelClient`: object-safe wrapper for dynamic dispatch
//! - `ModelChain`: ordered model attempts with per-call timeouts
//! - `extract`: response-envelope text extraction

pub mod box_client;
pub mod chain;
pub mod client;
pub mod extract;
