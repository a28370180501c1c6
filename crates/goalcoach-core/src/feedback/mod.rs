//! Goal-feedback resolution.
//!
//! - `context`: curriculum context -> prompt bullets
//! - `prompt`: fixed-template instruction prompt
//! - `rules`: deterministic, network-free fallback generator
//! - `resolver`: the orchestrator tying credential, chain, and fallback together

pub mod context;
pub mod prompt;
pub mod resolver;
pub mod rules;
