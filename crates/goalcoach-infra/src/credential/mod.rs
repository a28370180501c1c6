//! Process-wide default credential sourcing.

pub mod env;

pub use env::EnvCredentialSource;
