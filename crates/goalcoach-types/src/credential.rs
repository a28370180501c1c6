use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Where the credential for a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    /// Supplied in the request body.
    Request,
    /// Stored against the requesting user's profile.
    Stored,
    /// Process-wide default from configuration.
    Default,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Request => write!(f, "request"),
            CredentialSource::Stored => write!(f, "stored"),
            CredentialSource::Default => write!(f, "default"),
        }
    }
}

/// Metadata about a stored per-user credential (the value is never in this struct).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
