//! Credential resolution.
//!
//! CredentialResolver picks the credential for one request in precedence
//! order: explicit request credential > per-user stored credential >
//! configured default > none. The default is injected at construction time;
//! nothing here reads process state.

use secrecy::{ExposeSecret, SecretString};

use goalcoach_types::credential::CredentialSource;

use crate::repository::credential::DynCredentialStore;

/// A credential chosen for a request, with where it came from.
pub struct ResolvedCredential {
    pub secret: SecretString,
    pub source: CredentialSource,
}

impl std::fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("secret", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolves the credential for each feedback request.
pub struct CredentialResolver {
    default: Option<SecretString>,
    store: Option<DynCredentialStore>,
}

impl CredentialResolver {
    /// `default` is the process-wide credential (already read from
    /// configuration); `store` is the optional per-user lookup.
    pub fn new(default: Option<SecretString>, store: Option<DynCredentialStore>) -> Self {
        Self { default, store }
    }

    /// A resolver with no sources: every request falls back.
    pub fn empty() -> Self {
        Self::new(None, None)
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Resolve a credential for a request.
    ///
    /// Blank values are ignored at every level. A failing store lookup is
    /// logged and treated as "not found" so the request can still use the
    /// default or fall back.
    pub async fn resolve(
        &self,
        explicit: Option<&str>,
        user_id: Option<&str>,
    ) -> Option<ResolvedCredential> {
        if let Some(key) = explicit.filter(|k| !k.trim().is_empty()) {
            return Some(ResolvedCredential {
                secret: SecretString::from(key.trim().to_string()),
                source: CredentialSource::Request,
            });
        }

        if let (Some(store), Some(user_id)) = (&self.store, user_id) {
            match store.get_boxed(user_id).await {
                Ok(Some(value)) if !value.trim().is_empty() => {
                    return Some(ResolvedCredential {
                        secret: SecretString::from(value.trim().to_string()),
                        source: CredentialSource::Stored,
                    });
                }
                Ok(_) => {
                    tracing::debug!(user_id, "no stored credential for user");
                }
                Err(err) => {
                    tracing::warn!(user_id, error = %err, "stored credential lookup failed");
                }
            }
        }

        self.default.as_ref().map(|secret| ResolvedCredential {
            secret: SecretString::from(secret.expose_secret().to_string()),
            source: CredentialSource::Default,
        })
    }

    /// Mask a credential, showing only the last 4 characters.
    ///
    /// - "AIzaSyabcdefghijklmnop" -> "****mnop"
    /// - "abc" -> "****" (too short to show any chars)
    pub fn mask(value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() <= 4 {
            "****".to_string()
        } else {
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("****{tail}")
        }
    }
}
