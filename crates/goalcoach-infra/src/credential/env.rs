//! Environment variable credential source.
//!
//! The default credential is read once at startup from the variable named
//! by `api_key_env` in config and injected into the resolver. Request
//! handling never reads the environment.

use secrecy::SecretString;

pub struct EnvCredentialSource {
    var_name: String,
}

impl EnvCredentialSource {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    /// Read the credential. Unset, blank, and non-Unicode values are all
    /// treated as absent.
    pub fn read(&self) -> Option<SecretString> {
        match std::env::var(&self.var_name) {
            Ok(val) if !val.trim().is_empty() => {
                tracing::debug!(var = %self.var_name, "default credential loaded from environment");
                Some(SecretString::from(val.trim().to_string()))
            }
            Ok(_) | Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(var = %self.var_name, "credential variable is not valid unicode, ignoring");
                None
            }
        }
    }
}
