//! BoxModelClient -- object-safe dynamic dispatch wrapper for ModelClient.
//!
//! 1. Define an object-safe `ModelClientDyn` trait with boxed futures
//! 2. Blanket-impl `ModelClientDyn` for all `T: ModelClient`
//! 3. `BoxModelClient` wraps `Box<dyn ModelClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use secrecy::SecretString;

use goalcoach_types::llm::{GenerationRequest, LlmError};

use super::client::ModelClient;

/// Object-safe version of [`ModelClient`] with boxed futures.
pub trait ModelClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        model: &'a str,
        request: &'a GenerationRequest,
        credential: &'a SecretString,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;
}

impl<T: ModelClient> ModelClientDyn for T {
    fn name(&self) -> &str {
        ModelClient::name(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        model: &'a str,
        request: &'a GenerationRequest,
        credential: &'a SecretString,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(model, request, credential))
    }
}

/// Type-erased model client for runtime client selection.
///
/// Since `ModelClient` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxModelClient` provides equivalent methods that delegate to
/// the inner `ModelClientDyn` trait object.
pub struct BoxModelClient {
    inner: Box<dyn ModelClientDyn + Send + Sync>,
}

impl BoxModelClient {
    /// Wrap a concrete `ModelClient` in a type-erased box.
    pub fn new<T: ModelClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
        credential: &SecretString,
    ) -> Result<String, LlmError> {
        self.inner
            .generate_boxed(model, request, credential)
            .await
    }
}
