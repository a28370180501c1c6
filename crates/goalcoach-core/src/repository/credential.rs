//! Per-user credential store trait definition.

use std::future::Future;
use std::pin::Pin;

use goalcoach_types::credential::StoredCredential;
use goalcoach_types::error::RepositoryError;

/// Trait for per-user credential storage (the stored-profile lookup).
pub trait CredentialStore: Send + Sync {
    /// Retrieve the credential stored for `user_id`.
    /// Returns None if the user has none.
    fn get(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<String>, RepositoryError>> + Send;

    /// Store or replace the credential for `user_id`.
    fn set(
        &self,
        user_id: &str,
        credential: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete the credential for `user_id`.
    fn delete(&self, user_id: &str) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// List stored credential metadata (no values).
    fn list(&self) -> impl Future<Output = Result<Vec<StoredCredential>, RepositoryError>> + Send;
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`CredentialStore`] with boxed futures.
pub trait CredentialStoreDyn: Send + Sync {
    fn get_boxed<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>, RepositoryError>>;

    fn set_boxed<'a>(
        &'a self,
        user_id: &'a str,
        credential: &'a str,
    ) -> BoxFuture<'a, Result<(), RepositoryError>>;

    fn delete_boxed<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<(), RepositoryError>>;

    fn list_boxed(&self) -> BoxFuture<'_, Result<Vec<StoredCredential>, RepositoryError>>;
}

impl<T: CredentialStore> CredentialStoreDyn for T {
    fn get_boxed<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>, RepositoryError>> {
        Box::pin(self.get(user_id))
    }

    fn set_boxed<'a>(
        &'a self,
        user_id: &'a str,
        credential: &'a str,
    ) -> BoxFuture<'a, Result<(), RepositoryError>> {
        Box::pin(self.set(user_id, credential))
    }

    fn delete_boxed<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<(), RepositoryError>> {
        Box::pin(self.delete(user_id))
    }

    fn list_boxed(&self) -> BoxFuture<'_, Result<Vec<StoredCredential>, RepositoryError>> {
        Box::pin(self.list())
    }
}

/// Shared, type-erased credential store.
pub type DynCredentialStore = std::sync::Arc<dyn CredentialStoreDyn>;
