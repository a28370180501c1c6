//! Application state wiring the resolver to its concrete adapters.
//!
//! AppState is shared by CLI commands and HTTP handlers. The resolver is
//! stateless across requests, so it sits behind an `Arc` and is never locked.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use goalcoach_core::credential::CredentialResolver;
use goalcoach_core::feedback::resolver::{FeedbackResolver, GenerationSettings, ResolverOptions};
use goalcoach_core::repository::credential::DynCredentialStore;
use goalcoach_infra::config::load_config;
use goalcoach_infra::credential::EnvCredentialSource;
use goalcoach_infra::filesystem::{config_path, database_url, resolve_data_dir};
use goalcoach_infra::llm::build_model_chain;
use goalcoach_infra::sqlite::credential::SqliteCredentialRepository;
use goalcoach_infra::sqlite::pool::DatabasePool;
use goalcoach_types::config::FeedbackConfig;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<FeedbackResolver>,
    pub credential_store: DynCredentialStore,
    pub config: Arc<FeedbackConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load config, open the database, read the default credential and
    /// build the model chain.
    pub async fn init(config_override: Option<&Path>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config_file = match config_override {
            Some(path) => path.to_path_buf(),
            None => config_path(&data_dir),
        };
        let config = load_config(&config_file).await;

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;
        let credential_store: DynCredentialStore =
            Arc::new(SqliteCredentialRepository::new(db_pool));

        let env_source = EnvCredentialSource::new(&config.api_key_env);
        let default_credential = env_source.read();
        if default_credential.is_none() {
            tracing::info!(
                var = env_source.var_name(),
                "no default credential set, requests without a key use rule-based feedback"
            );
        }

        let chain = build_model_chain(&config)?;
        let resolver = FeedbackResolver::new(
            chain,
            CredentialResolver::new(default_credential, Some(Arc::clone(&credential_store))),
            GenerationSettings {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
            ResolverOptions {
                strict_user_credentials: config.strict_user_credentials,
            },
        );

        Ok(Self::from_parts(resolver, credential_store, config, data_dir))
    }

    pub fn from_parts(
        resolver: FeedbackResolver,
        credential_store: DynCredentialStore,
        config: FeedbackConfig,
        data_dir: PathBuf,
    ) -> Self {
        Self {
            resolver: Arc::new(resolver),
            credential_store,
            config: Arc::new(config),
            data_dir,
        }
    }
}
