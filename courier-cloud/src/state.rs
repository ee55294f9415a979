//! Shared application state

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::db::{BoxError, MemoryOrderStore, OrderStore, PgOrderStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    /// HS256 secret for caller tokens
    pub jwt_secret: String,
}

impl AppState {
    /// Connect the configured storage backend and apply migrations.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let store: Arc<dyn OrderStore> = match config.storage_backend {
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or("DATABASE_URL must be set")?;
                let pool = PgPoolOptions::new()
                    .max_connections(config.database_max_connections)
                    .connect(url)
                    .await?;

                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!(
                    max_connections = config.database_max_connections,
                    "PostgreSQL store ready"
                );
                Arc::new(PgOrderStore::new(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                Arc::new(MemoryOrderStore::new())
            }
        };

        Ok(Self::with_store(store, config.jwt_secret.clone()))
    }

    pub fn with_store(store: Arc<dyn OrderStore>, jwt_secret: impl Into<String>) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
        }
    }
}
