use std::{sync::Arc, time::Instant};

use serde_json::{Value, json};

use crate::{application::config::ServiceConfig, domain::error::DomainError, storage::SqliteStore};

/// Process-lifetime handle injected into every request handler.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: ServiceConfig,
    store: SqliteStore,
    started_at: Instant,
}

impl SharedState {
    pub async fn new(config: ServiceConfig) -> Result<Self, DomainError> {
        let store = SqliteStore::connect(&config.database_url).await?;
        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: ServiceConfig, store: SqliteStore) -> Self {
        Self {
            inner: Arc::new(InnerState {
                config,
                store,
                started_at: Instant::now(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &SqliteStore {
        &self.inner.store
    }

    #[must_use]
    pub fn uptime_ms(&self) -> u64 {
        u64::try_from(self.inner.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub async fn health_payload(&self) -> Result<Value, DomainError> {
        let apps = self.inner.store.count_apps().await?;
        Ok(json!({
            "ok": true,
            "apps": apps,
            "port": self.config().port,
            "uptimeMs": self.uptime_ms(),
            "version": env!("CARGO_PKG_VERSION"),
        }))
    }

    pub async fn close(&self) {
        self.inner.store.close().await;
    }
}
