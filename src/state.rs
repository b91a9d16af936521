use crate::config::AppConfig;
use crate::store::{MemoryStore, PgStore, ResultStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResultStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store: Arc<dyn ResultStore> = match config.database_url.as_deref() {
            Some(url) => Arc::new(PgStore::connect(url).await?),
            None => {
                tracing::warn!("DATABASE_URL not set; serving the seeded in-memory demo store");
                Arc::new(MemoryStore::demo())
            }
        };

        Ok(Self { store, config })
    }

    pub fn from_parts(store: Arc<dyn ResultStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub fn fake() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            config: Arc::new(AppConfig { database_url: None }),
        }
    }
}
