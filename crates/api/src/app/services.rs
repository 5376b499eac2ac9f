use std::sync::Arc;

use coachdata_infra::{CoachStore, InMemoryCoachStore, MongoCoachStore, StoreConfig, StoreError};

/// Process-wide service handles shared by every request.
#[derive(Clone)]
pub enum AppServices {
    InMemory { coaches: Arc<InMemoryCoachStore> },
    Mongo { coaches: Arc<MongoCoachStore> },
    /// Any other backend, supplied by the caller.
    Custom { coaches: Arc<dyn CoachStore> },
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        AppServices::InMemory {
            coaches: Arc::new(InMemoryCoachStore::new()),
        }
    }

    pub fn with_store(coaches: Arc<dyn CoachStore>) -> Self {
        AppServices::Custom { coaches }
    }

    pub async fn mongo(config: &StoreConfig) -> Result<Self, StoreError> {
        let store = MongoCoachStore::connect(config).await?;
        Ok(AppServices::Mongo {
            coaches: Arc::new(store),
        })
    }

    pub fn backend(&self) -> &'static str {
        match self {
            AppServices::InMemory { .. } => "in_memory",
            AppServices::Mongo { .. } => "mongo",
            AppServices::Custom { .. } => "custom",
        }
    }

    pub fn coaches(&self) -> &dyn CoachStore {
        match self {
            AppServices::InMemory { coaches } => &**coaches,
            AppServices::Mongo { coaches } => &**coaches,
            AppServices::Custom { coaches } => &**coaches,
        }
    }
}

/// Pick the store from configuration.
pub async fn build_services(store: Option<&StoreConfig>) -> Result<AppServices, StoreError> {
    match store {
        Some(config) => {
            tracing::info!(
                database = %config.database_name,
                collection = %config.collection_name,
                "using MongoDB coach store"
            );
            AppServices::mongo(config).await
        }
        None => {
            tracing::warn!("MONGO_CONNECTION_STRING not set; using in-memory coach store");
            Ok(AppServices::in_memory())
        }
    }
}
