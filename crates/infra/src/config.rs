//! Storage configuration.
//!
//! Built once at startup and handed to the store constructor; nothing below
//! this layer reads the environment.

use thiserror::Error;

pub const MONGO_CONNECTION_STRING: &str = "MONGO_CONNECTION_STRING";
pub const DATABASE_NAME: &str = "DATABASE_NAME";
pub const COACH_COLLECTION: &str = "COACH_COLLECTION";

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "Coaches";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Where coach documents live.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub connection_string: String,
    pub database_name: String,
    pub collection_name: String,
}

impl StoreConfig {
    pub fn new(connection_string: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            database_name: database_name.into(),
            collection_name: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn with_collection(mut self, collection_name: impl Into<String>) -> Self {
        self.collection_name = collection_name.into();
        self
    }

    /// Read `MONGO_CONNECTION_STRING`, `DATABASE_NAME` and optionally
    /// `COACH_COLLECTION` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());

        let connection_string =
            non_empty(MONGO_CONNECTION_STRING).ok_or(ConfigError::Missing(MONGO_CONNECTION_STRING))?;
        let database_name = non_empty(DATABASE_NAME).ok_or(ConfigError::Missing(DATABASE_NAME))?;

        let mut config = Self::new(connection_string, database_name);
        if let Some(collection) = non_empty(COACH_COLLECTION) {
            config = config.with_collection(collection);
        }
        Ok(config)
    }
}

// The connection string may carry credentials.
impl core::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("connection_string", &"<redacted>")
            .field("database_name", &self.database_name)
            .field("collection_name", &self.collection_name)
            .finish()
    }
}
