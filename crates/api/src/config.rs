//! Process configuration for the HTTP service.

use std::net::SocketAddr;

use coachdata_infra::config::{ConfigError, MONGO_CONNECTION_STRING, StoreConfig};

pub const BIND_ADDR: &str = "BIND_ADDR";
pub const FUNCTIONS_KEY: &str = "FUNCTIONS_KEY";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Invocation credential; `None` leaves `/coaches` open.
    pub function_key: Option<String>,
    /// `None` selects the in-memory store.
    pub store: Option<StoreConfig>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.trim().parse().map_err(|e| ConfigError::Invalid {
            name: BIND_ADDR,
            reason: format!("{bind_raw:?}: {e}"),
        })?;

        let function_key = lookup(FUNCTIONS_KEY).filter(|k| !k.trim().is_empty());

        let store = match lookup(MONGO_CONNECTION_STRING) {
            Some(v) if !v.trim().is_empty() => Some(StoreConfig::from_lookup(&lookup)?),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            function_key,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coachdata_infra::config::DATABASE_NAME;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_means_dev_defaults() {
        let config = ApiConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert!(config.function_key.is_none());
        assert!(config.store.is_none());
    }

    #[test]
    fn connection_string_requires_database_name() {
        let err = ApiConfig::from_lookup(lookup_from(&[(
            MONGO_CONNECTION_STRING,
            "mongodb://localhost:27017",
        )]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(DATABASE_NAME));
    }

    #[test]
    fn full_environment() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (BIND_ADDR, "127.0.0.1:7071"),
            (FUNCTIONS_KEY, "s3cret"),
            (MONGO_CONNECTION_STRING, "mongodb://localhost:27017"),
            (DATABASE_NAME, "efootball"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 7071);
        assert_eq!(config.function_key.as_deref(), Some("s3cret"));
        assert_eq!(config.store.unwrap().database_name, "efootball");
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let err = ApiConfig::from_lookup(lookup_from(&[(BIND_ADDR, "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: BIND_ADDR, .. }));
    }
}
