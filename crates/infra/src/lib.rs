//! Infrastructure layer: coach persistence and its configuration.

pub mod coach_store;
pub mod config;

pub use coach_store::{CoachStore, InMemoryCoachStore, MongoCoachStore, StoreError};
pub use config::{ConfigError, StoreConfig};
