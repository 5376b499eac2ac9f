//! Coach persistence.
//!
//! The store is the sole owner of coach data. Handlers only ever talk to a
//! [`CoachStore`]; which backend sits behind it is decided at startup.

use std::sync::Arc;

use thiserror::Error;

use coachdata_core::{Coach, CoachDetails, CoachId, DomainError};

pub mod document;
pub mod in_memory;
pub mod mongo;

pub use in_memory::InMemoryCoachStore;
pub use mongo::MongoCoachStore;

/// Coach store operation error.
///
/// "Not found" is not an error here: lookups return `Option`, deletes return
/// `bool`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The identifier string is not a well-formed store identifier.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Transport or server failure talking to the database.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored document could not be mapped back into a coach.
    #[error("corrupt coach document: {0}")]
    Corrupt(String),
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidId(msg) => StoreError::InvalidIdentifier(msg),
            other => StoreError::Corrupt(other.to_string()),
        }
    }
}

/// Parse a caller-supplied identifier into the store's native form.
pub fn parse_id(id: &str) -> Result<CoachId, StoreError> {
    id.parse::<CoachId>().map_err(StoreError::from)
}

/// Document-collection view of coach records.
#[async_trait::async_trait]
pub trait CoachStore: Send + Sync {
    /// Every stored coach, in store-native order.
    async fn list_all(&self) -> Result<Vec<Coach>, StoreError>;

    /// Insert a new coach; the store assigns the id.
    async fn create(&self, details: CoachDetails) -> Result<Coach, StoreError>;

    /// Look up a coach. `Ok(None)` when nothing matches.
    async fn find_by_id(&self, id: &str) -> Result<Option<Coach>, StoreError>;

    /// Replace every field except the id.
    ///
    /// Returns the re-read record, or `Ok(None)` when no document matched.
    async fn replace(&self, id: &str, details: CoachDetails) -> Result<Option<Coach>, StoreError>;

    /// Remove a coach. `true` iff exactly one document was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;
}

#[async_trait::async_trait]
impl<S> CoachStore for Arc<S>
where
    S: CoachStore + ?Sized,
{
    async fn list_all(&self) -> Result<Vec<Coach>, StoreError> {
        (**self).list_all().await
    }

    async fn create(&self, details: CoachDetails) -> Result<Coach, StoreError> {
        (**self).create(details).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Coach>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn replace(&self, id: &str, details: CoachDetails) -> Result<Option<Coach>, StoreError> {
        (**self).replace(id, details).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete_by_id(id).await
    }
}
