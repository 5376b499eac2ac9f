//! MongoDB-backed coach store.
//!
//! One [`mongodb::Client`] is created at startup and shared by every request;
//! the driver pools connections internally, so cloning the store is cheap.

use bson::doc;
use futures_util::TryStreamExt;
use mongodb::{Client, Collection};
use tracing::instrument;

use coachdata_core::{Coach, CoachDetails, CoachId};

use super::document::CoachDocument;
use super::{parse_id, CoachStore, StoreError};
use crate::config::StoreConfig;

#[derive(Clone, Debug)]
pub struct MongoCoachStore {
    coaches: Collection<CoachDocument>,
}

impl MongoCoachStore {
    /// Connect using `config`.
    ///
    /// The driver connects lazily; a bad connection string fails here, an
    /// unreachable server fails on the first operation.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.connection_string)
            .await
            .map_err(|e| map_mongo_error("connect", e))?;
        Ok(Self::from_client(&client, config))
    }

    pub fn from_client(client: &Client, config: &StoreConfig) -> Self {
        let coaches = client
            .database(&config.database_name)
            .collection::<CoachDocument>(&config.collection_name);
        Self { coaches }
    }
}

fn map_mongo_error(operation: &str, err: mongodb::error::Error) -> StoreError {
    StoreError::Unavailable(format!("{operation}: {err}"))
}

#[async_trait::async_trait]
impl CoachStore for MongoCoachStore {
    #[instrument(skip(self), err)]
    async fn list_all(&self) -> Result<Vec<Coach>, StoreError> {
        let docs: Vec<CoachDocument> = self
            .coaches
            .find(doc! {})
            .await
            .map_err(|e| map_mongo_error("find", e))?
            .try_collect()
            .await
            .map_err(|e| map_mongo_error("find", e))?;

        docs.into_iter().map(CoachDocument::into_coach).collect()
    }

    #[instrument(skip(self, details), err)]
    async fn create(&self, details: CoachDetails) -> Result<Coach, StoreError> {
        let doc = CoachDocument::from_details(CoachId::new(), details)?;

        self.coaches
            .insert_one(&doc)
            .await
            .map_err(|e| map_mongo_error("insert_one", e))?;

        doc.into_coach()
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: &str) -> Result<Option<Coach>, StoreError> {
        let id = parse_id(id)?;

        self.coaches
            .find_one(doc! { "_id": *id.as_object_id() })
            .await
            .map_err(|e| map_mongo_error("find_one", e))?
            .map(CoachDocument::into_coach)
            .transpose()
    }

    #[instrument(skip(self, details), err)]
    async fn replace(&self, id: &str, details: CoachDetails) -> Result<Option<Coach>, StoreError> {
        let coach_id = parse_id(id)?;
        let doc = CoachDocument::from_details(coach_id, details)?;

        let result = self
            .coaches
            .replace_one(doc! { "_id": *coach_id.as_object_id() }, &doc)
            .await
            .map_err(|e| map_mongo_error("replace_one", e))?;

        // matched, not modified: an unchanged replacement is still a hit.
        if result.matched_count == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    #[instrument(skip(self), err)]
    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let id = parse_id(id)?;

        let result = self
            .coaches
            .delete_one(doc! { "_id": *id.as_object_id() })
            .await
            .map_err(|e| map_mongo_error("delete_one", e))?;

        Ok(result.deleted_count == 1)
    }
}
