use std::collections::HashMap;
use std::sync::RwLock;

use coachdata_core::{Coach, CoachDetails, CoachId};

use super::document::CoachDocument;
use super::{parse_id, CoachStore, StoreError};

/// In-memory coach store for tests/dev.
///
/// Holds the same [`CoachDocument`] representation the Mongo store writes, so
/// identifier parsing, `team_id` handling and date precision behave alike.
#[derive(Debug, Default)]
pub struct InMemoryCoachStore {
    inner: RwLock<HashMap<CoachId, CoachDocument>>,
}

impl InMemoryCoachStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("in-memory coach store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl CoachStore for InMemoryCoachStore {
    async fn list_all(&self) -> Result<Vec<Coach>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        map.values().cloned().map(CoachDocument::into_coach).collect()
    }

    async fn create(&self, details: CoachDetails) -> Result<Coach, StoreError> {
        let id = CoachId::new();
        let doc = CoachDocument::from_details(id, details)?;
        let coach = doc.clone().into_coach()?;

        self.inner.write().map_err(poisoned)?.insert(id, doc);
        Ok(coach)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Coach>, StoreError> {
        let id = parse_id(id)?;
        let map = self.inner.read().map_err(poisoned)?;
        map.get(&id).cloned().map(CoachDocument::into_coach).transpose()
    }

    async fn replace(&self, id: &str, details: CoachDetails) -> Result<Option<Coach>, StoreError> {
        let id = parse_id(id)?;
        let doc = CoachDocument::from_details(id, details)?;

        {
            let mut map = self.inner.write().map_err(poisoned)?;
            match map.get_mut(&id) {
                Some(slot) => *slot = doc,
                None => return Ok(None),
            }
        }

        self.find_by_id(&id.to_hex()).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let id = parse_id(id)?;
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(&id).is_some())
    }
}
