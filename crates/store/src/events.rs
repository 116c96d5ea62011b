//! Event store.

use std::sync::Arc;

use acfruit_core::events::{Event, EventDraft, EventPatch};
use acfruit_db::repositories::EventRepo;
use acfruit_db::PersistenceClient;

use crate::collection::Collection;
use crate::error::StoreError;
use crate::status::StoreStatus;

pub struct EventStore {
    db: Arc<dyn PersistenceClient>,
    items: Collection<Event>,
    status: StoreStatus,
}

impl EventStore {
    pub fn new(db: Arc<dyn PersistenceClient>) -> Self {
        Self {
            db,
            items: Collection::new(),
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    /// Replace the collection with a fresh select. On failure the previous
    /// events stay in place.
    pub async fn load(&self) -> Result<usize, StoreError> {
        let events = self.status.track("events.load", EventRepo::list(self.db.as_ref())).await?;
        let count = events.len();
        self.items.replace(events).await;
        tracing::info!(count, "Loaded events");
        Ok(count)
    }

    /// Every event, published or not.
    pub async fn list(&self) -> Vec<Event> {
        self.items.snapshot().await
    }

    pub async fn published(&self) -> Vec<Event> {
        self.items.filtered(|e| e.published).await
    }

    pub async fn get(&self, id: &str) -> Option<Event> {
        self.items.find(id).await
    }

    pub async fn add(&self, draft: EventDraft) -> Result<Event, StoreError> {
        let event = self
            .status
            .track("events.add", EventRepo::create(self.db.as_ref(), &draft))
            .await?;
        self.items.prepend(event.clone()).await;
        Ok(event)
    }

    pub async fn update(&self, id: &str, patch: &EventPatch) -> Result<Option<Event>, StoreError> {
        self.status
            .track("events.update", EventRepo::update(self.db.as_ref(), id, patch))
            .await?;
        Ok(self.items.modify(id, |e| patch.apply(e)).await)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.status
            .track("events.delete", EventRepo::delete(self.db.as_ref(), id))
            .await?;
        self.items.remove(id).await;
        Ok(())
    }

    /// Flip `published`. Unknown ids are a silent no-op returning `None`.
    pub async fn toggle_published(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let Some(current) = self.items.find(id).await.map(|e| e.published) else {
            return Ok(None);
        };
        self.status
            .track(
                "events.toggle_published",
                EventRepo::set_published(self.db.as_ref(), id, !current),
            )
            .await?;
        Ok(self.items.modify(id, |e| e.published = !current).await)
    }
}
