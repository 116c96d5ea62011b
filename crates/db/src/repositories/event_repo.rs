//! Repository for the `events` table.

use acfruit_core::events::{Event, EventDraft, EventPatch};

use super::{decode_rows, Inserted};
use crate::client::{PersistenceClient, SelectQuery, Table};
use crate::error::PersistenceError;
use crate::models::event::{EventPatchRow, EventRow, NewEventRow};

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// All events, most recently created first.
    pub async fn list(db: &dyn PersistenceClient) -> Result<Vec<Event>, PersistenceError> {
        let rows = db.select(Table::Events, &SelectQuery::all().newest_first()).await?;
        Ok(decode_rows::<EventRow>(Table::Events, rows)
            .into_iter()
            .map(Event::from)
            .collect())
    }

    pub async fn create(db: &dyn PersistenceClient, draft: &EventDraft) -> Result<Event, PersistenceError> {
        let row = serde_json::to_value(NewEventRow::from(draft))?;
        let inserted = Inserted::from_row(db.insert(Table::Events, row).await?)?;
        Ok(Event {
            id: inserted.id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            image: draft.image.clone(),
            location: draft.location.clone(),
            published: draft.published,
        })
    }

    pub async fn update(
        db: &dyn PersistenceClient,
        id: &str,
        patch: &EventPatch,
    ) -> Result<(), PersistenceError> {
        let row = serde_json::to_value(EventPatchRow::from(patch))?;
        db.update(Table::Events, id, row).await
    }

    pub async fn set_published(
        db: &dyn PersistenceClient,
        id: &str,
        published: bool,
    ) -> Result<(), PersistenceError> {
        let row = EventPatchRow { published: Some(published), ..Default::default() };
        db.update(Table::Events, id, serde_json::to_value(row)?).await
    }

    pub async fn delete(db: &dyn PersistenceClient, id: &str) -> Result<(), PersistenceError> {
        db.delete(Table::Events, id).await
    }
}
