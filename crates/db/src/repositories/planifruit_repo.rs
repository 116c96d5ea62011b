//! Repository for the `planifruits` table.

use acfruit_core::planifruit::{Planifruit, PlanifruitDraft, PlanifruitPatch};

use super::{decode_rows, Inserted};
use crate::client::{PersistenceClient, SelectQuery, Table};
use crate::error::PersistenceError;
use crate::models::planifruit::{NewPlanifruitRow, PlanifruitPatchRow, PlanifruitRow};

/// Provides CRUD operations for maturity charts.
pub struct PlanifruitRepo;

impl PlanifruitRepo {
    /// All charts, newest first. Rows naming an unknown category or type
    /// are skipped.
    pub async fn list(db: &dyn PersistenceClient) -> Result<Vec<Planifruit>, PersistenceError> {
        let rows = db.select(Table::Planifruits, &SelectQuery::all().newest_first()).await?;
        Ok(decode_rows::<PlanifruitRow>(Table::Planifruits, rows)
            .into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                Planifruit::try_from(row)
                    .inspect_err(|e| tracing::warn!(id = %id, error = %e, "Skipping planifruit row"))
                    .ok()
            })
            .collect())
    }

    pub async fn create(
        db: &dyn PersistenceClient,
        draft: &PlanifruitDraft,
    ) -> Result<Planifruit, PersistenceError> {
        let row = serde_json::to_value(NewPlanifruitRow::from(draft))?;
        let inserted = Inserted::from_row(db.insert(Table::Planifruits, row).await?)?;
        Ok(Planifruit {
            id: inserted.id,
            category: draft.category,
            fruit_type: draft.fruit_type,
            image: draft.image.clone(),
            created_at: inserted.created_at,
            updated_at: inserted.updated_at,
        })
    }

    pub async fn update(
        db: &dyn PersistenceClient,
        id: &str,
        patch: &PlanifruitPatch,
    ) -> Result<(), PersistenceError> {
        let row = serde_json::to_value(PlanifruitPatchRow::from(patch))?;
        db.update(Table::Planifruits, id, row).await
    }

    pub async fn delete(db: &dyn PersistenceClient, id: &str) -> Result<(), PersistenceError> {
        db.delete(Table::Planifruits, id).await
    }
}
