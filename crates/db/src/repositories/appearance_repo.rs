//! Repository for the singleton `appearance` row.

use acfruit_core::appearance::Appearance;

use super::Inserted;
use crate::client::{PersistenceClient, SelectQuery, Table};
use crate::error::PersistenceError;
use crate::models::appearance::{AppearanceRow, AppearanceWriteRow};

pub struct AppearanceRepo;

impl AppearanceRepo {
    /// The first row, if the table has one.
    pub async fn fetch(db: &dyn PersistenceClient) -> Result<Option<Appearance>, PersistenceError> {
        let rows = db.select(Table::Appearance, &SelectQuery::all().limit(1)).await?;
        match rows.into_iter().next() {
            Some(row) => {
                let row: AppearanceRow = serde_json::from_value(row)?;
                Ok(Some(Appearance::from(row)))
            }
            None => Ok(None),
        }
    }

    /// Write the whole record: update the existing row, or insert the first one.
    pub async fn save(db: &dyn PersistenceClient, appearance: &Appearance) -> Result<(), PersistenceError> {
        let row = serde_json::to_value(AppearanceWriteRow::from(appearance))?;
        let existing = db
            .select(Table::Appearance, &SelectQuery::all().columns("id").limit(1))
            .await?
            .into_iter()
            .next();

        match existing {
            Some(existing) => {
                let id = Inserted::from_row(existing)?.id;
                tracing::debug!(id = %id, "Updating appearance row");
                db.update(Table::Appearance, &id, row).await
            }
            None => {
                tracing::debug!("Inserting first appearance row");
                db.insert(Table::Appearance, row).await.map(|_| ())
            }
        }
    }
}
