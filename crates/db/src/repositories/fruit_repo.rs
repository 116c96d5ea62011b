//! Repository for the `fruits` table.

use acfruit_core::catalog::{Variety, VarietyAddress};
use acfruit_core::types::RecordId;

use super::{decode_rows, Inserted};
use crate::client::{PersistenceClient, SelectQuery, Table};
use crate::error::PersistenceError;
use crate::models::fruit::{FruitRow, NewFruitRow, VarietyColumns};

/// Provides CRUD operations for varieties.
pub struct FruitRepo;

impl FruitRepo {
    /// Every variety with its catalog address, newest first. Rows whose
    /// category/type do not fit the catalog shape are skipped.
    pub async fn list(
        db: &dyn PersistenceClient,
    ) -> Result<Vec<(VarietyAddress, RecordId, Variety)>, PersistenceError> {
        let rows = db.select(Table::Fruits, &SelectQuery::all().newest_first()).await?;
        Ok(decode_rows::<FruitRow>(Table::Fruits, rows)
            .into_iter()
            .filter_map(|row| {
                let (id, category, fruit_type) =
                    (row.id.clone(), row.category.clone(), row.fruit_type.clone());
                row.into_entry()
                    .inspect_err(|e| {
                        tracing::warn!(
                            id = %id,
                            category = %category,
                            fruit_type = ?fruit_type,
                            error = %e,
                            "Skipping fruit row that does not fit the catalog",
                        )
                    })
                    .ok()
            })
            .collect())
    }

    /// Insert a variety at `address`, returning the assigned id.
    pub async fn create(
        db: &dyn PersistenceClient,
        address: VarietyAddress,
        variety: &Variety,
    ) -> Result<RecordId, PersistenceError> {
        let row = serde_json::to_value(NewFruitRow::new(address, variety))?;
        let inserted = Inserted::from_row(db.insert(Table::Fruits, row).await?)?;
        Ok(inserted.id)
    }

    /// Overwrite the variety columns of `id`. Category and type stay put.
    pub async fn update(
        db: &dyn PersistenceClient,
        id: &str,
        variety: &Variety,
    ) -> Result<(), PersistenceError> {
        let row = serde_json::to_value(VarietyColumns::from(variety))?;
        db.update(Table::Fruits, id, row).await
    }

    pub async fn delete(db: &dyn PersistenceClient, id: &str) -> Result<(), PersistenceError> {
        db.delete(Table::Fruits, id).await
    }
}
