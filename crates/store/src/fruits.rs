//! Fruit store: the variety catalog.
//!
//! Every mutation takes a [`VarietyAddress`] and checks it against the
//! category's shape before the remote call, so a type sent for apricots (or
//! missing for peaches) never reaches persistence.

use std::sync::Arc;

use tokio::sync::RwLock;

use acfruit_core::catalog::{
    CatalogEntry, Category, Fruit, FruitCatalog, SearchHit, Variety, VarietyAddress,
};
use acfruit_core::types::RecordId;
use acfruit_db::repositories::FruitRepo;
use acfruit_db::PersistenceClient;

use crate::error::StoreError;
use crate::status::StoreStatus;

pub struct FruitStore {
    db: Arc<dyn PersistenceClient>,
    catalog: RwLock<FruitCatalog>,
    status: StoreStatus,
}

impl FruitStore {
    pub fn new(db: Arc<dyn PersistenceClient>) -> Self {
        Self {
            db,
            catalog: RwLock::new(FruitCatalog::default()),
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    /// Rebuild the catalog from a fresh select. On failure the catalog is
    /// reset to the empty base structure.
    pub async fn load(&self) -> Result<usize, StoreError> {
        let rows = match self.status.track("fruits.load", FruitRepo::list(self.db.as_ref())).await {
            Ok(rows) => rows,
            Err(e) => {
                *self.catalog.write().await = FruitCatalog::default();
                return Err(e.into());
            }
        };

        let mut catalog = FruitCatalog::default();
        for (address, id, variety) in rows {
            // Rows were shape-checked by the repository.
            if let Err(e) = catalog.put(address, id, variety) {
                tracing::warn!(error = %e, "Skipping variety");
            }
        }
        let count = catalog.len();
        *self.catalog.write().await = catalog;
        tracing::info!(count, "Loaded fruit catalog");
        Ok(count)
    }

    pub async fn catalog(&self) -> FruitCatalog {
        self.catalog.read().await.clone()
    }

    pub async fn fruit(&self, category: Category) -> Fruit {
        self.catalog.read().await.fruit(category).clone()
    }

    pub async fn variety(&self, address: VarietyAddress, id: &str) -> Option<Variety> {
        self.catalog.read().await.get(address, id).cloned()
    }

    /// Varieties at `address`, earliest maturity first.
    pub async fn list_by_maturity(&self, address: VarietyAddress) -> Vec<CatalogEntry> {
        self.catalog.read().await.list_by_maturity(address)
    }

    pub async fn search(&self, query: &str) -> Vec<SearchHit> {
        self.catalog.read().await.search(query)
    }

    /// Insert a variety and file it locally under the assigned id.
    pub async fn add_variety(
        &self,
        address: VarietyAddress,
        variety: Variety,
    ) -> Result<RecordId, StoreError> {
        let address = address.validate()?;
        let id = self
            .status
            .track("fruits.add", FruitRepo::create(self.db.as_ref(), address, &variety))
            .await?;
        self.catalog.write().await.put(address, id.clone(), variety)?;
        Ok(id)
    }

    /// Overwrite a variety. Category and type are not changed by an update.
    pub async fn update_variety(
        &self,
        address: VarietyAddress,
        id: &str,
        variety: Variety,
    ) -> Result<(), StoreError> {
        let address = address.validate()?;
        self.status
            .track("fruits.update", FruitRepo::update(self.db.as_ref(), id, &variety))
            .await?;
        self.catalog.write().await.put(address, id.to_string(), variety)?;
        Ok(())
    }

    pub async fn delete_variety(&self, address: VarietyAddress, id: &str) -> Result<(), StoreError> {
        let address = address.validate()?;
        self.status
            .track("fruits.delete", FruitRepo::delete(self.db.as_ref(), id))
            .await?;
        self.catalog.write().await.remove(address, id);
        Ok(())
    }
}
