//! Planifruit store.

use std::sync::Arc;

use acfruit_core::catalog::{Category, FruitType};
use acfruit_core::planifruit::{Planifruit, PlanifruitDraft, PlanifruitPatch};
use acfruit_db::repositories::PlanifruitRepo;
use acfruit_db::PersistenceClient;
use chrono::Utc;

use crate::collection::Collection;
use crate::error::StoreError;
use crate::status::StoreStatus;

pub struct PlanifruitStore {
    db: Arc<dyn PersistenceClient>,
    items: Collection<Planifruit>,
    status: StoreStatus,
}

impl PlanifruitStore {
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
    /// charts stay in place.
    pub async fn load(&self) -> Result<usize, StoreError> {
        let charts = self
            .status
            .track("planifruits.load", PlanifruitRepo::list(self.db.as_ref()))
            .await?;
        let count = charts.len();
        self.items.replace(charts).await;
        tracing::info!(count, "Loaded planifruits");
        Ok(count)
    }

    pub async fn list(&self) -> Vec<Planifruit> {
        self.items.snapshot().await
    }

    /// Charts of a category, optionally narrowed to one type.
    pub async fn find(&self, category: Category, fruit_type: Option<FruitType>) -> Vec<Planifruit> {
        self.items.filtered(|p| p.matches(category, fruit_type)).await
    }

    pub async fn get(&self, id: &str) -> Option<Planifruit> {
        self.items.find(id).await
    }

    pub async fn add(&self, draft: PlanifruitDraft) -> Result<Planifruit, StoreError> {
        let chart = self
            .status
            .track("planifruits.add", PlanifruitRepo::create(self.db.as_ref(), &draft))
            .await?;
        self.items.prepend(chart.clone()).await;
        Ok(chart)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: &PlanifruitPatch,
    ) -> Result<Option<Planifruit>, StoreError> {
        self.status
            .track("planifruits.update", PlanifruitRepo::update(self.db.as_ref(), id, patch))
            .await?;
        Ok(self
            .items
            .modify(id, |p| {
                patch.apply(p);
                p.updated_at = Some(Utc::now());
            })
            .await)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.status
            .track("planifruits.delete", PlanifruitRepo::delete(self.db.as_ref(), id))
            .await?;
        self.items.remove(id).await;
        Ok(())
    }
}
