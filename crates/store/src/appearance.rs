//! Appearance store: the singleton site configuration.

use std::sync::Arc;

use tokio::sync::RwLock;

use acfruit_core::appearance::{Appearance, AppearancePatch};
use acfruit_db::repositories::AppearanceRepo;
use acfruit_db::PersistenceClient;

use crate::error::StoreError;
use crate::status::StoreStatus;

pub struct AppearanceStore {
    db: Arc<dyn PersistenceClient>,
    current: RwLock<Appearance>,
    status: StoreStatus,
}

impl AppearanceStore {
    pub fn new(db: Arc<dyn PersistenceClient>) -> Self {
        Self {
            db,
            current: RwLock::new(Appearance::default()),
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    /// Fetch the row. No row means defaults; a failed fetch also resets to
    /// defaults.
    pub async fn load(&self) -> Result<(), StoreError> {
        match self
            .status
            .track("appearance.load", AppearanceRepo::fetch(self.db.as_ref()))
            .await
        {
            Ok(Some(appearance)) => {
                *self.current.write().await = appearance;
                tracing::info!("Loaded appearance");
                Ok(())
            }
            Ok(None) => {
                *self.current.write().await = Appearance::default();
                tracing::info!("No appearance row, using defaults");
                Ok(())
            }
            Err(e) => {
                *self.current.write().await = Appearance::default();
                Err(e.into())
            }
        }
    }

    pub async fn get(&self) -> Appearance {
        self.current.read().await.clone()
    }

    /// Merge `patch` into the current record and persist the merged record
    /// whole, inserting the row when none exists yet.
    ///
    /// The write lock is held across the save, so concurrent updates apply
    /// one after the other and each merges onto the previous result.
    pub async fn update(&self, patch: &AppearancePatch) -> Result<Appearance, StoreError> {
        let mut current = self.current.write().await;
        let merged = patch.merged(&current);
        self.status
            .track("appearance.update", AppearanceRepo::save(self.db.as_ref(), &merged))
            .await?;
        *current = merged.clone();
        Ok(merged)
    }
}
