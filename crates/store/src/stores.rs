use std::sync::Arc;

use serde::Serialize;

use acfruit_db::{ObjectStorage, PersistenceClient};

use crate::appearance::AppearanceStore;
use crate::error::StoreError;
use crate::events::EventStore;
use crate::fruits::FruitStore;
use crate::media::MediaPipeline;
use crate::news::NewsStore;
use crate::planifruits::PlanifruitStore;
use crate::status::StatusSnapshot;

/// All five domain stores plus the media pipeline, built once at startup.
pub struct Stores {
    pub fruits: FruitStore,
    pub news: NewsStore,
    pub events: EventStore,
    pub planifruits: PlanifruitStore,
    pub appearance: AppearanceStore,
    pub media: MediaPipeline,
}

/// Outcome of the startup load, one error message per failed store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub failures: Vec<(&'static str, String)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record<T>(&mut self, store: &'static str, result: Result<T, StoreError>) {
        if let Err(e) = result {
            tracing::error!(store, error = %e, "Initial load failed");
            self.failures.push((store, e.to_string()));
        }
    }
}

impl Stores {
    pub fn new(db: Arc<dyn PersistenceClient>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            fruits: FruitStore::new(Arc::clone(&db)),
            news: NewsStore::new(Arc::clone(&db)),
            events: EventStore::new(Arc::clone(&db)),
            planifruits: PlanifruitStore::new(Arc::clone(&db)),
            appearance: AppearanceStore::new(db),
            media: MediaPipeline::new(storage),
        }
    }

    /// Load every store concurrently and wait for all of them to settle.
    /// A failed load leaves its store in its fallback state.
    pub async fn load_all(&self) -> LoadReport {
        let (fruits, news, events, planifruits, appearance) = tokio::join!(
            self.fruits.load(),
            self.news.load(),
            self.events.load(),
            self.planifruits.load(),
            self.appearance.load(),
        );

        let mut report = LoadReport::default();
        report.record("fruits", fruits);
        report.record("news", news);
        report.record("events", events);
        report.record("planifruits", planifruits);
        report.record("appearance", appearance);

        tracing::info!(failed = report.failures.len(), "Initial load settled");
        report
    }

    /// Loading indicator and last error of each store.
    pub fn statuses(&self) -> Vec<(&'static str, StatusSnapshot)> {
        vec![
            ("fruits", self.fruits.status().snapshot()),
            ("news", self.news.status().snapshot()),
            ("events", self.events.status().snapshot()),
            ("planifruits", self.planifruits.status().snapshot()),
            ("appearance", self.appearance.status().snapshot()),
        ]
    }
}
