//! News store.

use std::sync::Arc;

use acfruit_core::news::{NewsArticle, NewsDraft, NewsPatch};
use acfruit_db::repositories::NewsRepo;
use acfruit_db::PersistenceClient;

use crate::collection::Collection;
use crate::error::StoreError;
use crate::status::StoreStatus;

pub struct NewsStore {
    db: Arc<dyn PersistenceClient>,
    items: Collection<NewsArticle>,
    status: StoreStatus,
}

impl NewsStore {
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
    /// articles stay in place.
    pub async fn load(&self) -> Result<usize, StoreError> {
        let articles = self.status.track("news.load", NewsRepo::list(self.db.as_ref())).await?;
        let count = articles.len();
        self.items.replace(articles).await;
        tracing::info!(count, "Loaded news");
        Ok(count)
    }

    pub async fn list(&self) -> Vec<NewsArticle> {
        self.items.snapshot().await
    }

    pub async fn published(&self) -> Vec<NewsArticle> {
        self.items.filtered(|a| a.published).await
    }

    pub async fn get(&self, id: &str) -> Option<NewsArticle> {
        self.items.find(id).await
    }

    pub async fn add(&self, draft: NewsDraft) -> Result<NewsArticle, StoreError> {
        let article = self
            .status
            .track("news.add", NewsRepo::create(self.db.as_ref(), &draft))
            .await?;
        self.items.prepend(article.clone()).await;
        Ok(article)
    }

    /// Write `patch` remotely, then merge it into the local article.
    /// Returns `None` when the id is not held locally.
    pub async fn update(&self, id: &str, patch: &NewsPatch) -> Result<Option<NewsArticle>, StoreError> {
        self.status
            .track("news.update", NewsRepo::update(self.db.as_ref(), id, patch))
            .await?;
        Ok(self.items.modify(id, |a| patch.apply(a)).await)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.status
            .track("news.delete", NewsRepo::delete(self.db.as_ref(), id))
            .await?;
        self.items.remove(id).await;
        Ok(())
    }

    /// Flip `published`. Unknown ids are a silent no-op returning `None`.
    pub async fn toggle_published(&self, id: &str) -> Result<Option<NewsArticle>, StoreError> {
        let Some(current) = self.items.find(id).await.map(|a| a.published) else {
            return Ok(None);
        };
        self.status
            .track(
                "news.toggle_published",
                NewsRepo::set_published(self.db.as_ref(), id, !current),
            )
            .await?;
        Ok(self.items.modify(id, |a| a.published = !current).await)
    }
}
