//! Repository for the `news` table.

use acfruit_core::news::{NewsArticle, NewsDraft, NewsPatch};

use super::{decode_rows, Inserted};
use crate::client::{PersistenceClient, SelectQuery, Table};
use crate::error::PersistenceError;
use crate::models::news::{NewNewsRow, NewsPatchRow, NewsRow};

/// Provides CRUD operations for news articles.
pub struct NewsRepo;

impl NewsRepo {
    /// All articles, newest first.
    pub async fn list(db: &dyn PersistenceClient) -> Result<Vec<NewsArticle>, PersistenceError> {
        let rows = db.select(Table::News, &SelectQuery::all().newest_first()).await?;
        Ok(decode_rows::<NewsRow>(Table::News, rows)
            .into_iter()
            .map(NewsArticle::from)
            .collect())
    }

    /// Insert an article. The returned value carries the assigned id and
    /// creation time, with every other field as submitted.
    pub async fn create(
        db: &dyn PersistenceClient,
        draft: &NewsDraft,
    ) -> Result<NewsArticle, PersistenceError> {
        let row = serde_json::to_value(NewNewsRow::from(draft))?;
        let inserted = Inserted::from_row(db.insert(Table::News, row).await?)?;
        Ok(NewsArticle {
            id: inserted.id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            image: draft.image.clone(),
            published: draft.published,
            date: inserted.created_at.unwrap_or_else(chrono::Utc::now),
        })
    }

    pub async fn update(
        db: &dyn PersistenceClient,
        id: &str,
        patch: &NewsPatch,
    ) -> Result<(), PersistenceError> {
        let row = serde_json::to_value(NewsPatchRow::from(patch))?;
        db.update(Table::News, id, row).await
    }

    pub async fn set_published(
        db: &dyn PersistenceClient,
        id: &str,
        published: bool,
    ) -> Result<(), PersistenceError> {
        let row = NewsPatchRow { published: Some(published), ..Default::default() };
        db.update(Table::News, id, serde_json::to_value(row)?).await
    }

    pub async fn delete(db: &dyn PersistenceClient, id: &str) -> Result<(), PersistenceError> {
        db.delete(Table::News, id).await
    }
}
