//! Rows of the `news` table.

use serde::{Deserialize, Serialize};

use acfruit_core::news::{NewsArticle, NewsDraft, NewsPatch};
use acfruit_core::types::{RecordId, Timestamp};

use super::id_string;

/// A row from the `news` table.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsRow {
    #[serde(deserialize_with = "id_string")]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl From<NewsRow> for NewsArticle {
    fn from(row: NewsRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content.unwrap_or_default(),
            image: row.image.unwrap_or_default(),
            published: row.published.unwrap_or(false),
            date: row.created_at.unwrap_or_default(),
        }
    }
}

/// Insert payload for the `news` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewNewsRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub image: &'a str,
    pub published: bool,
}

impl<'a> From<&'a NewsDraft> for NewNewsRow<'a> {
    fn from(d: &'a NewsDraft) -> Self {
        Self {
            title: &d.title,
            content: &d.content,
            image: &d.image,
            published: d.published,
        }
    }
}

/// Columns sent for a partial update. Only present fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewsPatchRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl<'a> From<&'a NewsPatch> for NewsPatchRow<'a> {
    fn from(p: &'a NewsPatch) -> Self {
        // Same destructuring as `NewsPatch::apply`: a new field breaks both.
        let NewsPatch { title, content, image, published } = p;
        Self {
            title: title.as_deref(),
            content: content.as_deref(),
            image: image.as_deref(),
            published: *published,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn row_maps_created_at_to_date() {
        let row: NewsRow = serde_json::from_value(json!({
            "id": "n1",
            "title": "Récolte",
            "content": "a\nb",
            "image": "https://img/n.jpg",
            "published": true,
            "created_at": "2024-06-10T08:00:00+00:00",
            "updated_at": null
        }))
        .unwrap();
        let article = NewsArticle::from(row);
        assert_eq!(article.date.to_rfc3339(), "2024-06-10T08:00:00+00:00");
        assert!(article.published);
    }

    #[test]
    fn patch_row_writes_only_present_fields() {
        let patch = NewsPatch { published: Some(false), ..Default::default() };
        assert_eq!(
            serde_json::to_value(NewsPatchRow::from(&patch)).unwrap(),
            json!({ "published": false })
        );
    }
}
