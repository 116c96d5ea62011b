//! News articles.

use serde::{Deserialize, Serialize};

use crate::types::{RecordId, Timestamp};

/// A news article. Only `published` articles reach the public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: RecordId,
    pub title: String,
    /// Newline-delimited paragraphs.
    pub content: String,
    pub image: String,
    pub published: bool,
    /// Creation time.
    pub date: Timestamp,
}

impl NewsArticle {
    /// Non-blank paragraphs of `content`, trimmed.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

/// Fields of a new article; the id and date come from persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
    pub image: String,
    #[serde(default)]
    pub published: bool,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub published: Option<bool>,
}

impl NewsPatch {
    /// Shallow-merge into a local article.
    pub fn apply(&self, article: &mut NewsArticle) {
        let NewsPatch { title, content, image, published } = self;
        if let Some(v) = title {
            article.title = v.clone();
        }
        if let Some(v) = content {
            article.content = v.clone();
        }
        if let Some(v) = image {
            article.image = v.clone();
        }
        if let Some(v) = published {
            article.published = *v;
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> NewsArticle {
        NewsArticle {
            id: "n1".into(),
            title: "Récolte".into(),
            content: "Premier paragraphe\n\n  Second  \n".into(),
            image: "https://img/n1.jpg".into(),
            published: false,
            date: chrono::Utc::now(),
        }
    }

    #[test]
    fn apply_touches_only_present_fields() {
        let mut a = article();
        let before = a.clone();
        NewsPatch { title: Some("Nouveau".into()), ..Default::default() }.apply(&mut a);
        assert_eq!(a.title, "Nouveau");
        assert_eq!(a.content, before.content);
        assert_eq!(a.image, before.image);
        assert_eq!(a.published, before.published);
    }

    #[test]
    fn paragraphs_skip_blank_lines() {
        assert_eq!(article().paragraphs(), vec!["Premier paragraphe", "Second"]);
    }

    #[test]
    fn empty_patch() {
        assert!(NewsPatch::default().is_empty());
        assert!(!NewsPatch { published: Some(true), ..Default::default() }.is_empty());
    }
}
