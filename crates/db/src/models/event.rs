//! Rows of the `events` table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use acfruit_core::events::{Event, EventDraft, EventPatch};
use acfruit_core::types::{RecordId, Timestamp};

use super::{date_prefix, id_string, non_empty};

/// A row from the `events` table.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    #[serde(deserialize_with = "id_string")]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "date_prefix")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "date_prefix")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            start_date: row.start_date,
            end_date: row.end_date,
            image: row.image.unwrap_or_default(),
            location: row.location.unwrap_or_default(),
            published: row.published.unwrap_or(false),
        }
    }
}

/// Insert payload for the `events` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewEventRow {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image: Option<String>,
    pub location: String,
    pub published: bool,
}

impl From<&EventDraft> for NewEventRow {
    fn from(d: &EventDraft) -> Self {
        Self {
            title: d.title.clone(),
            description: non_empty(&d.description),
            start_date: d.start_date,
            end_date: d.end_date,
            image: non_empty(&d.image),
            location: d.location.clone(),
            published: d.published,
        }
    }
}

/// Columns sent for a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventPatchRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl<'a> From<&'a EventPatch> for EventPatchRow<'a> {
    fn from(p: &'a EventPatch) -> Self {
        let EventPatch {
            title,
            description,
            start_date,
            end_date,
            image,
            location,
            published,
        } = p;
        Self {
            title: title.as_deref(),
            description: description.as_deref(),
            start_date: *start_date,
            end_date: *end_date,
            image: image.as_deref(),
            location: location.as_deref(),
            published: *published,
        }
    }
}
