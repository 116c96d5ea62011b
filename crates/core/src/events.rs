//! Events (fairs, open days, tastings).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// An event. Only `published` events reach the public page; the
/// authenticated calendar shows all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image: String,
    pub location: String,
    pub published: bool,
}

impl Event {
    /// Whether `day` falls inside the event, bounds included.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

/// Fields of a new event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub image: String,
    pub location: String,
    #[serde(default)]
    pub published: bool,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub published: Option<bool>,
}

impl EventPatch {
    /// Shallow-merge into a local event.
    pub fn apply(&self, event: &mut Event) {
        let EventPatch {
            title,
            description,
            start_date,
            end_date,
            image,
            location,
            published,
        } = self;
        if let Some(v) = title {
            event.title = v.clone();
        }
        if let Some(v) = description {
            event.description = v.clone();
        }
        if let Some(v) = start_date {
            event.start_date = *v;
        }
        if let Some(v) = end_date {
            event.end_date = *v;
        }
        if let Some(v) = image {
            event.image = v.clone();
        }
        if let Some(v) = location {
            event.location = v.clone();
        }
        if let Some(v) = published {
            event.published = *v;
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event() -> Event {
        Event {
            id: "e1".into(),
            title: "Portes ouvertes".into(),
            description: String::new(),
            start_date: date(2024, 6, 1),
            end_date: date(2024, 6, 3),
            image: String::new(),
            location: "Verger".into(),
            published: true,
        }
    }

    #[test]
    fn apply_is_shallow() {
        let mut e = event();
        EventPatch {
            end_date: Some(date(2024, 6, 5)),
            published: Some(false),
            ..Default::default()
        }
        .apply(&mut e);
        assert_eq!(e.end_date, date(2024, 6, 5));
        assert!(!e.published);
        assert_eq!(e.start_date, date(2024, 6, 1));
        assert_eq!(e.title, "Portes ouvertes");
    }

    #[test]
    fn covers_includes_bounds() {
        let e = event();
        assert!(e.covers(date(2024, 6, 1)));
        assert!(e.covers(date(2024, 6, 3)));
        assert!(!e.covers(date(2024, 6, 4)));
    }
}
