//! Row types for each table, snake_case as stored.
//!
//! Each submodule contains:
//! - A `Deserialize` row struct matching what a select returns
//! - A `Serialize` insert row built from a domain draft
//! - A `Serialize` patch row built from the domain partial-update type
//!
//! Conversions into domain values live next to the rows.

pub mod appearance;
pub mod event;
pub mod fruit;
pub mod news;
pub mod planifruit;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use acfruit_core::types::RecordId;

/// Accept ids stored as text (uuid) or as integers.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Accept `date` columns as well as timestamps: only `YYYY-MM-DD` is kept.
pub(crate) fn date_prefix<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

/// `None` for empty strings, so optional text columns store `NULL`.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
