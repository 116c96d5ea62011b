//! Rows of the `planifruits` table.

use serde::{Deserialize, Serialize};

use acfruit_core::catalog::FruitType;
use acfruit_core::error::CoreError;
use acfruit_core::planifruit::{Planifruit, PlanifruitDraft, PlanifruitPatch};
use acfruit_core::types::{RecordId, Timestamp};

use super::id_string;

/// A row from the `planifruits` table.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanifruitRow {
    #[serde(deserialize_with = "id_string")]
    pub id: RecordId,
    pub category: String,
    #[serde(rename = "type", default)]
    pub fruit_type: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl TryFrom<PlanifruitRow> for Planifruit {
    type Error = CoreError;

    fn try_from(row: PlanifruitRow) -> Result<Self, Self::Error> {
        let fruit_type = row
            .fruit_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::parse::<FruitType>)
            .transpose()?;
        Ok(Self {
            id: row.id,
            category: row.category.parse()?,
            fruit_type,
            image: row.image.unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert payload for the `planifruits` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlanifruitRow<'a> {
    pub category: &'static str,
    #[serde(rename = "type")]
    pub fruit_type: Option<&'static str>,
    pub image: &'a str,
}

impl<'a> From<&'a PlanifruitDraft> for NewPlanifruitRow<'a> {
    fn from(d: &'a PlanifruitDraft) -> Self {
        Self {
            category: d.category.as_str(),
            fruit_type: d.fruit_type.map(FruitType::as_str),
            image: &d.image,
        }
    }
}

/// Columns sent for a partial update. `type: Some(None)` writes `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanifruitPatchRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub fruit_type: Option<Option<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,
}

impl<'a> From<&'a PlanifruitPatch> for PlanifruitPatchRow<'a> {
    fn from(p: &'a PlanifruitPatch) -> Self {
        let PlanifruitPatch { category, fruit_type, image } = p;
        Self {
            category: category.map(|c| c.as_str()),
            fruit_type: fruit_type.map(|t| t.map(FruitType::as_str)),
            image: image.as_deref(),
        }
    }
}
