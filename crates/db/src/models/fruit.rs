//! Rows of the `fruits` table. One row per variety; `type` is null for
//! categories without sub-types.

use serde::{Deserialize, Serialize};

use acfruit_core::catalog::{Category, FruitType, Variety, VarietyAddress};
use acfruit_core::error::CoreError;
use acfruit_core::maturity::MaturityPeriod;
use acfruit_core::types::{RecordId, Timestamp};
use acfruit_core::video::VideoSource;

use super::{id_string, non_empty};

/// A row from the `fruits` table.
#[derive(Debug, Clone, Deserialize)]
pub struct FruitRow {
    #[serde(deserialize_with = "id_string")]
    pub id: RecordId,
    pub category: String,
    #[serde(rename = "type", default)]
    pub fruit_type: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub technical_sheet: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub maturity_start_day: Option<i64>,
    #[serde(default)]
    pub maturity_start_month: Option<i64>,
    #[serde(default)]
    pub maturity_end_day: Option<i64>,
    #[serde(default)]
    pub maturity_end_month: Option<i64>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl FruitRow {
    /// Where the row sits in the catalog. Fails when the category or type
    /// is unknown, or when the type does not fit the category's shape.
    pub fn address(&self) -> Result<VarietyAddress, CoreError> {
        let category: Category = self.category.parse()?;
        let fruit_type = self
            .fruit_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::parse::<FruitType>)
            .transpose()?;
        VarietyAddress { category, fruit_type }.validate()
    }

    pub fn into_entry(self) -> Result<(VarietyAddress, RecordId, Variety), CoreError> {
        let address = self.address()?;
        let small = |v: Option<i64>| v.and_then(|n| u8::try_from(n).ok());
        let variety = Variety {
            name: self.name,
            description: self.description.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            images: self.images.unwrap_or_default(),
            technical_sheet: self.technical_sheet.unwrap_or_default(),
            video: VideoSource::from_stored_url(self.video_url.as_deref()),
            maturity_period: MaturityPeriod::from_columns(
                small(self.maturity_start_day),
                small(self.maturity_start_month),
                small(self.maturity_end_day),
                small(self.maturity_end_month),
            ),
        };
        Ok((address, self.id, variety))
    }
}

/// Variety columns, written whole on insert and on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarietyColumns {
    pub name: String,
    pub description: String,
    pub image: String,
    pub images: Vec<String>,
    pub technical_sheet: Option<String>,
    pub video_url: Option<String>,
    pub maturity_start_day: Option<u8>,
    pub maturity_start_month: Option<u8>,
    pub maturity_end_day: Option<u8>,
    pub maturity_end_month: Option<u8>,
}

impl From<&Variety> for VarietyColumns {
    fn from(v: &Variety) -> Self {
        let period = v.maturity_period.as_ref();
        Self {
            name: v.name.clone(),
            description: v.description.clone(),
            image: v.image.clone(),
            images: v.images.clone(),
            technical_sheet: non_empty(&v.technical_sheet),
            video_url: v.video.as_ref().and_then(|s| non_empty(s.url())),
            maturity_start_day: period.map(|p| p.start_day),
            maturity_start_month: period.map(|p| p.start_month),
            maturity_end_day: period.map(|p| p.end_day),
            maturity_end_month: period.map(|p| p.end_month),
        }
    }
}

/// Insert payload for the `fruits` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewFruitRow {
    pub category: &'static str,
    #[serde(rename = "type")]
    pub fruit_type: Option<&'static str>,
    #[serde(flatten)]
    pub columns: VarietyColumns,
}

impl NewFruitRow {
    pub fn new(address: VarietyAddress, variety: &Variety) -> Self {
        Self {
            category: address.category.as_str(),
            fruit_type: address.fruit_type.map(FruitType::as_str),
            columns: VarietyColumns::from(variety),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn row(value: serde_json::Value) -> FruitRow {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn nested_row_with_youtube_and_full_maturity() {
        let (address, id, variety) = row(json!({
            "id": "f1",
            "category": "peches",
            "type": "jaune",
            "name": "Royal",
            "description": "Chair ferme",
            "image": "https://img/r.jpg",
            "images": null,
            "technical_sheet": null,
            "video_url": "https://youtu.be/dQw4w9WgXcQ",
            "maturity_start_day": 5,
            "maturity_start_month": 6,
            "maturity_end_day": 20,
            "maturity_end_month": 7,
            "created_at": "2024-05-01T10:00:00+00:00"
        }))
        .into_entry()
        .unwrap();

        assert_eq!(id, "f1");
        assert_eq!(address.fruit_type, Some(FruitType::Jaune));
        assert_matches!(variety.video, Some(VideoSource::Youtube { .. }));
        assert_eq!(variety.maturity_period.unwrap().start_key(), (6, 5));
        assert!(variety.images.is_empty());
        assert_eq!(variety.technical_sheet, "");
    }

    #[test]
    fn partial_maturity_is_dropped() {
        let (_, _, variety) = row(json!({
            "id": 7,
            "category": "abricots",
            "type": null,
            "name": "Bergeron",
            "maturity_start_day": 1,
            "maturity_start_month": 7
        }))
        .into_entry()
        .unwrap();
        assert_eq!(variety.maturity_period, None);
        assert_eq!(variety.video, None);
    }

    #[test]
    fn misfit_shapes_are_errors() {
        let typed_apricot = row(json!({ "id": "x", "category": "abricots", "type": "jaune", "name": "x" }));
        assert_matches!(typed_apricot.into_entry(), Err(CoreError::Validation(_)));
        let untyped_peach = row(json!({ "id": "x", "category": "peches", "name": "x" }));
        assert_matches!(untyped_peach.into_entry(), Err(CoreError::Validation(_)));
        let unknown = row(json!({ "id": "x", "category": "pommes", "name": "x" }));
        assert!(unknown.into_entry().is_err());
    }

    #[test]
    fn insert_row_uses_nulls_for_empty_optionals() {
        let variety = Variety {
            name: "Bergeron".into(),
            description: "d".into(),
            image: "i".into(),
            images: vec![],
            technical_sheet: String::new(),
            video: None,
            maturity_period: None,
        };
        let address = VarietyAddress { category: Category::Abricots, fruit_type: None };
        let value = serde_json::to_value(NewFruitRow::new(address, &variety)).unwrap();
        assert_eq!(value["category"], "abricots");
        assert_eq!(value["type"], serde_json::Value::Null);
        assert_eq!(value["technical_sheet"], serde_json::Value::Null);
        assert_eq!(value["video_url"], serde_json::Value::Null);
        assert_eq!(value["images"], json!([]));
    }
}
