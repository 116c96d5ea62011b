//! Planifruits: maturity-calendar charts for a category (and type).

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, FruitType};
use crate::types::{double_option, RecordId, Timestamp};

/// A maturity chart. Several charts may share the same (category, type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planifruit {
    pub id: RecordId,
    pub category: Category,
    #[serde(rename = "type")]
    pub fruit_type: Option<FruitType>,
    pub image: String,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Planifruit {
    /// Whether this chart answers a lookup for `category` and, when given,
    /// `fruit_type`. An omitted type matches any chart of the category.
    pub fn matches(&self, category: Category, fruit_type: Option<FruitType>) -> bool {
        self.category == category && fruit_type.is_none_or(|t| self.fruit_type == Some(t))
    }
}

/// Fields of a new chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanifruitDraft {
    pub category: Category,
    #[serde(rename = "type", default)]
    pub fruit_type: Option<FruitType>,
    pub image: String,
}

/// Partial update. `type: null` clears the type; an absent `type` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanifruitPatch {
    pub category: Option<Category>,
    #[serde(rename = "type", default, deserialize_with = "double_option")]
    pub fruit_type: Option<Option<FruitType>>,
    pub image: Option<String>,
}

impl PlanifruitPatch {
    /// Shallow-merge into a local chart.
    pub fn apply(&self, planifruit: &mut Planifruit) {
        let PlanifruitPatch { category, fruit_type, image } = self;
        if let Some(v) = category {
            planifruit.category = *v;
        }
        if let Some(v) = fruit_type {
            planifruit.fruit_type = *v;
        }
        if let Some(v) = image {
            planifruit.image = v.clone();
        }
    }
}
