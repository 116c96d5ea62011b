//! The fruit catalog: categories, flesh types, varieties and their two
//! addressing shapes.
//!
//! Apricots are addressed as `category -> id -> variety`. Peaches and
//! nectarines carry a flesh-colour sub-classification and are addressed as
//! `category -> type -> id -> variety`. [`Varieties`] makes the shape a tag
//! instead of a boolean, and every catalog operation matches on it.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::maturity::{self, MaturityPeriod};
use crate::types::RecordId;
use crate::video::VideoSource;

// ---------------------------------------------------------------------------
// Category / type
// ---------------------------------------------------------------------------

/// Top-level fruit classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Abricots,
    Peches,
    Nectarines,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Abricots, Category::Peches, Category::Nectarines];

    /// Persistence / URL value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Abricots => "abricots",
            Self::Peches => "peches",
            Self::Nectarines => "nectarines",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Abricots => "Abricots",
            Self::Peches => "Pêches",
            Self::Nectarines => "Nectarines",
        }
    }

    /// Whether varieties of this category are grouped by [`FruitType`].
    pub fn has_sub_categories(self) -> bool {
        !matches!(self, Self::Abricots)
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abricots" => Ok(Self::Abricots),
            "peches" => Ok(Self::Peches),
            "nectarines" => Ok(Self::Nectarines),
            other => Err(CoreError::Validation(format!(
                "Unknown fruit category '{other}'. Must be one of: abricots, peches, nectarines"
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flesh-colour sub-classification for peaches and nectarines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FruitType {
    Jaune,
    Blanche,
    Sanguine,
    Plate,
}

impl FruitType {
    pub const ALL: [FruitType; 4] = [
        FruitType::Jaune,
        FruitType::Blanche,
        FruitType::Sanguine,
        FruitType::Plate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jaune => "jaune",
            Self::Blanche => "blanche",
            Self::Sanguine => "sanguine",
            Self::Plate => "plate",
        }
    }
}

impl FromStr for FruitType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jaune" => Ok(Self::Jaune),
            "blanche" => Ok(Self::Blanche),
            "sanguine" => Ok(Self::Sanguine),
            "plate" => Ok(Self::Plate),
            other => Err(CoreError::Validation(format!(
                "Unknown fruit type '{other}'. Must be one of: jaune, blanche, sanguine, plate"
            ))),
        }
    }
}

impl fmt::Display for FruitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Variety
// ---------------------------------------------------------------------------

/// A cultivar as shown on the public site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variety {
    pub name: String,
    pub description: String,
    /// Primary image URL.
    pub image: String,
    /// Gallery image URLs, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Technical sheet (PDF) URL, empty when absent.
    #[serde(default)]
    pub technical_sheet: String,
    #[serde(default)]
    pub video: Option<VideoSource>,
    #[serde(default)]
    pub maturity_period: Option<MaturityPeriod>,
}

/// Where a variety sits in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarietyAddress {
    pub category: Category,
    #[serde(rename = "type")]
    pub fruit_type: Option<FruitType>,
}

impl VarietyAddress {
    /// Check that the type parameter fits the category's shape.
    pub fn validate(self) -> Result<Self, CoreError> {
        match (self.category.has_sub_categories(), self.fruit_type) {
            (true, None) => Err(CoreError::Validation(format!(
                "A type is required for category '{}'",
                self.category
            ))),
            (false, Some(t)) => Err(CoreError::Validation(format!(
                "Category '{}' has no types (got '{t}')",
                self.category
            ))),
            _ => Ok(self),
        }
    }
}

// ---------------------------------------------------------------------------
// Varieties: flat vs nested
// ---------------------------------------------------------------------------

/// The varieties of one category, in one of its two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "items", rename_all = "lowercase")]
pub enum Varieties {
    Flat(IndexMap<RecordId, Variety>),
    Nested(IndexMap<FruitType, IndexMap<RecordId, Variety>>),
}

impl Varieties {
    /// Empty collection with the right shape for `category`. Nested
    /// collections start with every type present.
    pub fn empty_for(category: Category) -> Self {
        if category.has_sub_categories() {
            Self::Nested(
                FruitType::ALL
                    .iter()
                    .map(|t| (*t, IndexMap::new()))
                    .collect(),
            )
        } else {
            Self::Flat(IndexMap::new())
        }
    }

    pub fn has_sub_categories(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    /// The id map a variety of `fruit_type` belongs to.
    fn slot_mut(
        &mut self,
        fruit_type: Option<FruitType>,
    ) -> Result<&mut IndexMap<RecordId, Variety>, CoreError> {
        match (self, fruit_type) {
            (Self::Flat(map), None) => Ok(map),
            (Self::Nested(by_type), Some(t)) => Ok(by_type.entry(t).or_default()),
            (Self::Flat(_), Some(t)) => Err(CoreError::Validation(format!(
                "This category has no types (got '{t}')"
            ))),
            (Self::Nested(_), None) => Err(CoreError::Validation(
                "A type is required for this category".into(),
            )),
        }
    }

    fn slot(&self, fruit_type: Option<FruitType>) -> Option<&IndexMap<RecordId, Variety>> {
        match (self, fruit_type) {
            (Self::Flat(map), None) => Some(map),
            (Self::Nested(by_type), Some(t)) => by_type.get(&t),
            _ => None,
        }
    }

    /// Insert or replace the variety stored under `id`.
    pub fn put(
        &mut self,
        fruit_type: Option<FruitType>,
        id: RecordId,
        variety: Variety,
    ) -> Result<(), CoreError> {
        self.slot_mut(fruit_type)?.insert(id, variety);
        Ok(())
    }

    pub fn get(&self, fruit_type: Option<FruitType>, id: &str) -> Option<&Variety> {
        self.slot(fruit_type).and_then(|m| m.get(id))
    }

    /// Remove by id. Removing an absent id is a no-op returning `None`.
    pub fn remove(&mut self, fruit_type: Option<FruitType>, id: &str) -> Option<Variety> {
        match (self, fruit_type) {
            (Self::Flat(map), None) => map.shift_remove(id),
            (Self::Nested(by_type), Some(t)) => by_type.get_mut(&t)?.shift_remove(id),
            _ => None,
        }
    }

    /// Every variety with its type (always `None` for flat collections).
    pub fn iter(&self) -> Box<dyn Iterator<Item = (Option<FruitType>, &RecordId, &Variety)> + '_> {
        match self {
            Self::Flat(map) => Box::new(map.iter().map(|(id, v)| (None, id, v))),
            Self::Nested(by_type) => Box::new(
                by_type
                    .iter()
                    .flat_map(|(t, map)| map.iter().map(move |(id, v)| (Some(*t), id, v))),
            ),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Flat(map) => map.len(),
            Self::Nested(by_type) => by_type.values().map(IndexMap::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Category card image when the category has no usable variety image.
pub const DEFAULT_COVER_IMAGE: &str =
    "https://images.unsplash.com/photo-1528825871115-3581a5387919?auto=format&fit=crop&q=80";

/// One category of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fruit {
    pub name: String,
    pub has_sub_categories: bool,
    pub varieties: Varieties,
}

impl Fruit {
    pub fn empty(category: Category) -> Self {
        Self {
            name: category.label().to_string(),
            has_sub_categories: category.has_sub_categories(),
            varieties: Varieties::empty_for(category),
        }
    }

    /// Image shown on the category card: the first variety's image.
    ///
    /// Only the first type of a nested category is looked at.
    pub fn cover_image(&self) -> &str {
        let first = match &self.varieties {
            Varieties::Flat(map) => map.values().next(),
            Varieties::Nested(by_type) => by_type.values().next().and_then(|m| m.values().next()),
        };
        first
            .map(|v| v.image.as_str())
            .filter(|image| !image.is_empty())
            .unwrap_or(DEFAULT_COVER_IMAGE)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A variety together with its location in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: RecordId,
    pub category: Category,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub fruit_type: Option<FruitType>,
    pub variety: Variety,
}

/// Search hit: enough to link to the variety page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: RecordId,
    pub name: String,
    pub category: Category,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub fruit_type: Option<FruitType>,
    pub description: String,
}

/// The whole catalog, one [`Fruit`] per [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FruitCatalog(IndexMap<Category, Fruit>);

impl Default for FruitCatalog {
    /// The base structure: every category present, no varieties.
    fn default() -> Self {
        Self(Category::ALL.iter().map(|c| (*c, Fruit::empty(*c))).collect())
    }
}

impl FruitCatalog {
    pub fn fruit(&self, category: Category) -> &Fruit {
        // Every category is inserted by `default()` and never removed.
        &self.0[&category]
    }

    fn varieties_mut(&mut self, category: Category) -> &mut Varieties {
        &mut self
            .0
            .entry(category)
            .or_insert_with(|| Fruit::empty(category))
            .varieties
    }

    pub fn put(&mut self, address: VarietyAddress, id: RecordId, variety: Variety) -> Result<(), CoreError> {
        self.varieties_mut(address.category)
            .put(address.fruit_type, id, variety)
    }

    pub fn get(&self, address: VarietyAddress, id: &str) -> Option<&Variety> {
        self.fruit(address.category).varieties.get(address.fruit_type, id)
    }

    pub fn remove(&mut self, address: VarietyAddress, id: &str) -> Option<Variety> {
        self.varieties_mut(address.category)
            .remove(address.fruit_type, id)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&Category, &Fruit)> {
        self.0.iter()
    }

    /// Every variety of the catalog, flattened.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.0
            .iter()
            .flat_map(|(category, fruit)| {
                fruit.varieties.iter().map(move |(fruit_type, id, variety)| CatalogEntry {
                    id: id.clone(),
                    category: *category,
                    fruit_type,
                    variety: variety.clone(),
                })
            })
            .collect()
    }

    /// Varieties at one address, sorted by maturity start.
    pub fn list_by_maturity(&self, address: VarietyAddress) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .entries()
            .into_iter()
            .filter(|e| e.category == address.category && e.fruit_type == address.fruit_type)
            .collect();
        maturity::sort_by_maturity(&mut entries, |e| e.variety.maturity_period.as_ref());
        entries
    }

    /// Case-insensitive substring search over variety names and descriptions.
    ///
    /// A blank query returns nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries()
            .into_iter()
            .filter(|e| {
                e.variety.name.to_lowercase().contains(&needle)
                    || e.variety.description.to_lowercase().contains(&needle)
            })
            .map(|e| SearchHit {
                id: e.id,
                name: e.variety.name,
                category: e.category,
                fruit_type: e.fruit_type,
                description: e.variety.description,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(|f| f.varieties.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn variety(name: &str) -> Variety {
        Variety {
            name: name.into(),
            description: format!("{name} description"),
            image: format!("https://img/{name}.jpg"),
            images: vec![],
            technical_sheet: String::new(),
            video: None,
            maturity_period: None,
        }
    }

    fn flat() -> VarietyAddress {
        VarietyAddress { category: Category::Abricots, fruit_type: None }
    }

    fn jaune_peach() -> VarietyAddress {
        VarietyAddress { category: Category::Peches, fruit_type: Some(FruitType::Jaune) }
    }

    #[test]
    fn default_catalog_has_expected_shapes() {
        let catalog = FruitCatalog::default();
        assert_matches!(catalog.fruit(Category::Abricots).varieties, Varieties::Flat(_));
        assert!(!catalog.fruit(Category::Abricots).has_sub_categories);
        match &catalog.fruit(Category::Nectarines).varieties {
            Varieties::Nested(by_type) => assert_eq!(by_type.len(), 4),
            other => panic!("expected nested, got {other:?}"),
        }
        assert_eq!(catalog.fruit(Category::Peches).name, "Pêches");
        assert!(catalog.is_empty());
    }

    #[test]
    fn cover_image_uses_first_variety_of_first_type() {
        let mut catalog = FruitCatalog::default();
        assert_eq!(catalog.fruit(Category::Peches).cover_image(), DEFAULT_COVER_IMAGE);

        let blanche = VarietyAddress { fruit_type: Some(FruitType::Blanche), ..jaune_peach() };
        catalog.put(blanche, "b1".into(), variety("Blanche")).unwrap();
        assert_eq!(catalog.fruit(Category::Peches).cover_image(), DEFAULT_COVER_IMAGE);

        catalog.put(jaune_peach(), "j1".into(), variety("Royal")).unwrap();
        assert_eq!(catalog.fruit(Category::Peches).cover_image(), "https://img/Royal.jpg");

        catalog.put(flat(), "a1".into(), variety("Bergeron")).unwrap();
        assert_eq!(catalog.fruit(Category::Abricots).cover_image(), "https://img/Bergeron.jpg");
    }

    #[test]
    fn put_get_remove_flat() {
        let mut catalog = FruitCatalog::default();
        catalog.put(flat(), "a1".into(), variety("Bergeron")).unwrap();
        assert_eq!(catalog.get(flat(), "a1").unwrap().name, "Bergeron");
        assert!(catalog.remove(flat(), "a1").is_some());
        assert!(catalog.remove(flat(), "a1").is_none());
    }

    #[test]
    fn put_nested_lands_under_type() {
        let mut catalog = FruitCatalog::default();
        catalog.put(jaune_peach(), "p1".into(), variety("Royal")).unwrap();
        match &catalog.fruit(Category::Peches).varieties {
            Varieties::Nested(by_type) => assert!(by_type[&FruitType::Jaune].contains_key("p1")),
            other => panic!("expected nested, got {other:?}"),
        }
        let blanche = VarietyAddress { fruit_type: Some(FruitType::Blanche), ..jaune_peach() };
        assert!(catalog.get(blanche, "p1").is_none());
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let mut catalog = FruitCatalog::default();
        let typed_apricot = VarietyAddress { category: Category::Abricots, fruit_type: Some(FruitType::Jaune) };
        assert_matches!(catalog.put(typed_apricot, "x".into(), variety("x")), Err(CoreError::Validation(_)));
        let untyped_peach = VarietyAddress { category: Category::Peches, fruit_type: None };
        assert_matches!(catalog.put(untyped_peach, "x".into(), variety("x")), Err(CoreError::Validation(_)));
        assert_matches!(untyped_peach.validate(), Err(CoreError::Validation(_)));
        assert!(jaune_peach().validate().is_ok());
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let mut catalog = FruitCatalog::default();
        catalog.put(flat(), "a1".into(), variety("Bergeron")).unwrap();
        let mut royal = variety("Royal");
        royal.description = "Chair JAUNE et ferme".into();
        catalog.put(jaune_peach(), "p1".into(), royal).unwrap();

        let hits = catalog.search("berg");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, Category::Abricots);
        assert_eq!(hits[0].fruit_type, None);

        let hits = catalog.search("jaune");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].fruit_type, Some(FruitType::Jaune));

        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn list_by_maturity_orders_entries() {
        let mut catalog = FruitCatalog::default();
        for (id, month, day) in [("a", 3, 10), ("b", 1, 5), ("c", 3, 1)] {
            let mut v = variety(id);
            v.maturity_period = Some(MaturityPeriod { start_day: day, start_month: month, end_day: 1, end_month: 9 });
            catalog.put(flat(), id.into(), v).unwrap();
        }
        let ids: Vec<_> = catalog.list_by_maturity(flat()).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn parse_category_and_type() {
        assert_eq!("peches".parse::<Category>().unwrap(), Category::Peches);
        assert!("pommes".parse::<Category>().is_err());
        assert_eq!("plate".parse::<FruitType>().unwrap(), FruitType::Plate);
        assert!("verte".parse::<FruitType>().is_err());
    }
}
