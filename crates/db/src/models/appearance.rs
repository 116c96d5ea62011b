//! The single row of the `appearance` table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use acfruit_core::appearance::{
    empty_category_map, Appearance, SocialMedia, DEFAULT_HEADER_IMAGE, DEFAULT_HEADER_SUBTITLE,
    DEFAULT_HEADER_TITLE,
};
use acfruit_core::types::RecordId;

use super::{id_string, non_empty};

/// A row from the `appearance` table. Every column is nullable in practice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppearanceRow {
    #[serde(deserialize_with = "id_string")]
    pub id: RecordId,
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub header_video: Option<String>,
    #[serde(default)]
    pub use_video: Option<bool>,
    #[serde(default)]
    pub header_title: Option<String>,
    #[serde(default)]
    pub header_subtitle: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub category_images: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub category_icons: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub homepage_banner: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub social_media: Option<SocialMedia>,
    #[serde(default)]
    pub maps_embed_url: Option<String>,
}

/// Empty strings count as missing.
fn text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<AppearanceRow> for Appearance {
    /// Missing or empty columns fall back to the stock values one by one.
    fn from(row: AppearanceRow) -> Self {
        Self {
            header_image: text(row.header_image).unwrap_or_else(|| DEFAULT_HEADER_IMAGE.into()),
            header_video: text(row.header_video).unwrap_or_default(),
            use_video: row.use_video.unwrap_or(false),
            header_title: text(row.header_title).unwrap_or_else(|| DEFAULT_HEADER_TITLE.into()),
            header_subtitle: text(row.header_subtitle)
                .unwrap_or_else(|| DEFAULT_HEADER_SUBTITLE.into()),
            logo: text(row.logo).unwrap_or_default(),
            category_images: row.category_images.unwrap_or_else(empty_category_map),
            category_icons: row.category_icons.unwrap_or_else(empty_category_map),
            homepage_banner: text(row.homepage_banner).unwrap_or_default(),
            company_name: text(row.company_name).unwrap_or_default(),
            address: text(row.address).unwrap_or_default(),
            phone: text(row.phone).unwrap_or_default(),
            email: text(row.email).unwrap_or_default(),
            website: text(row.website).unwrap_or_default(),
            social_media: row.social_media.unwrap_or_default(),
            maps_embed_url: text(row.maps_embed_url).unwrap_or_default(),
        }
    }
}

/// Full-record write, used both to insert the row and to update it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppearanceWriteRow {
    pub header_image: String,
    pub header_video: Option<String>,
    pub use_video: bool,
    pub header_title: String,
    pub header_subtitle: String,
    pub logo: Option<String>,
    pub category_images: BTreeMap<String, String>,
    pub category_icons: BTreeMap<String, String>,
    pub homepage_banner: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub social_media: SocialMedia,
    pub maps_embed_url: Option<String>,
}

impl From<&Appearance> for AppearanceWriteRow {
    fn from(a: &Appearance) -> Self {
        Self {
            header_image: a.header_image.clone(),
            header_video: non_empty(&a.header_video),
            use_video: a.use_video,
            header_title: a.header_title.clone(),
            header_subtitle: a.header_subtitle.clone(),
            logo: non_empty(&a.logo),
            category_images: a.category_images.clone(),
            category_icons: a.category_icons.clone(),
            homepage_banner: non_empty(&a.homepage_banner),
            company_name: non_empty(&a.company_name),
            address: non_empty(&a.address),
            phone: non_empty(&a.phone),
            email: non_empty(&a.email),
            website: non_empty(&a.website),
            social_media: a.social_media.clone(),
            maps_embed_url: non_empty(&a.maps_embed_url),
        }
    }
}
