//! Site appearance: the singleton configuration record behind the header,
//! category tiles, homepage banner and contact page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Header image used until an editor uploads one.
pub const DEFAULT_HEADER_IMAGE: &str =
    "https://images.unsplash.com/photo-1528825871115-3581a5387919?auto=format&fit=crop&q=80";
pub const DEFAULT_HEADER_TITLE: &str = "Bienvenue chez AC Fruit";
pub const DEFAULT_HEADER_SUBTITLE: &str = "Découvrez nos fruits d'exception";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub facebook: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub header_image: String,
    pub header_video: String,
    pub use_video: bool,
    pub header_title: String,
    pub header_subtitle: String,
    pub logo: String,
    /// Tile image per category, keyed by category slug.
    pub category_images: BTreeMap<String, String>,
    /// Icon per category, keyed by category slug.
    pub category_icons: BTreeMap<String, String>,
    pub homepage_banner: String,
    pub company_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub social_media: SocialMedia,
    pub maps_embed_url: String,
}

/// One empty entry per category.
pub fn empty_category_map() -> BTreeMap<String, String> {
    Category::ALL
        .iter()
        .map(|c| (c.as_str().to_string(), String::new()))
        .collect()
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            header_image: DEFAULT_HEADER_IMAGE.into(),
            header_video: String::new(),
            use_video: false,
            header_title: DEFAULT_HEADER_TITLE.into(),
            header_subtitle: DEFAULT_HEADER_SUBTITLE.into(),
            logo: String::new(),
            category_images: empty_category_map(),
            category_icons: empty_category_map(),
            homepage_banner: String::new(),
            company_name: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            website: String::new(),
            social_media: SocialMedia::default(),
            maps_embed_url: String::new(),
        }
    }
}

/// Contact block shown on the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub company_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub social_media: SocialMedia,
    pub maps_embed_url: String,
}

impl Appearance {
    pub fn contact(&self) -> ContactDetails {
        ContactDetails {
            company_name: self.company_name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            social_media: self.social_media.clone(),
            maps_embed_url: self.maps_embed_url.clone(),
        }
    }
}

/// Partial update. The store merges it into the current record and writes
/// the merged record as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearancePatch {
    pub header_image: Option<String>,
    pub header_video: Option<String>,
    pub use_video: Option<bool>,
    pub header_title: Option<String>,
    pub header_subtitle: Option<String>,
    pub logo: Option<String>,
    pub category_images: Option<BTreeMap<String, String>>,
    pub category_icons: Option<BTreeMap<String, String>>,
    pub homepage_banner: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub social_media: Option<SocialMedia>,
    pub maps_embed_url: Option<String>,
}

impl AppearancePatch {
    /// Shallow-merge into `appearance`. Nested maps are replaced whole.
    pub fn apply(&self, appearance: &mut Appearance) {
        let AppearancePatch {
            header_image,
            header_video,
            use_video,
            header_title,
            header_subtitle,
            logo,
            category_images,
            category_icons,
            homepage_banner,
            company_name,
            address,
            phone,
            email,
            website,
            social_media,
            maps_embed_url,
        } = self;

        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set(&mut appearance.header_image, header_image);
        set(&mut appearance.header_video, header_video);
        set(&mut appearance.use_video, use_video);
        set(&mut appearance.header_title, header_title);
        set(&mut appearance.header_subtitle, header_subtitle);
        set(&mut appearance.logo, logo);
        set(&mut appearance.category_images, category_images);
        set(&mut appearance.category_icons, category_icons);
        set(&mut appearance.homepage_banner, homepage_banner);
        set(&mut appearance.company_name, company_name);
        set(&mut appearance.address, address);
        set(&mut appearance.phone, phone);
        set(&mut appearance.email, email);
        set(&mut appearance.website, website);
        set(&mut appearance.social_media, social_media);
        set(&mut appearance.maps_embed_url, maps_embed_url);
    }

    /// Current value merged with this patch, leaving `current` untouched.
    pub fn merged(&self, current: &Appearance) -> Appearance {
        let mut next = current.clone();
        self.apply(&mut next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_stock_header() {
        let a = Appearance::default();
        assert_eq!(a.header_title, DEFAULT_HEADER_TITLE);
        assert_eq!(a.header_image, DEFAULT_HEADER_IMAGE);
        assert_eq!(a.category_images.len(), 3);
        assert_eq!(a.category_images["peches"], "");
        assert!(!a.use_video);
    }

    #[test]
    fn merged_keeps_unpatched_fields() {
        let current = Appearance {
            phone: "04 00 00 00 00".into(),
            ..Appearance::default()
        };
        let patch = AppearancePatch {
            company_name: Some("AC Fruit".into()),
            use_video: Some(true),
            ..Default::default()
        };
        let next = patch.merged(&current);
        assert_eq!(next.company_name, "AC Fruit");
        assert!(next.use_video);
        assert_eq!(next.phone, "04 00 00 00 00");
        assert_eq!(current.company_name, "");
    }

    #[test]
    fn contact_projects_company_fields() {
        let a = Appearance {
            email: "contact@acfruit.com".into(),
            ..Appearance::default()
        };
        assert_eq!(a.contact().email, "contact@acfruit.com");
    }
}
