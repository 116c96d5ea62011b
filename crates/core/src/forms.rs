//! Admin form payloads and their submit-time validation.
//!
//! Validation happens here, before any store call, so a rejected form never
//! reaches persistence. The stores themselves validate nothing.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::catalog::{Category, FruitType, Variety, VarietyAddress};
use crate::error::CoreError;
use crate::events::EventDraft;
use crate::maturity::MaturityPeriod;
use crate::news::NewsDraft;
use crate::planifruit::PlanifruitDraft;
use crate::video::VideoSource;

const REQUIRED_FIELDS: &str = "Please fill in all required fields";

/// Run `validator` rules and flatten failures into one [`CoreError::Validation`].
pub fn validate_form<T: Validate>(form: &T) -> Result<(), CoreError> {
    form.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        messages.dedup();
        CoreError::Validation(messages.join("; "))
    })
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

// ---------------------------------------------------------------------------
// Variety
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_variety"))]
pub struct VarietyForm {
    pub category: Category,
    #[serde(rename = "type", default)]
    pub fruit_type: Option<FruitType>,
    #[validate(length(min = 1, message = "Please fill in all required fields"))]
    pub name: String,
    #[validate(length(min = 1, message = "Please fill in all required fields"))]
    pub description: String,
    #[validate(length(min = 1, message = "Please fill in all required fields"))]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub technical_sheet: String,
    #[serde(default)]
    pub video: Option<VideoSource>,
    #[serde(default)]
    pub maturity_period: Option<MaturityPeriod>,
}

fn validate_variety(form: &VarietyForm) -> Result<(), ValidationError> {
    let address = VarietyAddress {
        category: form.category,
        fruit_type: form.fruit_type,
    };
    if address.validate().is_err() {
        return Err(if form.category.has_sub_categories() {
            rule("type_required", "Please select a type")
        } else {
            rule("type_forbidden", "This category has no types")
        });
    }
    if let Some(p) = &form.maturity_period {
        let day_ok = |d: u8| (1..=31).contains(&d);
        let month_ok = |m: u8| (1..=12).contains(&m);
        if !(day_ok(p.start_day) && day_ok(p.end_day) && month_ok(p.start_month) && month_ok(p.end_month)) {
            return Err(rule(
                "maturity_range",
                "Maturity days must be 1-31 and months 1-12",
            ));
        }
    }
    Ok(())
}

impl VarietyForm {
    pub fn address(&self) -> VarietyAddress {
        VarietyAddress {
            category: self.category,
            fruit_type: self.fruit_type,
        }
    }

    /// Validate, then split into the catalog address and the variety.
    pub fn into_parts(self) -> Result<(VarietyAddress, Variety), CoreError> {
        validate_form(&self)?;
        let address = self.address();
        let video = self.video.filter(|v| !v.url().trim().is_empty());
        Ok((
            address,
            Variety {
                name: self.name,
                description: self.description,
                image: self.image,
                images: self.images,
                technical_sheet: self.technical_sheet,
                video,
                maturity_period: self.maturity_period,
            },
        ))
    }
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewsForm {
    #[validate(length(min = 1, message = "Please fill in all required fields"))]
    pub title: String,
    #[validate(length(min = 1, message = "Please fill in all required fields"))]
    pub content: String,
    #[validate(length(min = 1, message = "Please fill in all required fields"))]
    pub image: String,
    #[serde(default)]
    pub published: bool,
}

impl NewsForm {
    pub fn into_draft(self) -> Result<NewsDraft, CoreError> {
        validate_form(&self)?;
        Ok(NewsDraft {
            title: self.title,
            content: self.content,
            image: self.image,
            published: self.published,
        })
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_event_dates"))]
pub struct EventForm {
    #[validate(length(min = 1, message = "Please fill in all required fields"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(required(message = "Please fill in all required fields"))]
    pub start_date: Option<NaiveDate>,
    #[validate(required(message = "Please fill in all required fields"))]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub image: String,
    #[validate(length(min = 1, message = "Please fill in all required fields"))]
    pub location: String,
    #[serde(default)]
    pub published: bool,
}

fn validate_event_dates(form: &EventForm) -> Result<(), ValidationError> {
    check_event_dates(form.start_date, form.end_date)
}

/// End must not precede start. Missing dates are reported elsewhere.
pub fn check_event_dates(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(rule(
            "date_order",
            "The end date must not be before the start date",
        )),
        _ => Ok(()),
    }
}

impl EventForm {
    pub fn into_draft(self) -> Result<EventDraft, CoreError> {
        validate_form(&self)?;
        let (Some(start_date), Some(end_date)) = (self.start_date, self.end_date) else {
            return Err(CoreError::Validation(REQUIRED_FIELDS.into()));
        };
        Ok(EventDraft {
            title: self.title,
            description: self.description,
            start_date,
            end_date,
            image: self.image,
            location: self.location,
            published: self.published,
        })
    }
}

// ---------------------------------------------------------------------------
// Planifruit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_planifruit"))]
pub struct PlanifruitForm {
    #[validate(required(message = "Please select a category"))]
    pub category: Option<Category>,
    #[serde(rename = "type", default)]
    pub fruit_type: Option<FruitType>,
    #[validate(length(min = 1, message = "Please add an image"))]
    pub image: String,
}

fn validate_planifruit(form: &PlanifruitForm) -> Result<(), ValidationError> {
    match form.category {
        Some(c) if c.has_sub_categories() && form.fruit_type.is_none() => {
            Err(rule("type_required", "Please select a type"))
        }
        _ => Ok(()),
    }
}

impl PlanifruitForm {
    pub fn into_draft(self) -> Result<PlanifruitDraft, CoreError> {
        validate_form(&self)?;
        let category = self
            .category
            .ok_or_else(|| CoreError::Validation("Please select a category".into()))?;
        // A type sent along with apricots is meaningless; drop it.
        let fruit_type = self.fruit_type.filter(|_| category.has_sub_categories());
        Ok(PlanifruitDraft {
            category,
            fruit_type,
            image: self.image,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_form(start: NaiveDate, end: NaiveDate) -> EventForm {
        EventForm {
            title: "Salon".into(),
            description: String::new(),
            start_date: Some(start),
            end_date: Some(end),
            image: String::new(),
            location: "Avignon".into(),
            published: false,
        }
    }

    #[test]
    fn event_end_before_start_is_rejected() {
        let err = event_form(date(2024, 6, 10), date(2024, 6, 1)).into_draft().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("end date"));
    }

    #[test]
    fn single_day_event_is_accepted() {
        let draft = event_form(date(2024, 6, 10), date(2024, 6, 10)).into_draft().unwrap();
        assert_eq!(draft.start_date, draft.end_date);
    }

    #[test]
    fn event_missing_location_is_rejected() {
        let mut form = event_form(date(2024, 6, 1), date(2024, 6, 2));
        form.location.clear();
        assert_matches!(form.into_draft(), Err(CoreError::Validation(msg)) if msg == REQUIRED_FIELDS);
    }

    #[test]
    fn event_missing_date_is_rejected() {
        let mut form = event_form(date(2024, 6, 1), date(2024, 6, 2));
        form.end_date = None;
        assert_matches!(form.into_draft(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn news_requires_title_content_image() {
        let form = NewsForm {
            title: "Titre".into(),
            content: String::new(),
            image: "https://img/x.jpg".into(),
            published: true,
        };
        assert_matches!(form.into_draft(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn planifruit_peaches_need_a_type() {
        let form = PlanifruitForm {
            category: Some(Category::Peches),
            fruit_type: None,
            image: "https://img/chart.png".into(),
        };
        assert_matches!(form.into_draft(), Err(CoreError::Validation(msg)) if msg.contains("type"));

        let form = PlanifruitForm {
            category: Some(Category::Abricots),
            fruit_type: Some(FruitType::Jaune),
            image: "https://img/chart.png".into(),
        };
        assert_eq!(form.into_draft().unwrap().fruit_type, None);
    }

    #[test]
    fn planifruit_requires_category_and_image() {
        let form = PlanifruitForm {
            category: None,
            fruit_type: None,
            image: String::new(),
        };
        let err = form.into_draft().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("category") && msg.contains("image"));
    }

    #[test]
    fn variety_form_checks_shape_and_maturity() {
        let json = serde_json::json!({
            "category": "peches",
            "name": "Royal",
            "description": "Pêche jaune",
            "image": "https://img/royal.jpg"
        });
        let form: VarietyForm = serde_json::from_value(json.clone()).unwrap();
        assert_matches!(form.into_parts(), Err(CoreError::Validation(msg)) if msg.contains("type"));

        let mut with_type = json;
        with_type["type"] = "jaune".into();
        with_type["maturityPeriod"] = serde_json::json!({
            "startDay": 40, "startMonth": 6, "endDay": 1, "endMonth": 7
        });
        let form: VarietyForm = serde_json::from_value(with_type.clone()).unwrap();
        assert_matches!(form.into_parts(), Err(CoreError::Validation(msg)) if msg.contains("Maturity"));

        with_type["maturityPeriod"]["startDay"] = 10.into();
        let form: VarietyForm = serde_json::from_value(with_type).unwrap();
        let (address, variety) = form.into_parts().unwrap();
        assert_eq!(address.fruit_type, Some(FruitType::Jaune));
        assert_eq!(variety.maturity_period.unwrap().start_key(), (6, 10));
    }

    #[test]
    fn empty_video_url_is_dropped() {
        let form: VarietyForm = serde_json::from_value(serde_json::json!({
            "category": "abricots",
            "name": "Bergeron",
            "description": "Abricot tardif",
            "image": "https://img/b.jpg",
            "video": { "type": "local", "url": "" }
        }))
        .unwrap();
        let (_, variety) = form.into_parts().unwrap();
        assert_eq!(variety.video, None);
    }
}
