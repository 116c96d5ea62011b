//! Handlers for the variety catalog: public pages and the admin dashboard.

use acfruit_core::catalog::{CatalogEntry, Category, Fruit, FruitCatalog, FruitType, VarietyAddress};
use acfruit_core::forms::VarietyForm;
use acfruit_core::types::RecordId;
use acfruit_core::video::VideoSource;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A variety as rendered on its page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VarietyView {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    /// `dd/mm au dd/mm`, absent when no maturity window is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_label: Option<String>,
    /// Embed URL for YouTube, public storage URL for uploads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_playback_url: Option<String>,
}

impl VarietyView {
    fn new(state: &AppState, entry: CatalogEntry) -> Self {
        let video_playback_url = entry.variety.video.as_ref().map(|video| match video {
            VideoSource::Local { url } => state.stores.media.resolve_url("videos", url),
            VideoSource::Youtube { .. } => video.playback_url(),
        });
        Self {
            maturity_label: entry.variety.maturity_period.as_ref().map(|p| p.display_range()),
            video_playback_url,
            entry,
        }
    }
}

/// What `/fruits/{category}/{segment}` resolves to.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SegmentPage {
    /// A flesh type of a sub-categorized fruit, varieties by maturity.
    Type {
        category: Category,
        #[serde(rename = "type")]
        fruit_type: FruitType,
        varieties: Vec<VarietyView>,
    },
    /// A variety of a flat fruit.
    Variety(VarietyView),
}

fn parse_category(raw: &str) -> AppResult<Category> {
    Ok(raw.parse::<Category>()?)
}

fn parse_type(raw: &str) -> AppResult<FruitType> {
    Ok(raw.parse::<FruitType>()?)
}

async fn find_variety(state: &AppState, address: VarietyAddress, id: &str) -> AppResult<VarietyView> {
    let variety = state
        .stores
        .fruits
        .variety(address, id)
        .await
        .ok_or_else(|| AppError::not_found("Variety", id))?;
    Ok(VarietyView::new(
        state,
        CatalogEntry {
            id: id.to_string(),
            category: address.category,
            fruit_type: address.fruit_type,
            variety,
        },
    ))
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/fruits
pub async fn list_fruits(State(state): State<AppState>) -> Json<DataResponse<FruitCatalog>> {
    Json(DataResponse::new(state.stores.fruits.catalog().await))
}

/// GET /api/v1/fruits/{category}
pub async fn get_fruit(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<DataResponse<Fruit>>> {
    let category = parse_category(&category)?;
    Ok(Json(DataResponse::new(state.stores.fruits.fruit(category).await)))
}

/// GET /api/v1/fruits/{category}/{segment}
///
/// `segment` is a flesh type for peaches and nectarines, and a variety id
/// for apricots.
pub async fn get_fruit_segment(
    State(state): State<AppState>,
    Path((category, segment)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<SegmentPage>>> {
    let category = parse_category(&category)?;

    let page = if category.has_sub_categories() {
        let fruit_type = parse_type(&segment)?;
        let address = VarietyAddress { category, fruit_type: Some(fruit_type) };
        let entries = state.stores.fruits.list_by_maturity(address).await;
        SegmentPage::Type {
            category,
            fruit_type,
            varieties: entries.into_iter().map(|e| VarietyView::new(&state, e)).collect(),
        }
    } else {
        let address = VarietyAddress { category, fruit_type: None };
        SegmentPage::Variety(find_variety(&state, address, &segment).await?)
    };

    Ok(Json(DataResponse::new(page)))
}

/// GET /api/v1/fruits/{category}/{type}/{variety}
pub async fn get_typed_variety(
    State(state): State<AppState>,
    Path((category, fruit_type, id)): Path<(String, String, RecordId)>,
) -> AppResult<Json<DataResponse<VarietyView>>> {
    let address = VarietyAddress {
        category: parse_category(&category)?,
        fruit_type: Some(parse_type(&fruit_type)?),
    }
    .validate()?;
    Ok(Json(DataResponse::new(find_variety(&state, address, &id).await?)))
}

// ---------------------------------------------------------------------------
// Admin dashboard
// ---------------------------------------------------------------------------

/// Where a variety lives, for routes that only carry its id.
#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    pub category: Category,
    #[serde(rename = "type")]
    pub fruit_type: Option<FruitType>,
}

impl From<AddressQuery> for VarietyAddress {
    fn from(q: AddressQuery) -> Self {
        Self {
            category: q.category,
            fruit_type: q.fruit_type,
        }
    }
}

/// GET /api/v1/admin/dashboard/varieties
///
/// Every variety with its address, catalog order.
pub async fn list_varieties(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<CatalogEntry>>> {
    Json(DataResponse::new(state.stores.fruits.catalog().await.entries()))
}

/// POST /api/v1/admin/dashboard/varieties
pub async fn create_variety(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<VarietyForm>,
) -> AppResult<impl IntoResponse> {
    let (address, variety) = form.into_parts()?;
    let id = state.stores.fruits.add_variety(address, variety.clone()).await?;

    tracing::info!(
        variety_id = %id,
        category = %address.category,
        fruit_type = ?address.fruit_type,
        name = %variety.name,
        "Variety created",
    );

    let entry = CatalogEntry {
        id,
        category: address.category,
        fruit_type: address.fruit_type,
        variety,
    };
    Ok((StatusCode::CREATED, Json(DataResponse::new(entry))))
}

/// PUT /api/v1/admin/dashboard/varieties/{id}
///
/// Replace a variety. The address in the body must be the one it lives at.
pub async fn update_variety(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(form): Json<VarietyForm>,
) -> AppResult<impl IntoResponse> {
    let (address, variety) = form.into_parts()?;
    if state.stores.fruits.variety(address, &id).await.is_none() {
        return Err(AppError::not_found("Variety", &id));
    }
    state.stores.fruits.update_variety(address, &id, variety.clone()).await?;

    tracing::info!(variety_id = %id, name = %variety.name, "Variety updated");

    let entry = CatalogEntry {
        id,
        category: address.category,
        fruit_type: address.fruit_type,
        variety,
    };
    Ok(Json(DataResponse::new(entry)))
}

/// DELETE /api/v1/admin/dashboard/varieties/{id}?category=&type=
pub async fn delete_variety(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Query(address): Query<AddressQuery>,
) -> AppResult<StatusCode> {
    let address = VarietyAddress::from(address);
    state.stores.fruits.delete_variety(address, &id).await?;
    tracing::info!(variety_id = %id, category = %address.category, "Variety deleted");
    Ok(StatusCode::NO_CONTENT)
}
