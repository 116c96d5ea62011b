//! Handlers for maturity-calendar charts: public lookup and admin CRUD.

use acfruit_core::catalog::{Category, FruitType};
use acfruit_core::forms::{validate_form, PlanifruitForm};
use acfruit_core::planifruit::{Planifruit, PlanifruitPatch};
use acfruit_core::types::RecordId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/planifruits
pub async fn list_planifruits(State(state): State<AppState>) -> Json<DataResponse<Vec<Planifruit>>> {
    Json(DataResponse::new(state.stores.planifruits.list().await))
}

/// GET /api/v1/planifruits/{category}
pub async fn planifruits_for_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Planifruit>>>> {
    let category: Category = category.parse()?;
    Ok(Json(DataResponse::new(state.stores.planifruits.find(category, None).await)))
}

/// GET /api/v1/planifruits/{category}/{type}
pub async fn planifruits_for_type(
    State(state): State<AppState>,
    Path((category, fruit_type)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<Vec<Planifruit>>>> {
    let category: Category = category.parse()?;
    let fruit_type: FruitType = fruit_type.parse()?;
    Ok(Json(DataResponse::new(
        state.stores.planifruits.find(category, Some(fruit_type)).await,
    )))
}

// ---------------------------------------------------------------------------
// Admin dashboard
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/dashboard/planifruits
pub async fn admin_list_planifruits(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<Planifruit>>> {
    Json(DataResponse::new(state.stores.planifruits.list().await))
}

/// POST /api/v1/admin/dashboard/planifruits
pub async fn create_planifruit(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<PlanifruitForm>,
) -> AppResult<impl IntoResponse> {
    let draft = form.into_draft()?;
    let chart = state.stores.planifruits.add(draft).await?;

    tracing::info!(
        planifruit_id = %chart.id,
        category = %chart.category,
        fruit_type = ?chart.fruit_type,
        "Planifruit created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(chart))))
}

/// PUT /api/v1/admin/dashboard/planifruits/{id}
pub async fn update_planifruit(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(patch): Json<PlanifruitPatch>,
) -> AppResult<impl IntoResponse> {
    let mut merged = state
        .stores
        .planifruits
        .get(&id)
        .await
        .ok_or_else(|| AppError::not_found("Planifruit", &id))?;
    patch.apply(&mut merged);
    validate_form(&PlanifruitForm {
        category: Some(merged.category),
        fruit_type: merged.fruit_type,
        image: merged.image,
    })?;

    let chart = state
        .stores
        .planifruits
        .update(&id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("Planifruit", &id))?;

    tracing::info!(planifruit_id = %id, "Planifruit updated");

    Ok(Json(DataResponse::new(chart)))
}

/// DELETE /api/v1/admin/dashboard/planifruits/{id}
pub async fn delete_planifruit(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<StatusCode> {
    state.stores.planifruits.delete(&id).await?;
    tracing::info!(planifruit_id = %id, "Planifruit deleted");
    Ok(StatusCode::NO_CONTENT)
}
