//! Admin dashboard handlers for the site appearance record.

use acfruit_core::appearance::{Appearance, AppearancePatch};
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard/appearance
pub async fn get_appearance(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
) -> Json<DataResponse<Appearance>> {
    Json(DataResponse::new(state.stores.appearance.get().await))
}

/// PUT /api/v1/admin/dashboard/appearance
///
/// Merge the given fields into the current record and save the result.
pub async fn update_appearance(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Json(patch): Json<AppearancePatch>,
) -> AppResult<Json<DataResponse<Appearance>>> {
    let appearance = state.stores.appearance.update(&patch).await?;
    tracing::info!(use_video = appearance.use_video, "Appearance updated");
    Ok(Json(DataResponse::new(appearance)))
}
