//! Admin dashboard handlers for events.

use acfruit_core::events::{Event, EventPatch};
use acfruit_core::forms::{validate_form, EventForm};
use acfruit_core::types::RecordId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard/events
pub async fn list_events(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<Event>>> {
    Json(DataResponse::new(state.stores.events.list().await))
}

/// POST /api/v1/admin/dashboard/events
///
/// An end date before the start date is rejected before the store is called.
pub async fn create_event(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<EventForm>,
) -> AppResult<impl IntoResponse> {
    let draft = form.into_draft()?;
    let event = state.stores.events.add(draft).await?;

    tracing::info!(
        event_id = %event.id,
        title = %event.title,
        start = %event.start_date,
        end = %event.end_date,
        "Event created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(event))))
}

/// PUT /api/v1/admin/dashboard/events/{id}
///
/// Partial update. The merged event must still pass the form rules,
/// including date order.
pub async fn update_event(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(patch): Json<EventPatch>,
) -> AppResult<impl IntoResponse> {
    let mut merged = state
        .stores
        .events
        .get(&id)
        .await
        .ok_or_else(|| AppError::not_found("Event", &id))?;
    patch.apply(&mut merged);
    validate_form(&EventForm {
        title: merged.title,
        description: merged.description,
        start_date: Some(merged.start_date),
        end_date: Some(merged.end_date),
        image: merged.image,
        location: merged.location,
        published: merged.published,
    })?;

    let event = state
        .stores
        .events
        .update(&id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("Event", &id))?;

    tracing::info!(event_id = %id, "Event updated");

    Ok(Json(DataResponse::new(event)))
}

/// DELETE /api/v1/admin/dashboard/events/{id}
pub async fn delete_event(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<StatusCode> {
    state.stores.events.delete(&id).await?;
    tracing::info!(event_id = %id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/dashboard/events/{id}/toggle-published
pub async fn toggle_event_published(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let event = state
        .stores
        .events
        .toggle_published(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", &id))?;

    tracing::info!(event_id = %id, published = event.published, "Event visibility toggled");

    Ok(Json(DataResponse::new(event)))
}
