//! Admin dashboard handlers for news articles.

use acfruit_core::forms::{validate_form, NewsForm};
use acfruit_core::news::{NewsArticle, NewsPatch};
use acfruit_core::types::RecordId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard/news
///
/// All articles, drafts included, newest first.
pub async fn list_news(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<NewsArticle>>> {
    Json(DataResponse::new(state.stores.news.list().await))
}

/// POST /api/v1/admin/dashboard/news
pub async fn create_news(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<NewsForm>,
) -> AppResult<impl IntoResponse> {
    let draft = form.into_draft()?;
    let article = state.stores.news.add(draft).await?;

    tracing::info!(news_id = %article.id, title = %article.title, "News article created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(article))))
}

/// PUT /api/v1/admin/dashboard/news/{id}
///
/// Partial update. The merged article must still pass the form rules.
pub async fn update_news(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(patch): Json<NewsPatch>,
) -> AppResult<impl IntoResponse> {
    let mut merged = state
        .stores
        .news
        .get(&id)
        .await
        .ok_or_else(|| AppError::not_found("NewsArticle", &id))?;
    patch.apply(&mut merged);
    validate_form(&NewsForm {
        title: merged.title,
        content: merged.content,
        image: merged.image,
        published: merged.published,
    })?;

    let article = state
        .stores
        .news
        .update(&id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("NewsArticle", &id))?;

    tracing::info!(news_id = %id, "News article updated");

    Ok(Json(DataResponse::new(article)))
}

/// DELETE /api/v1/admin/dashboard/news/{id}
pub async fn delete_news(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<StatusCode> {
    state.stores.news.delete(&id).await?;
    tracing::info!(news_id = %id, "News article deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/dashboard/news/{id}/toggle-published
pub async fn toggle_news_published(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let article = state
        .stores
        .news
        .toggle_published(&id)
        .await?
        .ok_or_else(|| AppError::not_found("NewsArticle", &id))?;

    tracing::info!(news_id = %id, published = article.published, "News visibility toggled");

    Ok(Json(DataResponse::new(article)))
}
