//! Session-based admin extractor for Axum handlers.

use acfruit_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// A request carrying a live admin session as `Authorization: Bearer <session id>`.
///
/// ```ignore
/// async fn dashboard(RequireAdmin(session): RequireAdmin) -> AppResult<Json<()>> {
///     tracing::info!(%session, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Holds the session id.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub String);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let session_id = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <session>".into(),
            ))
        })?;

        if !state.sessions.contains(session_id).await {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or expired session".into(),
            )));
        }

        Ok(RequireAdmin(session_id.to_string()))
    }
}
