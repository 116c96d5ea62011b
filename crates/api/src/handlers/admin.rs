//! Handlers for the admin session (login, logout, session check).

use acfruit_core::error::CoreError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub session_id: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub email: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/login
///
/// Check the admin credential pair and open a session.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let admin = &state.config.admin;
    let email_matches = input.email.trim().eq_ignore_ascii_case(&admin.email);
    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !(email_matches && password_valid) {
        tracing::warn!(email = %input.email, "Rejected admin login");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let session_id = state.sessions.create().await;
    tracing::info!(email = %admin.email, "Admin logged in");

    Ok(Json(DataResponse::new(LoginResponse {
        session_id,
        email: admin.email.clone(),
    })))
}

/// POST /api/v1/admin/logout
pub async fn logout(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
) -> impl IntoResponse {
    state.sessions.end(&session).await;
    tracing::info!("Admin logged out");
    StatusCode::NO_CONTENT
}

/// GET /api/v1/admin/session
///
/// Succeeds only with a live session; the front-end uses it to guard pages.
pub async fn session(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
) -> Json<DataResponse<SessionInfo>> {
    Json(DataResponse::new(SessionInfo {
        email: state.config.admin.email.clone(),
    }))
}
