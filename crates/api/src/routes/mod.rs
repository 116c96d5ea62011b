pub mod admin;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /home, /news, /events, /contact, /search      public pages
/// /fruits/...                                   variety catalog
/// /planifruits/...                              maturity charts
/// /calendar                                     all events (admin session)
///
/// /admin/login, /admin/logout, /admin/session   admin session
/// /admin/dashboard/...                          content management
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .nest("/admin", admin::router())
}
