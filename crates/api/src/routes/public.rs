//! Public read-only routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::{fruits, planifruits, public};
use crate::state::AppState;

/// Routes mounted at the root of `/api/v1`.
///
/// ```text
/// GET /home                               -> home
/// GET /news                               -> news (published)
/// GET /events                             -> events (published)
/// GET /contact                            -> contact
/// GET /calendar                           -> calendar (admin session)
/// GET /search?q=                          -> search
/// GET /fruits                             -> list_fruits
/// GET /fruits/{category}                  -> get_fruit
/// GET /fruits/{category}/{segment}        -> get_fruit_segment
/// GET /fruits/{category}/{type}/{variety} -> get_typed_variety
/// GET /planifruits                        -> list_planifruits
/// GET /planifruits/{category}             -> planifruits_for_category
/// GET /planifruits/{category}/{type}      -> planifruits_for_type
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(public::home))
        .route("/news", get(public::news))
        .route("/events", get(public::events))
        .route("/contact", get(public::contact))
        .route("/calendar", get(public::calendar))
        .route("/search", get(public::search))
        .route("/fruits", get(fruits::list_fruits))
        .route("/fruits/{category}", get(fruits::get_fruit))
        .route("/fruits/{category}/{segment}", get(fruits::get_fruit_segment))
        .route(
            "/fruits/{category}/{fruit_type}/{variety}",
            get(fruits::get_typed_variety),
        )
        .route("/planifruits", get(planifruits::list_planifruits))
        .route(
            "/planifruits/{category}",
            get(planifruits::planifruits_for_category),
        )
        .route(
            "/planifruits/{category}/{fruit_type}",
            get(planifruits::planifruits_for_type),
        )
}
