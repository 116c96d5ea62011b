//! Admin session and dashboard routes.

use acfruit_core::media::MAX_VIDEO_BYTES;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{admin, appearance, diagnostics, events, fruits, media, news, planifruits};
use crate::state::AppState;

/// Multipart bodies may carry a video at the size limit plus form overhead.
const UPLOAD_BODY_LIMIT: usize = MAX_VIDEO_BYTES + 1024 * 1024;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /login    -> login
/// POST /logout   -> logout (requires session)
/// GET  /session  -> session (requires session)
/// /dashboard/... -> dashboard_router
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/session", get(admin::session))
        .nest("/dashboard", dashboard_router())
}

/// Routes mounted at `/admin/dashboard`. Every handler requires a session.
///
/// ```text
/// GET, POST          /varieties
/// PUT, DELETE        /varieties/{id}
/// GET, POST          /news
/// PUT, DELETE        /news/{id}
/// POST               /news/{id}/toggle-published
/// GET, POST          /events
/// PUT, DELETE        /events/{id}
/// POST               /events/{id}/toggle-published
/// GET, POST          /planifruits
/// PUT, DELETE        /planifruits/{id}
/// GET, PUT           /appearance
/// POST               /media/images | /media/pdfs | /media/videos (multipart)
/// POST               /media/youtube
/// DELETE             /media
/// GET                /diagnostics
/// ```
fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route(
            "/varieties",
            get(fruits::list_varieties).post(fruits::create_variety),
        )
        .route(
            "/varieties/{id}",
            put(fruits::update_variety).delete(fruits::delete_variety),
        )
        .route("/news", get(news::list_news).post(news::create_news))
        .route(
            "/news/{id}",
            put(news::update_news).delete(news::delete_news),
        )
        .route(
            "/news/{id}/toggle-published",
            post(news::toggle_news_published),
        )
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/{id}",
            put(events::update_event).delete(events::delete_event),
        )
        .route(
            "/events/{id}/toggle-published",
            post(events::toggle_event_published),
        )
        .route(
            "/planifruits",
            get(planifruits::admin_list_planifruits).post(planifruits::create_planifruit),
        )
        .route(
            "/planifruits/{id}",
            put(planifruits::update_planifruit)
                .delete(planifruits::delete_planifruit),
        )
        .route(
            "/appearance",
            get(appearance::get_appearance).put(appearance::update_appearance),
        )
        .route(
            "/media/images",
            post(media::upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/media/pdfs",
            post(media::upload_pdf).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/media/videos",
            post(media::upload_video).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/media/youtube", post(media::resolve_youtube))
        .route("/media", delete(media::delete_media))
        .route("/diagnostics", get(diagnostics::diagnostics))
}
