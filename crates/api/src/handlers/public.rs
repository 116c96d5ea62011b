//! Public read-only pages: home, news, events, contact, search, and the
//! admin-only calendar.
//!
//! Everything here reads local store state; no handler touches persistence.

use acfruit_core::appearance::{Appearance, ContactDetails};
use acfruit_core::catalog::{Category, SearchHit};
use acfruit_core::dates::{format_date_range, format_timestamp};
use acfruit_core::events::Event;
use acfruit_core::news::NewsArticle;
use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Published articles shown on the home page.
const HOME_NEWS_LIMIT: usize = 3;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsView {
    #[serde(flatten)]
    pub article: NewsArticle,
    pub formatted_date: String,
    pub paragraphs: Vec<String>,
}

impl From<NewsArticle> for NewsView {
    fn from(article: NewsArticle) -> Self {
        Self {
            formatted_date: format_timestamp(article.date),
            paragraphs: article.paragraphs().into_iter().map(String::from).collect(),
            article,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub date_range: String,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        Self {
            date_range: format_date_range(event.start_date, event.end_date),
            event,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCard {
    pub category: Category,
    pub name: String,
    pub has_sub_categories: bool,
    pub variety_count: usize,
    pub image: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub appearance: Appearance,
    /// Header video as a playable public URL, empty when unset.
    pub header_video_url: String,
    pub categories: Vec<CategoryCard>,
    pub latest_news: Vec<NewsView>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/home
pub async fn home(State(state): State<AppState>) -> Json<DataResponse<HomePage>> {
    let stores = &state.stores;
    let appearance = stores.appearance.get().await;
    let catalog = stores.fruits.catalog().await;

    let categories = catalog
        .categories()
        .map(|(category, fruit)| CategoryCard {
            category: *category,
            name: fruit.name.clone(),
            has_sub_categories: fruit.has_sub_categories,
            variety_count: fruit.varieties.len(),
            image: fruit.cover_image().to_string(),
        })
        .collect();

    let latest_news = stores
        .news
        .published()
        .await
        .into_iter()
        .take(HOME_NEWS_LIMIT)
        .map(NewsView::from)
        .collect();

    let header_video_url = stores.media.resolve_url("videos", &appearance.header_video);

    Json(DataResponse::new(HomePage {
        appearance,
        header_video_url,
        categories,
        latest_news,
    }))
}

/// GET /api/v1/news
///
/// Published articles, newest first.
pub async fn news(State(state): State<AppState>) -> Json<DataResponse<Vec<NewsView>>> {
    let articles = state.stores.news.published().await;
    Json(DataResponse::new(articles.into_iter().map(NewsView::from).collect()))
}

/// GET /api/v1/events
///
/// Published events.
pub async fn events(State(state): State<AppState>) -> Json<DataResponse<Vec<EventView>>> {
    let events = state.stores.events.published().await;
    Json(DataResponse::new(events.into_iter().map(EventView::from).collect()))
}

/// GET /api/v1/contact
pub async fn contact(State(state): State<AppState>) -> Json<DataResponse<ContactDetails>> {
    let appearance = state.stores.appearance.get().await;
    Json(DataResponse::new(appearance.contact()))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Only events covering this day.
    pub day: Option<NaiveDate>,
}

/// GET /api/v1/calendar
///
/// Every event, published or not. Requires an admin session.
pub async fn calendar(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<DataResponse<Vec<EventView>>>> {
    let events = state.stores.events.list().await;
    let events = events
        .into_iter()
        .filter(|e| query.day.map_or(true, |day| e.covers(day)))
        .map(EventView::from)
        .collect();
    Ok(Json(DataResponse::new(events)))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/v1/search?q=
///
/// Case-insensitive match on variety names and descriptions.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<DataResponse<Vec<SearchHit>>> {
    Json(DataResponse::new(state.stores.fruits.search(&query.q).await))
}
