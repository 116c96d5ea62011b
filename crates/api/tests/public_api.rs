//! HTTP-level tests for the public catalog pages.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use serde_json::{json, Value};

use acfruit_core::catalog::DEFAULT_COVER_IMAGE;
use acfruit_db::{MemoryClient, Operation, Table};
use common::{body_json, TestApp};

/// A catalog with one apricot, one yellow peach, one white nectarine, a
/// published and an unpublished article, and a peach chart.
async fn seeded_app() -> TestApp {
    let db = Arc::new(MemoryClient::new());
    db.seed(Table::Fruits, json!({
        "id": "a1", "category": "abricots", "name": "Bergeron",
        "description": "Abricot tardif", "image": "https://img/bergeron.jpg",
        "maturity_start_day": 15, "maturity_start_month": 7,
        "maturity_end_day": 5, "maturity_end_month": 8
    }));
    db.seed(Table::Fruits, json!({
        "id": "p1", "category": "peches", "type": "jaune", "name": "Royal Summer",
        "description": "Chair jaune ferme", "image": "https://img/royal.jpg",
        "maturity_start_day": 20, "maturity_start_month": 6,
        "maturity_end_day": 30, "maturity_end_month": 6
    }));
    db.seed(Table::Fruits, json!({
        "id": "p2", "category": "peches", "type": "jaune", "name": "Summer Sun",
        "description": "Précoce", "image": "https://img/sun.jpg",
        "maturity_start_day": 1, "maturity_start_month": 6,
        "maturity_end_day": 15, "maturity_end_month": 6
    }));
    db.seed(Table::Fruits, json!({
        "id": "n1", "category": "nectarines", "type": "blanche", "name": "Nectaross",
        "description": "Chair blanche", "image": "https://img/nectaross.jpg"
    }));
    db.seed(Table::News, json!({
        "id": "news-1", "title": "Récolte", "content": "Bonne saison", "image": "i", "published": true
    }));
    db.seed(Table::News, json!({
        "id": "news-2", "title": "Brouillon", "content": "x", "image": "i", "published": false
    }));
    db.seed(Table::Planifruits, json!({
        "id": "c1", "category": "peches", "type": "jaune", "image": "https://img/chart.png"
    }));
    TestApp::with_db(db).await
}

#[tokio::test]
async fn home_lists_categories_with_cover_images() {
    let app = seeded_app().await;
    let json = body_json(app.get("/api/v1/home").await).await;
    let data = &json["data"];

    let cards = data["categories"].as_array().unwrap();
    assert_eq!(cards.len(), 3);
    let card = |category: &str| cards.iter().find(|c| c["category"] == category).unwrap();

    assert_eq!(card("abricots")["image"], "https://img/bergeron.jpg");
    assert_eq!(card("abricots")["hasSubCategories"], false);
    assert_eq!(card("peches")["varietyCount"], 2);
    assert_eq!(card("peches")["name"], "Pêches");
    // Only the first type is looked at, and nectarines have no yellow variety.
    assert_eq!(card("nectarines")["image"], DEFAULT_COVER_IMAGE);

    let news = data["latestNews"].as_array().unwrap();
    assert_eq!(news.len(), 1);
    assert_eq!(news[0]["title"], "Récolte");
    assert_eq!(data["appearance"]["headerTitle"], "Bienvenue chez AC Fruit");
    assert_eq!(data["headerVideoUrl"], "");
}

#[tokio::test]
async fn public_pages_never_touch_persistence() {
    let app = seeded_app().await;
    app.db.reset_calls();

    for uri in [
        "/api/v1/home",
        "/api/v1/news",
        "/api/v1/events",
        "/api/v1/contact",
        "/api/v1/fruits",
        "/api/v1/fruits/peches/jaune",
        "/api/v1/search?q=summer",
        "/api/v1/planifruits",
    ] {
        assert_eq!(app.get(uri).await.status(), StatusCode::OK, "{uri}");
    }
    assert_eq!(app.db.total_calls(), 0);
}

#[tokio::test]
async fn type_segment_lists_varieties_by_maturity() {
    let app = seeded_app().await;
    let json = body_json(app.get("/api/v1/fruits/peches/jaune").await).await;
    let data = &json["data"];

    assert_eq!(data["category"], "peches");
    assert_eq!(data["type"], "jaune");
    let names: Vec<&str> = data["varieties"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["variety"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Summer Sun", "Royal Summer"]);
    assert_eq!(data["varieties"][0]["maturityLabel"], "01/06 au 15/06");
}

#[tokio::test]
async fn apricot_segment_is_a_variety_id() {
    let app = seeded_app().await;
    let json = body_json(app.get("/api/v1/fruits/abricots/a1").await).await;

    assert_matches!(&json["data"]["variety"], Value::Object(_));
    assert_eq!(json["data"]["id"], "a1");
    assert_eq!(json["data"]["variety"]["name"], "Bergeron");
    assert_eq!(json["data"]["maturityLabel"], "15/07 au 05/08");
    assert!(json["data"].get("type").is_none());

    let response = app.get("/api/v1/fruits/abricots/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn typed_variety_lookups() {
    let app = seeded_app().await;

    let json = body_json(app.get("/api/v1/fruits/nectarines/blanche/n1").await).await;
    assert_eq!(json["data"]["variety"]["name"], "Nectaross");
    assert!(json["data"].get("maturityLabel").is_none());

    // Wrong type for an existing id.
    let response = app.get("/api/v1/fruits/nectarines/jaune/n1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Apricots have no types.
    let response = app.get("/api/v1/fruits/abricots/jaune/a1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_category_or_type_is_a_validation_error() {
    let app = seeded_app().await;

    let response = app.get("/api/v1/fruits/cerises").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("cerises"));

    let response = app.get("/api/v1/fruits/peches/violette").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_matches_names_and_descriptions() {
    let app = seeded_app().await;

    let json = body_json(app.get("/api/v1/search?q=SUMMER").await).await;
    let hits = json["data"].as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h["category"] == "peches" && h["type"] == "jaune"));

    let json = body_json(app.get("/api/v1/search?q=blanche").await).await;
    assert_eq!(json["data"][0]["id"], "n1");

    let json = body_json(app.get("/api/v1/search?q=%20%20").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn planifruits_filter_by_category_and_type() {
    let app = seeded_app().await;

    let json = body_json(app.get("/api/v1/planifruits/peches/jaune").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["image"], "https://img/chart.png");

    let json = body_json(app.get("/api/v1/planifruits/nectarines").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn failed_fruit_load_leaves_an_empty_catalog() {
    let db = Arc::new(MemoryClient::new());
    db.seed(Table::Fruits, json!({
        "id": "a1", "category": "abricots", "name": "Bergeron", "image": "i"
    }));
    db.fail_on(Operation::Select, "timeout");
    let app = TestApp::with_db(db).await;

    let json = body_json(app.get("/api/v1/fruits/abricots").await).await;
    assert_eq!(json["data"]["varieties"]["shape"], "flat");
    assert_matches!(&json["data"]["varieties"]["items"], Value::Object(items) if items.is_empty());
}
