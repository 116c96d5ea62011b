//! Repository layer against the in-memory client:
//! - Insert returns the assigned id with submitted values
//! - Selects come back newest first and skip misfit rows
//! - Partial updates write only present columns
//! - Appearance upsert picks insert vs update by existence

use chrono::NaiveDate;
use serde_json::json;

use acfruit_core::appearance::Appearance;
use acfruit_core::catalog::{Category, FruitType, Variety, VarietyAddress};
use acfruit_core::events::{EventDraft, EventPatch};
use acfruit_core::news::NewsDraft;
use acfruit_db::repositories::{AppearanceRepo, EventRepo, FruitRepo, NewsRepo};
use acfruit_db::{MemoryClient, Operation, PersistenceClient, Table};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn variety(name: &str) -> Variety {
    Variety {
        name: name.to_string(),
        description: "desc".to_string(),
        image: "https://img/v.jpg".to_string(),
        images: vec![],
        technical_sheet: String::new(),
        video: None,
        maturity_period: None,
    }
}

fn draft_event(title: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: String::new(),
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
        image: String::new(),
        location: "Avignon".to_string(),
        published: false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn news_create_returns_assigned_id() {
    let db = MemoryClient::new();
    let draft = NewsDraft {
        title: "Récolte".into(),
        content: "Texte".into(),
        image: "https://img/n.jpg".into(),
        published: true,
    };
    let article = NewsRepo::create(&db, &draft).await.unwrap();

    let stored = db.rows(Table::News);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["id"], article.id.as_str());
    assert_eq!(article.title, "Récolte");
    assert!(article.published);
}

#[tokio::test]
async fn fruit_list_skips_rows_that_do_not_fit() {
    let db = MemoryClient::new();
    db.seed(Table::Fruits, json!({ "id": "ok", "category": "abricots", "name": "Bergeron" }));
    db.seed(Table::Fruits, json!({ "id": "bad", "category": "peches", "name": "Untyped" }));
    db.seed(Table::Fruits, json!({ "id": "junk", "name": 42 }));

    let entries = FruitRepo::list(&db).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].1, "ok");
}

#[tokio::test]
async fn fruit_round_trip_keeps_nested_address() {
    let db = MemoryClient::new();
    let address = VarietyAddress { category: Category::Peches, fruit_type: Some(FruitType::Jaune) };
    let id = FruitRepo::create(&db, address, &variety("Royal")).await.unwrap();

    let entries = FruitRepo::list(&db).await.unwrap();
    assert_eq!(entries, vec![(address, id, variety("Royal"))]);
}

#[tokio::test]
async fn event_update_writes_only_patched_columns() {
    let db = MemoryClient::new();
    let event = EventRepo::create(&db, &draft_event("Salon")).await.unwrap();
    let patch = EventPatch { location: Some("Nîmes".into()), ..Default::default() };
    EventRepo::update(&db, &event.id, &patch).await.unwrap();

    let events = EventRepo::list(&db).await.unwrap();
    assert_eq!(events[0].location, "Nîmes");
    assert_eq!(events[0].title, "Salon");
}

#[tokio::test]
async fn lists_are_newest_first() {
    let db = MemoryClient::new();
    db.seed(Table::Events, json!({
        "id": "old", "title": "Old", "start_date": "2024-01-01", "end_date": "2024-01-01",
        "location": "x", "published": true, "created_at": "2024-01-01T00:00:00Z"
    }));
    db.seed(Table::Events, json!({
        "id": "new", "title": "New", "start_date": "2023-01-01", "end_date": "2023-01-01",
        "location": "x", "published": true, "created_at": "2024-02-01T00:00:00Z"
    }));
    let ids: Vec<_> = EventRepo::list(&db).await.unwrap().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["new", "old"]);
}

#[tokio::test]
async fn appearance_save_inserts_then_updates() {
    let db = MemoryClient::new();
    assert_eq!(AppearanceRepo::fetch(&db).await.unwrap(), None);

    let mut appearance = Appearance { company_name: "AC Fruit".into(), ..Appearance::default() };
    AppearanceRepo::save(&db, &appearance).await.unwrap();
    assert_eq!(db.calls(Operation::Insert), 1);

    appearance.phone = "04 90 00 00 00".into();
    AppearanceRepo::save(&db, &appearance).await.unwrap();
    assert_eq!(db.calls(Operation::Insert), 1);
    assert_eq!(db.calls(Operation::Update), 1);
    assert_eq!(db.count(Table::Appearance).await.unwrap(), 1);

    assert_eq!(AppearanceRepo::fetch(&db).await.unwrap(), Some(appearance));
}
