//! Integration tests for the Router service

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use spellbook_domain::{CategoryTable, Classifier, SpellRecord, SpellStore};
use spellbook_router::{
    handlers::{create_router, AppState, ErrorResponse, HealthCheckResponse},
    query::QueryService,
};
use spellbook_store::SqliteStore;
use tower::ServiceExt; // for oneshot

/// Helper to create an app over a store seeded with a few spells
fn create_test_app() -> Router {
    let classifier = Classifier::new(&CategoryTable::builtin());
    let spell = |name: &str, level: u32, classes: &[&str]| {
        SpellRecord::classified(
            name,
            level,
            classes.iter().map(|c| c.to_string()).collect(),
            &classifier,
        )
    };

    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .append(&[
            spell("Fireball", 3, &["Wizard", "Sorcerer"]),
            spell("Magic Missile", 1, &["Wizard"]),
            spell("Cure Wounds", 1, &["Cleric", "Druid"]),
            spell("Shield", 1, &["Wizard", "Sorcerer"]),
            spell("Unknown Spell", 2, &["Wizard"]),
        ])
        .unwrap();

    create_router(AppState {
        queries: QueryService::new(store),
    })
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn form_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/query")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthCheckResponse = body_json(response).await;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.spell_count, 5);
}

#[tokio::test]
async fn test_form_query_includes_fireball_at_level_3() {
    let app = create_test_app();

    let response = app
        .oneshot(form_request("class=Wizard&level=3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let names: Vec<String> = body_json(response).await;
    assert!(names.contains(&"Fireball".to_string()));
}

#[tokio::test]
async fn test_form_query_excludes_fireball_at_level_2() {
    let app = create_test_app();

    let response = app
        .oneshot(form_request("class=Wizard&level=2"))
        .await
        .unwrap();
    let names: Vec<String> = body_json(response).await;

    assert!(!names.contains(&"Fireball".to_string()));
    assert_eq!(
        sorted(names),
        vec!["Magic Missile", "Shield", "Unknown Spell"]
    );
}

#[tokio::test]
async fn test_form_query_with_category() {
    let app = create_test_app();

    let response = app
        .oneshot(form_request("class=Wizard&level=9&category=Offensive"))
        .await
        .unwrap();
    let names: Vec<String> = body_json(response).await;

    assert_eq!(sorted(names), vec!["Fireball", "Magic Missile"]);
}

#[tokio::test]
async fn test_empty_category_is_union() {
    let app = create_test_app();

    let response = app
        .oneshot(form_request("class=Wizard&level=9&category="))
        .await
        .unwrap();
    let names: Vec<String> = body_json(response).await;

    assert_eq!(names.len(), 4);
    assert!(names.contains(&"Unknown Spell".to_string()));
}

#[tokio::test]
async fn test_get_spells_matches_form_contract() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/spells?class=Cleric&level=1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let names: Vec<String> = body_json(response).await;
    assert_eq!(names, vec!["Cure Wounds"]);
}

#[tokio::test]
async fn test_non_integer_level_is_400() {
    let app = create_test_app();

    let response = app
        .oneshot(form_request("class=Wizard&level=three"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = body_json(response).await;
    assert!(error.error.contains("three"));
}

#[tokio::test]
async fn test_out_of_range_integer_levels_are_ok() {
    let response = create_test_app()
        .oneshot(form_request("class=Wizard&level=-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let names: Vec<String> = body_json(response).await;
    assert!(names.is_empty());

    let response = create_test_app()
        .oneshot(form_request("class=Wizard&level=99999999999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let names: Vec<String> = body_json(response).await;
    assert_eq!(
        sorted(names),
        vec!["Fireball", "Magic Missile", "Shield", "Unknown Spell"]
    );
}

#[tokio::test]
async fn test_missing_class_is_400() {
    let app = create_test_app();

    let response = app.oneshot(form_request("level=3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_category_is_never_returned_for_concrete_category() {
    let app = create_test_app();

    for category in ["Offensive", "Defensive", "Healing", "Utility"] {
        let request = Request::builder()
            .uri(format!("/spells?class=Wizard&level=9&category={}", category))
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let names: Vec<String> = body_json(response).await;
        assert!(!names.contains(&"Unknown Spell".to_string()));
    }
}
