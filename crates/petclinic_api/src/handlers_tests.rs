//! Tests for handlers module

use super::*;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use petclinic_core::CacheConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::routes::create_router;

/// Helper function to create a router over seeded in-memory storage
fn test_app() -> Router {
    create_router(AppState::in_memory(&CacheConfig::default()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn new_owner_body() -> Value {
    json!({
        "firstName": "Sam",
        "lastName": "Schultz",
        "address": "4, Evans Street",
        "city": "Wollongong",
        "telephone": "4444444444"
    })
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_returns_json() {
    let response = health_check().await;

    assert_eq!(response.0.status, "healthy");
    assert_eq!(
        response.0.version,
        Some(env!("CARGO_PKG_VERSION").to_string())
    );

    let parsed = chrono::DateTime::parse_from_rfc3339(&response.0.timestamp);
    assert!(parsed.is_ok(), "Timestamp should be valid ISO 8601 format");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(test_app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

// ============================================================================
// Owner Tests
// ============================================================================

#[tokio::test]
async fn test_show_owner_returns_owner_with_pets() {
    let (status, body) = send(test_app(), get("/owners/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "George");
    assert_eq!(body["lastName"], "Franklin");
    assert_eq!(body["pets"][0]["name"], "Leo");
}

#[tokio::test]
async fn test_show_owner_sorts_visits_by_date() {
    let (status, body) = send(test_app(), get("/owners/6")).await;

    assert_eq!(status, StatusCode::OK);
    // Pets by name: Max before Samantha
    assert_eq!(body["pets"][0]["name"], "Max");
    let visits = body["pets"][1]["visits"].as_array().unwrap();
    assert_eq!(visits[0]["description"], "spayed");
    assert_eq!(visits[1]["description"], "rabies shot");
}

#[tokio::test]
async fn test_show_missing_owner_returns_404() {
    let (status, body) = send(test_app(), get("/owners/9999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NotFound");
    assert_eq!(body["error"]["details"]["id"], 9999);
}

#[tokio::test]
async fn test_show_owner_non_numeric_id_returns_400() {
    let (status, _) = send(test_app(), get("/owners/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_find_owners_by_last_name_prefix() {
    let (status, body) = send(test_app(), get("/owners?lastName=Dav")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 2);
    let items = body["items"].as_array().unwrap();
    assert!(items.iter().all(|o| o["lastName"] == "Davis"));
}

#[tokio::test]
async fn test_find_owners_without_name_pages_all() {
    let (status, body) = send(test_app(), get("/owners?page=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["size"], 5);
    assert_eq!(body["totalItems"], 10);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["items"][0]["id"], 6);
}

#[tokio::test]
async fn test_find_owners_no_match_returns_empty_page() {
    let (status, body) = send(test_app(), get("/owners?lastName=Zzz")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_owner_returns_201_with_location() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(with_json("POST", "/owners", new_owner_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["location"], "/owners/11");

    let (status, body) = send(app, get("/owners/11")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lastName"], "Schultz");
}

#[tokio::test]
async fn test_create_owner_invalid_telephone_returns_400() {
    let mut body = new_owner_body();
    body["telephone"] = json!("12345");

    let (status, body) = send(test_app(), with_json("POST", "/owners", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "ValidationError");
    assert_eq!(body["error"]["details"]["field"], "telephone");
}

#[tokio::test]
async fn test_create_owner_with_overlong_first_name_returns_400() {
    let mut body = new_owner_body();
    body["firstName"] = json!("a".repeat(31));

    let (status, body) = send(test_app(), with_json("POST", "/owners", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "ValidationError");
    assert_eq!(body["error"]["details"]["field"], "firstName");
}

#[tokio::test]
async fn test_update_owner() {
    let app = test_app();
    let mut body = new_owner_body();
    body["city"] = json!("Madison");

    let (status, updated) = send(app.clone(), with_json("PUT", "/owners/2", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 2);
    assert_eq!(updated["city"], "Madison");
    // Pets survive an update of the owner's fields
    assert_eq!(updated["pets"][0]["name"], "Basil");
}

#[tokio::test]
async fn test_update_missing_owner_returns_404() {
    let (status, _) = send(test_app(), with_json("PUT", "/owners/9999", new_owner_body())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Pet and Visit Tests
// ============================================================================

#[tokio::test]
async fn test_add_pet_returns_201() {
    let app = test_app();
    let body = json!({ "name": "Rex", "birthDate": "2020-01-01", "type": "dog" });

    let (status, pet) = send(app.clone(), with_json("POST", "/owners/1/pets", body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pet["name"], "Rex");
    assert_eq!(pet["type"]["name"], "dog");

    let (_, owner) = send(app, get("/owners/1")).await;
    assert_eq!(owner["pets"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_pet_duplicate_name_returns_400() {
    let body = json!({ "name": "leo", "birthDate": "2020-01-01", "type": "cat" });

    let (status, body) = send(test_app(), with_json("POST", "/owners/1/pets", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["field"], "name");
}

#[tokio::test]
async fn test_add_pet_unknown_type_returns_400() {
    let body = json!({ "name": "Puff", "birthDate": "2020-01-01", "type": "dragon" });

    let (status, body) = send(test_app(), with_json("POST", "/owners/1/pets", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["field"], "type");
}

#[tokio::test]
async fn test_add_pet_to_missing_owner_returns_404() {
    let body = json!({ "name": "Rex", "birthDate": "2020-01-01", "type": "dog" });

    let (status, _) = send(test_app(), with_json("POST", "/owners/9999/pets", body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_pet() {
    let body = json!({ "name": "Leonardo", "birthDate": "2000-09-07", "type": "cat" });

    let (status, pet) = send(test_app(), with_json("PUT", "/owners/1/pets/1", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(pet["id"], 1);
    assert_eq!(pet["name"], "Leonardo");
}

#[tokio::test]
async fn test_update_pet_of_other_owner_returns_404() {
    let body = json!({ "name": "Leo", "birthDate": "2000-09-07", "type": "cat" });

    let (status, body) = send(test_app(), with_json("PUT", "/owners/2/pets/1", body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["details"]["entity"], "pet");
}

#[tokio::test]
async fn test_add_visit_returns_201() {
    let app = test_app();
    let body = json!({ "date": "2024-01-15", "description": "annual checkup" });

    let (status, visit) =
        send(app.clone(), with_json("POST", "/owners/6/pets/7/visits", body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(visit["id"], 5);
    assert_eq!(visit["date"], "2024-01-15");

    let (_, owner) = send(app, get("/owners/6")).await;
    let visits = owner["pets"][1]["visits"].as_array().unwrap();
    assert_eq!(visits.len(), 3);
    assert_eq!(visits[2]["description"], "annual checkup");
}

#[tokio::test]
async fn test_add_visit_blank_description_returns_400() {
    let body = json!({ "description": "" });

    let (status, body) = send(test_app(), with_json("POST", "/owners/6/pets/7/visits", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["field"], "description");
}

#[tokio::test]
async fn test_add_visit_to_missing_pet_returns_404() {
    let body = json!({ "description": "checkup" });

    let (status, _) = send(test_app(), with_json("POST", "/owners/1/pets/99/visits", body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_pet_types_sorted_by_name() {
    let (status, body) = send(test_app(), get("/pettypes")).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["bird", "cat", "dog", "hamster", "lizard", "snake"]);
}

// ============================================================================
// Vet Tests
// ============================================================================

#[tokio::test]
async fn test_show_vets_returns_vet_list() {
    let (status, body) = send(test_app(), get("/vets")).await;

    assert_eq!(status, StatusCode::OK);
    let vets = body["vetList"].as_array().unwrap();
    assert_eq!(vets.len(), 6);
    assert_eq!(vets[2]["lastName"], "Douglas");
    assert_eq!(vets[2]["specialties"][0]["name"], "dentistry");
}

#[tokio::test]
async fn test_show_vets_page() {
    let (status, body) = send(test_app(), get("/vets?page=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalItems"], 6);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_repeated_vet_requests_hit_cache() {
    use petclinic_core::{CachedVetRepository, InMemoryStore};
    use std::sync::Arc;

    let store = Arc::new(InMemoryStore::seeded());
    let vets = Arc::new(CachedVetRepository::new(
        Arc::clone(&store),
        &CacheConfig::default(),
    ));
    let app = create_router(AppState::new(store, vets.clone()));

    send(app.clone(), get("/vets")).await;
    send(app, get("/vets")).await;

    let stats = vets.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

// ============================================================================
// Error Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_oups_returns_500_without_internal_message() {
    let (status, body) = send(test_app(), get("/oups")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "InternalError");
    assert_eq!(body["error"]["message"], "An internal error occurred");
}
