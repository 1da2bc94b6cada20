//! Full-stack API tests
//!
//! Drives the assembled router through tower's oneshot, covering the
//! register/login flow, the bearer-token gateway, and the per-user
//! ownership contract on heroes and items.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use heroteam_backend::{
    app::{build_router, AppState},
    auth::{AuthState, JwtHandler, UserStore},
    heroes::HeroStore,
    items::ItemStore,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

const TEST_SECRET: &str = "integration-test-secret";

fn test_app() -> (Router, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap();

    let user_store = Arc::new(UserStore::new(db_path).unwrap());
    let hero_store = Arc::new(HeroStore::new(db_path).unwrap());
    let item_store = Arc::new(ItemStore::new(db_path).unwrap());
    let jwt_handler = Arc::new(JwtHandler::new(TEST_SECRET.to_string()));

    let auth_state = AuthState::new(user_store, jwt_handler.clone());
    let app_state = AppState {
        hero_store,
        item_store,
    };

    (build_router(auth_state, app_state, jwt_handler), temp_file)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn register_and_login(app: &Router, username: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "password": "password123",
            "email": format!("{}@example.com", username),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check_is_public() {
    let (app, _temp) = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_then_login_issues_accepted_token() {
    let (app, _temp) = test_app();

    let token = register_and_login(&app, "alice").await;

    let (status, body) = send(&app, Method::GET, "/api/heroes/team", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalHeroes"], 0);
}

#[tokio::test]
async fn register_validation_errors() {
    let (app, _temp) = test_app();

    // Missing email
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "bob", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Short password
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "bob", "password": "abc", "email": "bob@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_username_conflicts_even_with_new_email() {
    let (app, _temp) = test_app();

    register_and_login(&app, "carol").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": "carol",
            "password": "otherpass",
            "email": "carol-alt@example.com",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn login_errors_do_not_reveal_which_field_was_wrong() {
    let (app, _temp) = test_app();

    register_and_login(&app, "dave").await;

    let (status_unknown, body_unknown) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "no-such-user", "password": "password123" })),
    )
    .await;
    let (status_wrong, body_wrong) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "dave", "password": "wrongpass" })),
    )
    .await;

    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(status_wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(body_unknown["error"], body_wrong["error"]);
}

#[tokio::test]
async fn protected_routes_reject_missing_and_tampered_tokens() {
    let (app, _temp) = test_app();

    // No token
    let (status, body) = send(&app, Method::GET, "/api/heroes/team", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    // Tampered token: flip a byte in the middle
    let token = register_and_login(&app, "erin").await;
    let mut bytes = token.clone().into_bytes();
    let mid = bytes.len() / 2;
    bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    let (status, _) = send(&app, Method::GET, "/api/heroes/team", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Token signed with a different secret
    let foreign = JwtHandler::new("some-other-secret".to_string());
    let user = heroteam_backend::auth::models::User {
        id: 1,
        username: "erin".to_string(),
        email: "erin@example.com".to_string(),
        password_hash: String::new(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    let forged = foreign.generate_token(&user).unwrap();
    let (status, _) = send(&app, Method::GET, "/api/heroes/team", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn hero_create_validates_closed_vocabularies() {
    let (app, _temp) = test_app();
    let token = register_and_login(&app, "frank").await;

    // Missing ability
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token),
        Some(json!({ "nome": "Superman" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown name includes the allowed list
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token),
        Some(json!({ "nome": "Deadpool", "habilidade": "Flight" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["validNames"].is_array());

    // Level 0 is out of range, not silently defaulted
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token),
        Some(json!({ "nome": "Superman", "habilidade": "Flight", "nivel": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Invalid origin
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token),
        Some(json!({ "nome": "Superman", "habilidade": "Flight", "origem": "Gotham" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["validOrigins"].is_array());

    // Valid create applies defaults
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token),
        Some(json!({ "nome": "Superman", "habilidade": "Flight" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["hero"]["nivel"], 1);
    assert_eq!(body["hero"]["categoria"], "Hero");
    assert!(body["hero"]["origem"].is_null());
}

#[tokio::test]
async fn duplicate_hero_name_per_user_conflicts_but_not_across_users() {
    let (app, _temp) = test_app();
    let token_a = register_and_login(&app, "gina").await;
    let token_b = register_and_login(&app, "hank").await;

    let superman = json!({ "nome": "Superman", "habilidade": "Flight" });

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token_a),
        Some(superman.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token_a),
        Some(superman.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // A different user can hold the same hero
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token_b),
        Some(superman),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn cross_user_access_is_indistinguishable_from_absence() {
    let (app, _temp) = test_app();
    let token_a = register_and_login(&app, "iris").await;
    let token_b = register_and_login(&app, "jack").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token_a),
        Some(json!({ "nome": "Batman", "habilidade": "Martial Arts" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let hero_id = body["hero"]["id"].as_i64().unwrap();
    let uri = format!("/api/heroes/{}", hero_id);

    // Other user sees 404 on every verb, never the record and never a 403
    let (status, body) = send(&app, Method::GET, &uri, Some(&token_b), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("hero").is_none());

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token_b),
        Some(json!({ "nivel": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token_b), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Untouched for the owner
    let (status, body) = send(&app, Method::GET, &uri, Some(&token_a), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hero"]["nivel"], 1);
}

#[tokio::test]
async fn team_listing_orders_by_level_then_creation() {
    let (app, _temp) = test_app();
    let token = register_and_login(&app, "kara").await;

    for (name, level) in [("Flash", 50), ("Superman", 90), ("Batman", 90)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/heroes/create",
            Some(&token),
            Some(json!({ "nome": name, "habilidade": "Speed", "nivel": level })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/api/heroes/team", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalHeroes"], 3);

    let names: Vec<&str> = body["team"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["nome"].as_str().unwrap())
        .collect();
    // Ties at level 90 resolve by creation order
    assert_eq!(names, vec!["Superman", "Batman", "Flash"]);
}

#[tokio::test]
async fn hero_update_merges_and_rereads() {
    let (app, _temp) = test_app();
    let token = register_and_login(&app, "lois").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token),
        Some(json!({
            "nome": "Thor",
            "habilidade": "Flight",
            "nivel": 80,
            "origem": "Asgard",
        })),
    )
    .await;
    let hero_id = body["hero"]["id"].as_i64().unwrap();
    let uri = format!("/api/heroes/{}", hero_id);

    // Partial update keeps omitted fields
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "nivel": 85 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hero"]["nivel"], 85);
    assert_eq!(body["hero"]["nome"], "Thor");
    assert_eq!(body["hero"]["origem"], "Asgard");

    // Explicit null clears the origin
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "origem": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["hero"]["origem"].is_null());

    // Invalid update field rejected
    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "nivel": 101 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hero_delete_confirms_with_name() {
    let (app, _temp) = test_app();
    let token = register_and_login(&app, "marta").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/heroes/create",
        Some(&token),
        Some(json!({ "nome": "Hulk", "habilidade": "Super Strength" })),
    )
    .await;
    let hero_id = body["hero"]["id"].as_i64().unwrap();
    let uri = format!("/api/heroes/{}", hero_id);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Hulk"));

    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn item_crud_lifecycle() {
    let (app, _temp) = test_app();
    let token = register_and_login(&app, "nina").await;

    // Title required
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/items/create",
        Some(&token),
        Some(json!({ "description": "no title" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/items/create",
        Some(&token),
        Some(json!({ "title": "Groceries", "description": "milk and eggs" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item"]["status"], "active");
    let item_id = body["item"]["id"].as_i64().unwrap();
    let created_updated_at = body["item"]["updatedAt"].as_str().unwrap().to_string();
    let uri = format!("/api/items/{}", item_id);

    let (status, body) = send(&app, Method::GET, "/api/items/list", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    // Status-only update preserves title and description, bumps updatedAt
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "status": "done" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["status"], "done");
    assert_eq!(body["item"]["title"], "Groceries");
    assert_eq!(body["item"]["description"], "milk and eggs");
    assert!(body["item"]["updatedAt"].as_str().unwrap() > created_updated_at.as_str());

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Groceries"));

    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn items_are_listed_newest_first_and_scoped_to_owner() {
    let (app, _temp) = test_app();
    let token_a = register_and_login(&app, "omar").await;
    let token_b = register_and_login(&app, "pam").await;

    for title in ["first", "second"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/items/create",
            Some(&token_a),
            Some(json!({ "title": title })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    send(
        &app,
        Method::POST,
        "/api/items/create",
        Some(&token_b),
        Some(json!({ "title": "not yours" })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/items/list", Some(&token_a), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let titles: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}
