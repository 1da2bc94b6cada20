//! Application Assembly
//! Mission: Wire stores, auth, and routes into one axum Router

use crate::{
    auth::{api as auth_api, auth_middleware, AuthState, JwtHandler},
    heroes::{api as hero_api, HeroStore},
    items::{api as item_api, ItemStore},
    middleware::request_logging,
};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// State shared by the protected resource handlers
#[derive(Clone)]
pub struct AppState {
    pub hero_store: Arc<HeroStore>,
    pub item_store: Arc<ItemStore>,
}

/// Assemble the full application router.
///
/// Auth routes are public; hero and item routes sit behind the JWT
/// middleware, which is the single enforcement point for caller identity.
pub fn build_router(
    auth_state: AuthState,
    app_state: AppState,
    jwt_handler: Arc<JwtHandler>,
) -> Router {
    let auth_router = Router::new()
        .route("/api/auth/register", post(auth_api::register))
        .route("/api/auth/login", post(auth_api::login))
        .with_state(auth_state);

    let protected_routes = Router::new()
        .route("/api/heroes/create", post(hero_api::create_hero))
        .route("/api/heroes/team", get(hero_api::get_heroes))
        .route("/api/heroes/:id", get(hero_api::get_hero))
        .route("/api/heroes/:id", put(hero_api::update_hero))
        .route("/api/heroes/:id", delete(hero_api::delete_hero))
        .route("/api/items/create", post(item_api::create_item))
        .route("/api/items/list", get(item_api::get_items))
        .route("/api/items/:id", get(item_api::get_item))
        .route("/api/items/:id", put(item_api::update_item))
        .route("/api/items/:id", delete(item_api::delete_item))
        .route_layer(middleware::from_fn_with_state(
            jwt_handler,
            auth_middleware,
        ))
        .with_state(app_state);

    let public_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_router)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

/// Liveness probe
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
