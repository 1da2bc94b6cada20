//! HeroTeam Backend
//! Mission: Authenticated CRUD API for user-owned hero teams and items

use anyhow::{Context, Result};
use dotenv::dotenv;
use heroteam_backend::{
    app::{build_router, AppState},
    auth::{AuthState, JwtHandler, UserStore},
    heroes::HeroStore,
    items::ItemStore,
};
use std::path::{Path, PathBuf};
use std::{env, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    info!("🚀 HeroTeam backend starting");

    // Fail fast when the signing secret is missing; every token issued with
    // an accidental default would outlive a restart.
    let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

    let db_path = resolve_data_path(env::var("DB_PATH").ok(), "heroes.sqlite");

    let user_store = Arc::new(UserStore::new(&db_path)?);
    let hero_store = Arc::new(HeroStore::new(&db_path)?);
    let item_store = Arc::new(ItemStore::new(&db_path)?);
    let jwt_handler = Arc::new(JwtHandler::new(jwt_secret));

    info!("💾 Database initialized at: {}", db_path);

    let auth_state = AuthState::new(user_store, jwt_handler.clone());
    let app_state = AppState {
        hero_store,
        item_store,
    };

    let app = build_router(auth_state, app_state, jwt_handler);

    let port = env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heroteam_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolve a database path. Relative paths are anchored at the crate
/// manifest dir so running from elsewhere doesn't create a stray empty DB.
fn resolve_data_path(env_value: Option<String>, default_filename: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(raw) = env_value.filter(|v| !v.trim().is_empty()) else {
        return base.join(default_filename).to_string_lossy().to_string();
    };

    let p = PathBuf::from(raw);
    if p.is_absolute() {
        return p.to_string_lossy().to_string();
    }

    base.join(p).to_string_lossy().to_string()
}

fn load_env() {
    // Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // Also try the manifest-dir .env (common when running with --manifest-path)
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let candidate = manifest_dir.join(".env");
    if candidate.exists() {
        let _ = dotenv::from_path(&candidate);
    }
}
