//! HeroTeam Backend Library
//!
//! Exposes core modules for use by the binary and integration tests.

pub mod app;
pub mod auth;
pub mod heroes;
pub mod items;
pub mod middleware;

pub use app::{build_router, AppState};
