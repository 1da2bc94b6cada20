//! Authentication Module
//! Mission: Secure API access with password login and JWT bearer tokens

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod user_store;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use models::Claims;
pub use user_store::UserStore;
