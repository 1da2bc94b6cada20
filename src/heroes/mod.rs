//! Heroes Module
//! Mission: User-owned hero teams with closed-vocabulary validation

pub mod api;
pub mod models;
pub mod store;
pub mod validators;

pub use models::Hero;
pub use store::HeroStore;
