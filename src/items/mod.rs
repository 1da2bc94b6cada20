//! Items Module
//! Mission: User-owned item collections

pub mod api;
pub mod models;
pub mod store;

pub use models::Item;
pub use store::ItemStore;
