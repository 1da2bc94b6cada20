//! Item Models
//! Mission: Define item records and API payloads

use serde::{Deserialize, Serialize};

/// A user-owned item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Create request body
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Update request body. All fields optional; an omitted field keeps its
/// stored value. `description` distinguishes omitted (outer None) from an
/// explicit null (inner None), which clears the field.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub title: Option<String>,
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
}

/// Serde helper: absent field -> None, null -> Some(None), value -> Some(Some(v))
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

/// Single-item response
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub message: String,
    pub item: Item,
}

/// Item listing response
#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub message: String,
    pub count: usize,
    pub items: Vec<Item>,
}

/// Delete confirmation response
#[derive(Debug, Serialize)]
pub struct DeleteItemResponse {
    pub message: String,
}
