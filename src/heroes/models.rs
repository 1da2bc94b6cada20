//! Hero Models
//! Mission: Define hero records and API payloads
//!
//! Wire field names (`nome`, `habilidade`, `nivel`, `categoria`, `origem`)
//! are kept for client compatibility and mapped onto English struct fields.

use serde::{Deserialize, Serialize};

/// A hero on a user's team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "habilidade")]
    pub ability: String,
    #[serde(rename = "nivel")]
    pub level: i64,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "origem")]
    pub origin: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Validated field set handed to the store on create
#[derive(Debug)]
pub struct NewHero {
    pub name: String,
    pub ability: String,
    pub level: i64,
    pub category: String,
    pub origin: Option<String>,
}

/// Create request body
#[derive(Debug, Deserialize)]
pub struct CreateHeroRequest {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "habilidade")]
    pub ability: Option<String>,
    #[serde(rename = "nivel")]
    pub level: Option<i64>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "origem")]
    pub origin: Option<String>,
}

/// Update request body. All fields optional; an omitted field keeps its
/// stored value. `origem` distinguishes omitted (outer None) from an
/// explicit null (inner None), which clears the field.
#[derive(Debug, Deserialize)]
pub struct UpdateHeroRequest {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "habilidade")]
    pub ability: Option<String>,
    #[serde(rename = "nivel")]
    pub level: Option<i64>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "origem", default, with = "double_option")]
    pub origin: Option<Option<String>>,
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

/// Single-hero response
#[derive(Debug, Serialize)]
pub struct HeroResponse {
    pub message: String,
    pub hero: Hero,
}

/// Team listing response
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub message: String,
    #[serde(rename = "totalHeroes")]
    pub total_heroes: usize,
    pub team: Vec<Hero>,
}

/// Delete confirmation response
#[derive(Debug, Serialize)]
pub struct DeleteHeroResponse {
    pub message: String,
}
