//! Hero API Endpoints
//! Mission: Authenticated CRUD over each user's hero team
//!
//! Caller identity comes exclusively from the claims the auth middleware
//! placed in request extensions; owner ids in payloads are never trusted.

use crate::app::AppState;
use crate::auth::models::Claims;
use crate::heroes::{
    models::{
        CreateHeroRequest, DeleteHeroResponse, HeroResponse, NewHero, TeamResponse,
        UpdateHeroRequest,
    },
    store::is_unique_violation,
    validators::{
        valid_ability, valid_category, valid_level, valid_name, valid_origin, VALID_ABILITIES,
        VALID_CATEGORIES, VALID_NAMES, VALID_ORIGINS,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use tracing::error;

/// Create hero - POST /api/heroes/create
pub async fn create_hero(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateHeroRequest>,
) -> Result<(StatusCode, Json<HeroResponse>), HeroApiError> {
    let name = payload.name.as_deref().filter(|s| !s.is_empty());
    let ability = payload.ability.as_deref().filter(|s| !s.is_empty());

    let (Some(name), Some(ability)) = (name, ability) else {
        return Err(HeroApiError::MissingRequiredFields);
    };

    if !valid_name(name) {
        return Err(HeroApiError::InvalidName);
    }
    if !valid_ability(ability) {
        return Err(HeroApiError::InvalidAbility);
    }

    let level = payload.level.unwrap_or(1);
    if !valid_level(level) {
        return Err(HeroApiError::InvalidLevel);
    }

    let category = match payload.category.as_deref().filter(|s| !s.is_empty()) {
        Some(c) if !valid_category(c) => return Err(HeroApiError::InvalidCategory),
        Some(c) => c.to_string(),
        None => "Hero".to_string(),
    };

    let origin = payload.origin.filter(|s| !s.is_empty());
    if !valid_origin(origin.as_deref()) {
        return Err(HeroApiError::InvalidOrigin);
    }

    let existing = state
        .hero_store
        .find_by_owner_and_name(claims.sub, name)
        .map_err(HeroApiError::internal)?;
    if existing.is_some() {
        return Err(HeroApiError::DuplicateHero);
    }

    let hero = state
        .hero_store
        .create(
            claims.sub,
            NewHero {
                name: name.to_string(),
                ability: ability.to_string(),
                level,
                category,
                origin,
            },
        )
        .map_err(|e| {
            // Lost the race against a concurrent create of the same name
            if is_unique_violation(&e) {
                HeroApiError::DuplicateHero
            } else {
                HeroApiError::internal(e)
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(HeroResponse {
            message: "Hero added to your team!".to_string(),
            hero,
        }),
    ))
}

/// List team - GET /api/heroes/team
pub async fn get_heroes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<TeamResponse>, HeroApiError> {
    let team = state
        .hero_store
        .list_by_owner(claims.sub)
        .map_err(HeroApiError::internal)?;

    Ok(Json(TeamResponse {
        message: "Hero team found".to_string(),
        total_heroes: team.len(),
        team,
    }))
}

/// Get hero - GET /api/heroes/:id
pub async fn get_hero(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<HeroResponse>, HeroApiError> {
    let hero = state
        .hero_store
        .get_by_owner(claims.sub, id)
        .map_err(HeroApiError::internal)?
        .ok_or(HeroApiError::NotFound)?;

    Ok(Json(HeroResponse {
        message: "Hero found".to_string(),
        hero,
    }))
}

/// Update hero - PUT /api/heroes/:id
pub async fn update_hero(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateHeroRequest>,
) -> Result<Json<HeroResponse>, HeroApiError> {
    let hero = state
        .hero_store
        .get_by_owner(claims.sub, id)
        .map_err(HeroApiError::internal)?
        .ok_or(HeroApiError::NotFound)?;

    let name = match payload.name.as_deref().filter(|s| !s.is_empty()) {
        Some(n) if !valid_name(n) => return Err(HeroApiError::InvalidName),
        Some(n) => n.to_string(),
        None => hero.name,
    };

    let ability = match payload.ability.as_deref().filter(|s| !s.is_empty()) {
        Some(a) if !valid_ability(a) => return Err(HeroApiError::InvalidAbility),
        Some(a) => a.to_string(),
        None => hero.ability,
    };

    let level = payload.level.unwrap_or(hero.level);
    if !valid_level(level) {
        return Err(HeroApiError::InvalidLevel);
    }

    let category = match payload.category.as_deref().filter(|s| !s.is_empty()) {
        Some(c) if !valid_category(c) => return Err(HeroApiError::InvalidCategory),
        Some(c) => c.to_string(),
        None => hero.category,
    };

    // Outer None keeps the stored value; an explicit null clears it
    let origin = match payload.origin {
        Some(o) => o,
        None => hero.origin,
    };
    if !valid_origin(origin.as_deref()) {
        return Err(HeroApiError::InvalidOrigin);
    }

    let updated = state
        .hero_store
        .update(
            claims.sub,
            id,
            &NewHero {
                name,
                ability,
                level,
                category,
                origin,
            },
        )
        .map_err(|e| {
            // Renaming onto a name already on this team
            if is_unique_violation(&e) {
                HeroApiError::DuplicateHero
            } else {
                HeroApiError::internal(e)
            }
        })?;
    if !updated {
        return Err(HeroApiError::NotFound);
    }

    // Re-read so the response reflects authoritative stored values
    let hero = state
        .hero_store
        .get_by_owner(claims.sub, id)
        .map_err(HeroApiError::internal)?
        .ok_or(HeroApiError::NotFound)?;

    Ok(Json(HeroResponse {
        message: "Hero updated successfully!".to_string(),
        hero,
    }))
}

/// Delete hero - DELETE /api/heroes/:id
pub async fn delete_hero(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteHeroResponse>, HeroApiError> {
    let hero = state
        .hero_store
        .get_by_owner(claims.sub, id)
        .map_err(HeroApiError::internal)?
        .ok_or(HeroApiError::NotFound)?;

    let deleted = state
        .hero_store
        .delete(claims.sub, id)
        .map_err(HeroApiError::internal)?;
    if !deleted {
        return Err(HeroApiError::NotFound);
    }

    Ok(Json(DeleteHeroResponse {
        message: format!("{} has been removed from your team!", hero.name),
    }))
}

/// Hero API errors
#[derive(Debug)]
pub enum HeroApiError {
    MissingRequiredFields,
    InvalidName,
    InvalidAbility,
    InvalidLevel,
    InvalidCategory,
    InvalidOrigin,
    DuplicateHero,
    NotFound,
    InternalError,
}

impl HeroApiError {
    /// Log the underlying failure server-side, surface a generic 500
    fn internal(err: anyhow::Error) -> Self {
        error!("Hero operation failed: {:#}", err);
        HeroApiError::InternalError
    }
}

impl IntoResponse for HeroApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HeroApiError::MissingRequiredFields => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Name and ability are required" }),
            ),
            HeroApiError::InvalidName => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid hero name", "validNames": VALID_NAMES }),
            ),
            HeroApiError::InvalidAbility => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid ability", "validAbilities": VALID_ABILITIES }),
            ),
            HeroApiError::InvalidLevel => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Level must be between 1 and 100" }),
            ),
            HeroApiError::InvalidCategory => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid category", "validCategories": VALID_CATEGORIES }),
            ),
            HeroApiError::InvalidOrigin => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid origin", "validOrigins": VALID_ORIGINS }),
            ),
            HeroApiError::DuplicateHero => (
                StatusCode::CONFLICT,
                json!({ "error": "This hero is already on your team" }),
            ),
            HeroApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Hero not found on your team" }),
            ),
            HeroApiError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_api_error_statuses() {
        assert_eq!(
            HeroApiError::MissingRequiredFields.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HeroApiError::InvalidLevel.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HeroApiError::DuplicateHero.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            HeroApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HeroApiError::InternalError.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
