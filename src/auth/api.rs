//! Authentication API Endpoints
//! Mission: Provide registration and login endpoints

use crate::auth::{
    jwt::JwtHandler,
    models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse},
    user_store::{is_unique_violation, UserStore},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Register endpoint - POST /api/auth/register
pub async fn register(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthApiError> {
    if payload.username.is_empty() || payload.password.is_empty() || payload.email.is_empty() {
        return Err(AuthApiError::MissingRegistrationFields);
    }
    if payload.password.len() < 4 {
        return Err(AuthApiError::WeakPassword);
    }

    let existing = state
        .user_store
        .get_user_by_username(&payload.username)
        .map_err(AuthApiError::internal)?;
    if existing.is_some() {
        return Err(AuthApiError::UserAlreadyExists);
    }

    if state
        .user_store
        .email_exists(&payload.email)
        .map_err(AuthApiError::internal)?
    {
        return Err(AuthApiError::EmailAlreadyExists);
    }

    let user = state
        .user_store
        .create_user(&payload.username, &payload.password, &payload.email)
        .map_err(|e| {
            // Lost the race against a concurrent registration of the same
            // username or email
            if is_unique_violation(&e) {
                AuthApiError::UserAlreadyExists
            } else {
                AuthApiError::internal(e)
            }
        })?;

    info!("✅ User registered: {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse {
                username: user.username,
            },
        }),
    ))
}

/// Login endpoint - POST /api/auth/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AuthApiError::MissingLoginFields);
    }

    info!("🔐 Login attempt: {}", payload.username);

    let valid = state
        .user_store
        .verify_password(&payload.username, &payload.password)
        .map_err(AuthApiError::internal)?;

    // Identical error for unknown user and wrong password so the endpoint
    // cannot be used to enumerate usernames.
    if !valid {
        warn!("❌ Failed login attempt: {}", payload.username);
        return Err(AuthApiError::InvalidCredentials);
    }

    let user = state
        .user_store
        .get_user_by_username(&payload.username)
        .map_err(AuthApiError::internal)?
        .ok_or(AuthApiError::InvalidCredentials)?;

    let token = state
        .jwt_handler
        .generate_token(&user)
        .map_err(AuthApiError::internal)?;

    info!("✅ Login successful: {}", user.username);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: UserResponse {
            username: user.username,
        },
        token,
        redirect: "/dashboard".to_string(),
    }))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    MissingRegistrationFields,
    MissingLoginFields,
    WeakPassword,
    UserAlreadyExists,
    EmailAlreadyExists,
    InvalidCredentials,
    InternalError,
}

impl AuthApiError {
    /// Log the underlying failure server-side, surface a generic 500
    fn internal(err: anyhow::Error) -> Self {
        error!("Auth operation failed: {:#}", err);
        AuthApiError::InternalError
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::MissingRegistrationFields => (
                StatusCode::BAD_REQUEST,
                "username, password and email are required",
            ),
            AuthApiError::MissingLoginFields => (
                StatusCode::BAD_REQUEST,
                "username and password are required",
            ),
            AuthApiError::WeakPassword => (
                StatusCode::BAD_REQUEST,
                "password must be at least 4 characters",
            ),
            AuthApiError::UserAlreadyExists => (StatusCode::CONFLICT, "Username already exists"),
            AuthApiError::EmailAlreadyExists => (StatusCode::CONFLICT, "Email already registered"),
            AuthApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
