use crate::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::error::{AppError, AppResult};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use super::AppState;

/// Register a new user account
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if state
        .repository
        .get_user_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::UsernameTaken(payload.username));
    }

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

    let user = state
        .repository
        .create_user(&payload.username, &password_hash)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
        }),
    ))
}

/// Login to get JWT token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .repository
        .get_user_by_username(&payload.username)
        .await?
        .ok_or(AppError::UserNotFound(payload.username.clone()))?;

    // Verify password
    let password_matches = bcrypt::verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

    if !password_matches {
        return Err(AppError::InvalidCredentials);
    }

    if !user.is_active {
        return Err(AppError::Unauthorized("User account is inactive".to_string()));
    }

    // Generate JWT token using auth service from state
    let token = state
        .auth_service
        .generate_token(&user.id.to_string(), &user.username)?;

    Ok(Json(LoginResponse {
        token,
        username: user.username,
    }))
}
