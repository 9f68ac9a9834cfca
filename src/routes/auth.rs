use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::db::models::user::{TokenRequest, TokenResponse};
use crate::db::repositories::UsersRepo;
use crate::error::AppError;

/// Exchanges a username/password pair for a bearer token. The failure
/// message never says which of the two was wrong.
pub async fn obtain_token(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let mut conn = state.db.get()?;

    let user = UsersRepo::find_by_username(&mut conn, &payload.username)?
        .ok_or_else(|| AppError::auth("Invalid username or password"))?;

    if !bcrypt::verify(&payload.password, &user.password_hash)? {
        return Err(AppError::auth("Invalid username or password"));
    }

    if !user.is_active {
        return Err(AppError::auth("Account is disabled"));
    }

    let token = state.auth_service.generate_token(&user)?;
    Ok(Json(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth_service.token_expires_in(),
        username: user.username,
    }))
}
