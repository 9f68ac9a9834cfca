use crate::AppState;
use crate::config::AuthConfig;
use crate::db::models::user::{AuthUser, User};
use crate::db::repositories::UsersRepo;
use crate::error::AppError;
use axum::{
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid, // user_id
    pub username: String,
    pub exp: u64, // expiration time
    pub iat: u64, // issued at
    pub jti: String,
}

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn token_expires_in(&self) -> u64 {
        self.config.token_expires_in
    }

    pub fn generate_token(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            exp: now + self.config.token_expires_in,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Rejects every request without a valid bearer token for an active user;
/// the rejection body is identical whatever the target resource was.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .map(|token| token.to_string())
        .ok_or_else(|| AppError::auth("Authentication credentials were not provided"))?;

    let claims = state
        .auth_service
        .verify_token(&token)
        .map_err(|_| AppError::auth("Invalid token"))?;

    let mut conn = state.db.get()?;
    let user = UsersRepo::find_by_id(&mut conn, claims.sub)?
        .filter(|user| user.is_active)
        .ok_or_else(|| AppError::auth("Invalid token"))?;

    request.extensions_mut().insert(AuthUser::from(&user));

    Ok(next.run(request).await)
}
