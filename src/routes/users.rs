use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::AppState;
use crate::db::models::user::AuthUser;
use crate::error::AppError;
use crate::query::{CollectionQuery, Page, resolve_query};
use crate::serializers::{LinkContext, UserBody, user_body};
use crate::services::UsersService;
use crate::validation::ValidatedJson;
use crate::validation::rules::validate_username_format;

pub const USER_ORDERING_FIELDS: &[&str] = &["username"];

// Request bodies
#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom(function = "validate_username_format"))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default, Clone)]
pub struct ProfileUpdateRequest {
    pub address_first: Option<String>,
    pub address_second: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub profile: Option<ProfileUpdateRequest>,
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    Query(raw): Query<CollectionQuery>,
) -> Result<Json<Page<UserBody>>, AppError> {
    let query = resolve_query(&raw, USER_ORDERING_FIELDS, &state.config.pagination())?;

    let mut conn = state.db.get()?;
    let (rows, count) = UsersService::list(&mut conn, &query)?;

    let results = rows
        .iter()
        .map(|(user, profile)| user_body(user, profile, &links))
        .collect();
    Ok(Json(Page::new(
        results,
        count,
        &query,
        links.base_url(),
        "/users",
        &[],
    )))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserBody>), AppError> {
    let mut conn = state.db.get()?;
    let (user, profile) = UsersService::create(&mut conn, &payload, state.config.bcrypt_cost)?;
    Ok((
        StatusCode::CREATED,
        Json(user_body(&user, &profile, &links)),
    ))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    Path(username): Path<String>,
) -> Result<Json<UserBody>, AppError> {
    let mut conn = state.db.get()?;
    let (user, profile) = UsersService::get_by_username(&mut conn, &username)?;
    Ok(Json(user_body(&user, &profile, &links)))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    Path(username): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserBody>, AppError> {
    let mut conn = state.db.get()?;
    let (user, profile) =
        UsersService::update(&mut conn, &username, &payload, state.config.bcrypt_cost)?;
    Ok(Json(user_body(&user, &profile, &links)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut conn = state.db.get()?;
    UsersService::delete(&mut conn, &username)?;
    Ok(StatusCode::NO_CONTENT)
}
