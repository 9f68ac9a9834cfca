use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::db::models::user::AuthUser;
use crate::error::AppError;
use crate::query::{CollectionQuery, Page, resolve_query};
use crate::routes::double_option;
use crate::serializers::{LinkContext, SprintBody, sprint_body};
use crate::services::SprintsService;
use crate::validation::ValidatedJson;

pub const SPRINT_ORDERING_FIELDS: &[&str] = &["end", "name"];

// Request bodies
#[derive(Deserialize, Validate)]
pub struct CreateSprintRequest {
    #[validate(length(max = 100, message = "Sprint name is too long (max 100 characters)"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub end: chrono::NaiveDate,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateSprintRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub end: Option<chrono::NaiveDate>,
}

pub async fn list_sprints(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    Query(raw): Query<CollectionQuery>,
) -> Result<Json<Page<SprintBody>>, AppError> {
    let query = resolve_query(&raw, SPRINT_ORDERING_FIELDS, &state.config.pagination())?;

    let mut conn = state.db.get()?;
    let (sprints, count) = SprintsService::list(&mut conn, &query)?;

    let results = sprints
        .iter()
        .map(|sprint| sprint_body(sprint, &links))
        .collect();
    Ok(Json(Page::new(
        results,
        count,
        &query,
        links.base_url(),
        "/sprints",
        &[],
    )))
}

pub async fn create_sprint(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    ValidatedJson(payload): ValidatedJson<CreateSprintRequest>,
) -> Result<(StatusCode, Json<SprintBody>), AppError> {
    let mut conn = state.db.get()?;
    let sprint = SprintsService::create(&mut conn, &payload)?;
    Ok((StatusCode::CREATED, Json(sprint_body(&sprint, &links))))
}

pub async fn get_sprint(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    Path(sprint_id): Path<Uuid>,
) -> Result<Json<SprintBody>, AppError> {
    let mut conn = state.db.get()?;
    let sprint = SprintsService::get_by_id(&mut conn, sprint_id)?;
    Ok(Json(sprint_body(&sprint, &links)))
}

pub async fn update_sprint(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    Path(sprint_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateSprintRequest>,
) -> Result<Json<SprintBody>, AppError> {
    let mut conn = state.db.get()?;
    let sprint = SprintsService::update(&mut conn, sprint_id, &payload)?;
    Ok(Json(sprint_body(&sprint, &links)))
}

pub async fn delete_sprint(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(sprint_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut conn = state.db.get()?;
    SprintsService::delete(&mut conn, sprint_id)?;
    Ok(StatusCode::NO_CONTENT)
}
