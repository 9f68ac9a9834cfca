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
use crate::db::enums::TaskStatus;
use crate::db::models::user::AuthUser;
use crate::error::AppError;
use crate::query::{CollectionQuery, Page, resolve_query};
use crate::routes::double_option;
use crate::serializers::{LinkContext, TaskBody, task_body};
use crate::services::TasksService;
use crate::validation::ValidatedJson;

pub const TASK_ORDERING_FIELDS: &[&str] =
    &["order", "name", "status", "due", "started", "completed"];

// Request bodies
#[derive(Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Task name must be between 1 and 100 characters"
    ))]
    pub name: String,
    pub description: Option<String>,
    pub sprint: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub order: Option<i32>,
    pub assigned: Option<String>,
    pub started: Option<chrono::NaiveDate>,
    pub due: Option<chrono::NaiveDate>,
    pub completed: Option<chrono::NaiveDate>,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateTaskRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Task name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub sprint: Option<Option<Uuid>>,
    pub status: Option<TaskStatus>,
    pub order: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub started: Option<Option<chrono::NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub due: Option<Option<chrono::NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub completed: Option<Option<chrono::NaiveDate>>,
}

/// Listing parameters: the shared collection query plus the task-specific
/// `sprint` and `assigned` filters.
#[derive(Deserialize, Default)]
pub struct TaskListParams {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sprint: Option<Uuid>,
    pub assigned: Option<String>,
}

impl TaskListParams {
    fn collection(&self) -> CollectionQuery {
        CollectionQuery {
            search: self.search.clone(),
            ordering: self.ordering.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    fn filter_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(sprint) = self.sprint {
            params.push(("sprint", sprint.to_string()));
        }
        if let Some(assigned) = &self.assigned {
            params.push(("assigned", assigned.clone()));
        }
        params
    }
}

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    Query(params): Query<TaskListParams>,
) -> Result<Json<Page<TaskBody>>, AppError> {
    let query = resolve_query(
        &params.collection(),
        TASK_ORDERING_FIELDS,
        &state.config.pagination(),
    )?;

    let mut conn = state.db.get()?;
    let (records, count) =
        TasksService::list(&mut conn, params.sprint, params.assigned.as_deref(), &query)?;

    let results = records.iter().map(|record| task_body(record, &links)).collect();
    Ok(Json(Page::new(
        results,
        count,
        &query,
        links.base_url(),
        "/tasks",
        &params.filter_params(),
    )))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    ValidatedJson(payload): ValidatedJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskBody>), AppError> {
    let mut conn = state.db.get()?;
    let record = TasksService::create(&mut conn, &payload)?;
    Ok((StatusCode::CREATED, Json(task_body(&record, &links))))
}

pub async fn get_task(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    Path(task_id): Path<Uuid>,
) -> Result<Json<TaskBody>, AppError> {
    let mut conn = state.db.get()?;
    let record = TasksService::get_by_id(&mut conn, task_id)?;
    Ok(Json(task_body(&record, &links)))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    links: LinkContext,
    Path(task_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTaskRequest>,
) -> Result<Json<TaskBody>, AppError> {
    let mut conn = state.db.get()?;
    let record = TasksService::update(&mut conn, task_id, &payload)?;
    Ok(Json(task_body(&record, &links)))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(task_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut conn = state.db.get()?;
    TasksService::delete(&mut conn, task_id)?;
    Ok(StatusCode::NO_CONTENT)
}
