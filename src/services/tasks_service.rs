use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::error_codes,
    db::models::task::{NewTask, TaskChangeset, TaskRecord},
    db::repositories::{SprintsRepo, TaskFilters, TasksRepo, UsersRepo},
    error::AppError,
    query::ResolvedQuery,
    validation::task::{TaskWrite, validate_task_write},
};

pub struct TasksService;

impl TasksService {
    pub fn list(
        conn: &mut PgConnection,
        sprint: Option<Uuid>,
        assigned: Option<&str>,
        query: &ResolvedQuery,
    ) -> Result<(Vec<TaskRecord>, i64), AppError> {
        let mut filters = TaskFilters {
            sprint_id: sprint,
            assigned_id: None,
        };

        if let Some(username) = assigned {
            match UsersRepo::find_by_username(conn, username)? {
                Some(user) => filters.assigned_id = Some(user.id),
                // Unknown assignee matches nothing.
                None => return Ok((Vec::new(), 0)),
            }
        }

        Ok(TasksRepo::search(conn, &filters, query)?)
    }

    pub fn get_by_id(conn: &mut PgConnection, task_id: Uuid) -> Result<TaskRecord, AppError> {
        TasksRepo::find_record_by_id(conn, task_id)?.ok_or_else(|| AppError::not_found("task"))
    }

    pub fn create(
        conn: &mut PgConnection,
        req: &crate::routes::tasks::CreateTaskRequest,
    ) -> Result<TaskRecord, AppError> {
        let today = Utc::now().date_naive();

        conn.transaction::<TaskRecord, AppError, _>(|conn| {
            let sprint_end = match req.sprint {
                Some(sprint_id) => Some(resolve_sprint_end(conn, sprint_id)?),
                None => None,
            };

            let (assigned_id, assigned_username) = match req.assigned.as_deref() {
                Some(username) => {
                    let user = resolve_assignee(conn, username)?;
                    (Some(user.0), Some(user.1))
                }
                None => (None, None),
            };

            let status = req.status.unwrap_or_default();
            let proposed = TaskWrite {
                name: &req.name,
                sprint_id: req.sprint,
                status,
                started: req.started,
                completed: req.completed,
            };
            validate_task_write(&proposed, None, sprint_end, today)
                .map_err(AppError::validation_errors)?;

            let new_task = NewTask {
                name: req.name.clone(),
                description: req.description.clone(),
                sprint_id: req.sprint,
                status,
                sort_order: req.order.unwrap_or(0),
                assigned_id,
                started: req.started,
                due: req.due,
                completed: req.completed,
            };
            let task = TasksRepo::insert(conn, &new_task)?;
            Ok(TaskRecord {
                task,
                assigned_username,
            })
        })
    }

    pub fn update(
        conn: &mut PgConnection,
        task_id: Uuid,
        req: &crate::routes::tasks::UpdateTaskRequest,
    ) -> Result<TaskRecord, AppError> {
        let today = Utc::now().date_naive();

        conn.transaction::<TaskRecord, AppError, _>(|conn| {
            let prior =
                TasksRepo::find_by_id(conn, task_id)?.ok_or_else(|| AppError::not_found("task"))?;

            // Absent fields keep their stored value; explicit nulls clear.
            let name = req.name.clone().unwrap_or_else(|| prior.name.clone());
            let description = match &req.description {
                Some(value) => value.clone(),
                None => prior.description.clone(),
            };
            let sprint_id = match req.sprint {
                Some(value) => value,
                None => prior.sprint_id,
            };
            let status = req.status.unwrap_or(prior.status);
            let sort_order = req.order.unwrap_or(prior.sort_order);
            let started = match req.started {
                Some(value) => value,
                None => prior.started,
            };
            let due = match req.due {
                Some(value) => value,
                None => prior.due,
            };
            let completed = match req.completed {
                Some(value) => value,
                None => prior.completed,
            };
            let assigned_id = match &req.assigned {
                Some(Some(username)) => Some(resolve_assignee(conn, username)?.0),
                Some(None) => None,
                None => prior.assigned_id,
            };

            let sprint_end = match sprint_id {
                Some(id) => Some(resolve_sprint_end(conn, id)?),
                None => None,
            };

            let proposed = TaskWrite {
                name: &name,
                sprint_id,
                status,
                started,
                completed,
            };
            validate_task_write(&proposed, Some(&prior), sprint_end, today)
                .map_err(AppError::validation_errors)?;

            let changes = TaskChangeset {
                name,
                description,
                sprint_id,
                status,
                sort_order,
                assigned_id,
                started,
                due,
                completed,
                updated_at: Utc::now(),
            };
            TasksRepo::update(conn, task_id, &changes)?;

            TasksRepo::find_record_by_id(conn, task_id)?
                .ok_or_else(|| AppError::internal("task disappeared during update"))
        })
    }

    pub fn delete(conn: &mut PgConnection, task_id: Uuid) -> Result<(), AppError> {
        let _existing =
            TasksRepo::find_by_id(conn, task_id)?.ok_or_else(|| AppError::not_found("task"))?;

        TasksRepo::delete_by_id(conn, task_id)?;
        Ok(())
    }
}

/// A sprint referenced in a request body that does not exist is a field
/// error, not a missing-resource response.
fn resolve_sprint_end(
    conn: &mut PgConnection,
    sprint_id: Uuid,
) -> Result<chrono::NaiveDate, AppError> {
    SprintsRepo::find_by_id(conn, sprint_id)?
        .map(|sprint| sprint.end)
        .ok_or_else(|| {
            AppError::validation(
                Some("sprint"),
                error_codes::TASK_UNKNOWN_SPRINT,
                "Unknown sprint",
            )
        })
}

fn resolve_assignee(conn: &mut PgConnection, username: &str) -> Result<(Uuid, String), AppError> {
    UsersRepo::find_by_username(conn, username)?
        .map(|user| (user.id, user.username))
        .ok_or_else(|| {
            AppError::validation(
                Some("assigned"),
                error_codes::TASK_UNKNOWN_ASSIGNEE,
                "Unknown user",
            )
        })
}
