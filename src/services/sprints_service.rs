use chrono::Utc;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::{
    db::models::api::error_codes,
    db::models::sprint::{NewSprint, Sprint, SprintChangeset},
    db::repositories::{SprintsRepo, TasksRepo},
    error::AppError,
    query::ResolvedQuery,
    validation::sprint::{validate_create_sprint, validate_update_sprint},
};

pub struct SprintsService;

impl SprintsService {
    pub fn list(
        conn: &mut PgConnection,
        query: &ResolvedQuery,
    ) -> Result<(Vec<Sprint>, i64), AppError> {
        Ok(SprintsRepo::search(conn, query)?)
    }

    pub fn get_by_id(conn: &mut PgConnection, sprint_id: Uuid) -> Result<Sprint, AppError> {
        SprintsRepo::find_by_id(conn, sprint_id)?.ok_or_else(|| AppError::not_found("sprint"))
    }

    pub fn create(
        conn: &mut PgConnection,
        req: &crate::routes::sprints::CreateSprintRequest,
    ) -> Result<Sprint, AppError> {
        let today = Utc::now().date_naive();
        validate_create_sprint(req.end, today).map_err(AppError::validation_errors)?;

        conn.transaction::<Sprint, AppError, _>(|conn| {
            if SprintsRepo::end_date_taken(conn, req.end, None)? {
                return Err(end_date_conflict());
            }

            let new_sprint = NewSprint {
                name: req.name.clone(),
                description: req.description.clone(),
                end: req.end,
            };
            SprintsRepo::insert(conn, &new_sprint).map_err(map_unique_end)
        })
    }

    pub fn update(
        conn: &mut PgConnection,
        sprint_id: Uuid,
        req: &crate::routes::sprints::UpdateSprintRequest,
    ) -> Result<Sprint, AppError> {
        let today = Utc::now().date_naive();

        conn.transaction::<Sprint, AppError, _>(|conn| {
            let prior = SprintsRepo::find_by_id(conn, sprint_id)?
                .ok_or_else(|| AppError::not_found("sprint"))?;

            let new_end = req.end.unwrap_or(prior.end);
            validate_update_sprint(new_end, prior.end, today)
                .map_err(AppError::validation_errors)?;

            if new_end != prior.end && SprintsRepo::end_date_taken(conn, new_end, Some(sprint_id))?
            {
                return Err(end_date_conflict());
            }

            let changes = SprintChangeset {
                name: match &req.name {
                    Some(value) => value.clone(),
                    None => prior.name.clone(),
                },
                description: match &req.description {
                    Some(value) => value.clone(),
                    None => prior.description.clone(),
                },
                end: new_end,
                updated_at: Utc::now(),
            };
            SprintsRepo::update(conn, sprint_id, &changes).map_err(map_unique_end)
        })
    }

    /// Deleting a sprint takes its tasks with it, mirroring the cascade at
    /// the storage layer.
    pub fn delete(conn: &mut PgConnection, sprint_id: Uuid) -> Result<(), AppError> {
        conn.transaction::<(), AppError, _>(|conn| {
            let _existing = SprintsRepo::find_by_id(conn, sprint_id)?
                .ok_or_else(|| AppError::not_found("sprint"))?;

            TasksRepo::delete_by_sprint(conn, sprint_id)?;
            SprintsRepo::delete_by_id(conn, sprint_id)?;
            Ok(())
        })
    }
}

fn end_date_conflict() -> AppError {
    AppError::conflict(
        "A sprint already ends on this date",
        Some("end".to_string()),
        error_codes::SPRINT_END_TAKEN,
    )
}

/// Race backstop: the unique index on the end date fires when two writers
/// pass the pre-check at once.
fn map_unique_end(e: diesel::result::Error) -> AppError {
    match e {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            end_date_conflict()
        }
        other => other.into(),
    }
}
