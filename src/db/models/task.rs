use crate::db::enums::TaskStatus;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Task models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sprint_id: Option<Uuid>,
    pub status: TaskStatus,
    pub sort_order: i32,
    pub assigned_id: Option<Uuid>,
    pub started: Option<chrono::NaiveDate>,
    pub due: Option<chrono::NaiveDate>,
    pub completed: Option<chrono::NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask {
    pub name: String,
    pub description: Option<String>,
    pub sprint_id: Option<Uuid>,
    pub status: TaskStatus,
    pub sort_order: i32,
    pub assigned_id: Option<Uuid>,
    pub started: Option<chrono::NaiveDate>,
    pub due: Option<chrono::NaiveDate>,
    pub completed: Option<chrono::NaiveDate>,
}

/// Full-row update built from the prior record overlaid with the request's
/// fields; `None` writes NULL so cleared fields actually clear.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tasks, treat_none_as_null = true)]
pub struct TaskChangeset {
    pub name: String,
    pub description: Option<String>,
    pub sprint_id: Option<Uuid>,
    pub status: TaskStatus,
    pub sort_order: i32,
    pub assigned_id: Option<Uuid>,
    pub started: Option<chrono::NaiveDate>,
    pub due: Option<chrono::NaiveDate>,
    pub completed: Option<chrono::NaiveDate>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A task plus the assigned user's username, loaded in one left join so the
/// serializer never goes back to the store.
#[derive(Clone, Debug)]
pub struct TaskRecord {
    pub task: Task,
    pub assigned_username: Option<String>,
}

impl From<(Task, Option<String>)> for TaskRecord {
    fn from((task, assigned_username): (Task, Option<String>)) -> Self {
        Self {
            task,
            assigned_username,
        }
    }
}
