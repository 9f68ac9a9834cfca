use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Sprint models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Sprint {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub end: chrono::NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sprints)]
pub struct NewSprint {
    pub name: Option<String>,
    pub description: Option<String>,
    pub end: chrono::NaiveDate,
}

/// Full-row update; `None` writes NULL so cleared fields actually clear.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::sprints, treat_none_as_null = true)]
pub struct SprintChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub end: chrono::NaiveDate,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
