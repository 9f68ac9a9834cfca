pub mod auth;
pub mod sprints;
pub mod tasks;
pub mod users;

use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

/// Routes that sit behind the authentication middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/sprints",
            get(sprints::list_sprints).post(sprints::create_sprint),
        )
        .route(
            "/sprints/:sprint_id",
            get(sprints::get_sprint)
                .put(sprints::update_sprint)
                .delete(sprints::delete_sprint),
        )
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/:task_id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:username",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(state)
}

/// Routes reachable without a token.
pub fn create_public_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/token", post(auth::obtain_token))
        .with_state(state)
}

/// Distinguishes an absent field from an explicit null in partial updates.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
