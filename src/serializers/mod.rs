pub mod sprint;
pub mod task;
pub mod user;

pub use sprint::{SprintBody, sprint_body};
pub use task::{TaskBody, task_body};
pub use user::{UserBody, user_body};

use axum::http::header;
use axum::http::request::Parts;
use axum::{async_trait, extract::FromRequestParts};
use uuid::Uuid;

/// Builds absolute links from the request's own scheme and host, so the same
/// entity is addressable through whichever base URL the caller used.
#[derive(Clone, Debug)]
pub struct LinkContext {
    base_url: String,
}

impl LinkContext {
    pub fn new(scheme: &str, host: &str) -> Self {
        Self {
            base_url: format!("{}://{}", scheme, host),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn sprint_url(&self, id: Uuid) -> String {
        self.url_for(&format!("/sprints/{}", id))
    }

    pub fn task_url(&self, id: Uuid) -> String {
        self.url_for(&format!("/tasks/{}", id))
    }

    pub fn user_url(&self, username: &str) -> String {
        self.url_for(&format!("/users/{}", username))
    }

    /// The task collection scoped to one sprint.
    pub fn sprint_tasks_url(&self, id: Uuid) -> String {
        self.url_for(&format!("/tasks?sprint={}", id))
    }

    /// The task collection scoped to one assignee, keyed by username.
    pub fn user_tasks_url(&self, username: &str) -> String {
        self.url_for(&format!("/tasks?assigned={}", username))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for LinkContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http");
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("localhost");
        Ok(Self::new(scheme, host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_follow_request_host() {
        let links = LinkContext::new("https", "tracker.example.com");
        assert_eq!(
            links.user_url("alice"),
            "https://tracker.example.com/users/alice"
        );
        assert_eq!(
            links.user_tasks_url("alice"),
            "https://tracker.example.com/tasks?assigned=alice"
        );

        let other = LinkContext::new("http", "localhost:8000");
        assert_eq!(other.base_url(), "http://localhost:8000");
    }
}
