use serde::Serialize;
use uuid::Uuid;

use crate::db::models::task::TaskRecord;
use crate::serializers::LinkContext;

#[derive(Serialize, Debug)]
pub struct TaskLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub sprint: Option<String>,
    pub assigned: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct TaskBody {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sprint: Option<Uuid>,
    pub status: i16,
    pub status_display: String,
    pub order: i32,
    /// The assignee's username, never the internal id.
    pub assigned: Option<String>,
    pub started: Option<chrono::NaiveDate>,
    pub due: Option<chrono::NaiveDate>,
    pub completed: Option<chrono::NaiveDate>,
    pub links: TaskLinks,
}

pub fn task_body(record: &TaskRecord, links: &LinkContext) -> TaskBody {
    let task = &record.task;
    TaskBody {
        id: task.id,
        name: task.name.clone(),
        description: task.description.clone(),
        sprint: task.sprint_id,
        status: task.status.code(),
        status_display: task.status.label().to_string(),
        order: task.sort_order,
        assigned: record.assigned_username.clone(),
        started: task.started,
        due: task.due,
        completed: task.completed,
        links: TaskLinks {
            self_link: links.task_url(task.id),
            sprint: task.sprint_id.map(|id| links.sprint_url(id)),
            assigned: record
                .assigned_username
                .as_deref()
                .map(|username| links.user_url(username)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::TaskStatus;
    use crate::db::models::task::Task;

    fn record(sprint_id: Option<Uuid>, assigned: Option<&str>) -> TaskRecord {
        TaskRecord {
            task: Task {
                id: Uuid::new_v4(),
                name: "Write the report".to_string(),
                description: Some("quarterly numbers".to_string()),
                sprint_id,
                status: TaskStatus::InProgress,
                sort_order: 3,
                assigned_id: assigned.map(|_| Uuid::new_v4()),
                started: Some(chrono::Utc::now().date_naive()),
                due: None,
                completed: None,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
            assigned_username: assigned.map(|s| s.to_string()),
        }
    }

    #[test]
    fn assigned_task_links_to_sprint_and_user() {
        let sprint_id = Uuid::new_v4();
        let rec = record(Some(sprint_id), Some("alice"));
        let links = LinkContext::new("http", "localhost:8000");

        let body = task_body(&rec, &links);
        assert_eq!(body.status, 2);
        assert_eq!(body.status_display, "In Progress");
        assert_eq!(body.order, 3);
        assert_eq!(body.assigned.as_deref(), Some("alice"));
        assert_eq!(
            body.links.sprint.as_deref(),
            Some(format!("http://localhost:8000/sprints/{}", sprint_id).as_str())
        );
        assert_eq!(
            body.links.assigned.as_deref(),
            Some("http://localhost:8000/users/alice")
        );
    }

    #[test]
    fn backlog_unassigned_task_has_null_links() {
        let rec = record(None, None);
        let links = LinkContext::new("http", "localhost:8000");

        let body = task_body(&rec, &links);
        assert!(body.sprint.is_none());
        assert!(body.assigned.is_none());

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["links"]["sprint"].is_null());
        assert!(json["links"]["assigned"].is_null());
        assert_eq!(json["order"], 3);
    }
}
