use serde::Serialize;
use uuid::Uuid;

use crate::db::models::sprint::Sprint;
use crate::serializers::LinkContext;

#[derive(Serialize, Debug)]
pub struct SprintLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub tasks: String,
}

#[derive(Serialize, Debug)]
pub struct SprintBody {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub end: chrono::NaiveDate,
    pub links: SprintLinks,
}

pub fn sprint_body(sprint: &Sprint, links: &LinkContext) -> SprintBody {
    SprintBody {
        id: sprint.id,
        name: sprint.name.clone(),
        description: sprint.description.clone(),
        end: sprint.end,
        links: SprintLinks {
            self_link: links.sprint_url(sprint.id),
            tasks: links.sprint_tasks_url(sprint.id),
        },
    }
}
