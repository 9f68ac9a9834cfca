use chrono::{Duration, Utc};
use sprintboard::db::enums::TaskStatus;
use sprintboard::db::models::task::Task;
use sprintboard::validation::task::{TaskWrite, validate_task_write};
use uuid::Uuid;

fn persisted(sprint_id: Option<Uuid>, status: TaskStatus) -> Task {
    Task {
        id: Uuid::new_v4(),
        name: "Ship the release".to_string(),
        description: None,
        sprint_id,
        status,
        sort_order: 0,
        assigned_id: None,
        started: None,
        due: None,
        completed: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn backlog_tasks_stay_not_started() {
    let today = Utc::now().date_naive();
    let proposed = TaskWrite {
        name: "Ship the release",
        sprint_id: None,
        status: TaskStatus::Testing,
        started: None,
        completed: None,
    };
    let errors = validate_task_write(&proposed, None, None, today).unwrap_err();
    assert_eq!(errors[0].code, "TASK_001");
}

#[test]
fn done_task_is_locked_to_its_sprint() {
    let today = Utc::now().date_naive();
    let prior = persisted(Some(Uuid::new_v4()), TaskStatus::Done);
    let proposed = TaskWrite {
        name: "Ship the release",
        sprint_id: Some(Uuid::new_v4()),
        status: TaskStatus::Done,
        started: None,
        completed: None,
    };
    let errors = validate_task_write(&proposed, Some(&prior), Some(today), today).unwrap_err();
    assert!(errors.iter().any(|e| e.code == "TASK_004"));
}

#[test]
fn ended_sprint_rejects_new_tasks() {
    let today = Utc::now().date_naive();
    let last_week = today - Duration::days(7);
    let proposed = TaskWrite {
        name: "Ship the release",
        sprint_id: Some(Uuid::new_v4()),
        status: TaskStatus::NotStarted,
        started: None,
        completed: None,
    };
    let errors = validate_task_write(&proposed, None, Some(last_week), today).unwrap_err();
    assert_eq!(errors[0].code, "TASK_005");
}

#[test]
fn date_fields_follow_status() {
    let today = Utc::now().date_naive();
    let sprint = Some(Uuid::new_v4());

    let proposed = TaskWrite {
        name: "Ship the release",
        sprint_id: sprint,
        status: TaskStatus::NotStarted,
        started: Some(today),
        completed: None,
    };
    let errors = validate_task_write(&proposed, None, Some(today), today).unwrap_err();
    assert_eq!(errors[0].code, "TASK_002");

    let proposed = TaskWrite {
        name: "Ship the release",
        sprint_id: sprint,
        status: TaskStatus::InProgress,
        started: Some(today),
        completed: Some(today),
    };
    let errors = validate_task_write(&proposed, None, Some(today), today).unwrap_err();
    assert_eq!(errors[0].code, "TASK_003");
}
