use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::enums::TaskStatus;
use crate::db::models::api::{ErrorDetail, error_codes};
use crate::db::models::task::Task;

/// The proposed state of a task write: for creates the request itself, for
/// updates the prior record overlaid with the request's fields.
pub struct TaskWrite<'a> {
    pub name: &'a str,
    pub sprint_id: Option<Uuid>,
    pub status: TaskStatus,
    pub started: Option<NaiveDate>,
    pub completed: Option<NaiveDate>,
}

/// Checks every task write rule and reports all violations together.
///
/// `prior` is the persisted record for updates (`None` on create).
/// `sprint_end` is the end date of the sprint named by `proposed.sprint_id`,
/// looked up by the caller. `today` is the server-clock date at write time.
pub fn validate_task_write(
    proposed: &TaskWrite,
    prior: Option<&Task>,
    sprint_end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), Vec<ErrorDetail>> {
    let mut errors = Vec::new();

    if proposed.name.trim().is_empty() {
        errors.push(ErrorDetail::new(
            Some("name"),
            error_codes::TASK_NAME_REQUIRED,
            "Task name is required",
        ));
    }

    if proposed.sprint_id.is_none() && proposed.status != TaskStatus::NotStarted {
        errors.push(ErrorDetail::new(
            None,
            error_codes::TASK_BACKLOG_STATUS,
            "Backlog tasks must have Not Started status",
        ));
    }

    if proposed.started.is_some() && proposed.status == TaskStatus::NotStarted {
        errors.push(ErrorDetail::new(
            Some("started"),
            error_codes::TASK_STARTED_NOT_BEGUN,
            "Started date cannot be set when status is Not Started",
        ));
    }

    if proposed.completed.is_some() && proposed.status != TaskStatus::Done {
        errors.push(ErrorDetail::new(
            Some("completed"),
            error_codes::TASK_COMPLETED_NOT_DONE,
            "Completed date cannot be set unless status is Done",
        ));
    }

    let sprint_changed = prior.map_or(true, |p| p.sprint_id != proposed.sprint_id);

    if let Some(prior) = prior {
        if prior.status == TaskStatus::Done && sprint_changed {
            errors.push(ErrorDetail::new(
                Some("sprint"),
                error_codes::TASK_DONE_SPRINT_LOCKED,
                "Cannot change the sprint of a completed task",
            ));
        }
    }

    // The past-date check applies when entering a sprint, not when an
    // already-assigned sprint has since ended.
    if proposed.sprint_id.is_some() && sprint_changed {
        if let Some(end) = sprint_end {
            if end < today {
                errors.push(ErrorDetail::new(
                    Some("sprint"),
                    error_codes::TASK_SPRINT_ENDED,
                    "Cannot assign tasks to a sprint that has already ended",
                ));
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn write(sprint_id: Option<Uuid>, status: TaskStatus) -> TaskWrite<'static> {
        TaskWrite {
            name: "Fix the build",
            sprint_id,
            status,
            started: None,
            completed: None,
        }
    }

    fn persisted(sprint_id: Option<Uuid>, status: TaskStatus) -> Task {
        Task {
            id: Uuid::new_v4(),
            name: "Fix the build".to_string(),
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

    fn codes(result: Result<(), Vec<ErrorDetail>>) -> Vec<String> {
        result.unwrap_err().into_iter().map(|e| e.code).collect()
    }

    #[test]
    fn backlog_task_must_be_not_started() {
        let ok = write(None, TaskStatus::NotStarted);
        assert!(validate_task_write(&ok, None, None, today()).is_ok());

        let bad = write(None, TaskStatus::InProgress);
        assert_eq!(
            codes(validate_task_write(&bad, None, None, today())),
            vec![error_codes::TASK_BACKLOG_STATUS]
        );
    }

    #[test]
    fn started_requires_status_beyond_not_started() {
        let sprint = Uuid::new_v4();
        let mut w = write(Some(sprint), TaskStatus::NotStarted);
        w.started = Some(today());
        assert_eq!(
            codes(validate_task_write(&w, None, Some(today()), today())),
            vec![error_codes::TASK_STARTED_NOT_BEGUN]
        );

        let mut w = write(Some(sprint), TaskStatus::InProgress);
        w.started = Some(today());
        assert!(validate_task_write(&w, None, Some(today()), today()).is_ok());
    }

    #[test]
    fn completed_requires_done() {
        let sprint = Uuid::new_v4();
        let mut w = write(Some(sprint), TaskStatus::Testing);
        w.completed = Some(today());
        assert_eq!(
            codes(validate_task_write(&w, None, Some(today()), today())),
            vec![error_codes::TASK_COMPLETED_NOT_DONE]
        );

        let mut w = write(Some(sprint), TaskStatus::Done);
        w.completed = Some(today());
        assert!(validate_task_write(&w, None, Some(today()), today()).is_ok());
    }

    #[test]
    fn done_task_cannot_move_sprints() {
        let old_sprint = Uuid::new_v4();
        let new_sprint = Uuid::new_v4();
        let prior = persisted(Some(old_sprint), TaskStatus::Done);

        let w = write(Some(new_sprint), TaskStatus::Done);
        assert_eq!(
            codes(validate_task_write(&w, Some(&prior), Some(today()), today())),
            vec![error_codes::TASK_DONE_SPRINT_LOCKED]
        );

        // Same sprint is fine.
        let w = write(Some(old_sprint), TaskStatus::Done);
        assert!(validate_task_write(&w, Some(&prior), Some(today()), today()).is_ok());
    }

    #[test]
    fn cannot_enter_ended_sprint() {
        let sprint = Uuid::new_v4();
        let yesterday = today().pred_opt().unwrap();

        let w = write(Some(sprint), TaskStatus::NotStarted);
        assert_eq!(
            codes(validate_task_write(&w, None, Some(yesterday), today())),
            vec![error_codes::TASK_SPRINT_ENDED]
        );

        // Ending today still counts as open.
        assert!(validate_task_write(&w, None, Some(today()), today()).is_ok());
    }

    #[test]
    fn stale_sprint_does_not_block_unrelated_updates() {
        let sprint = Uuid::new_v4();
        let yesterday = today().pred_opt().unwrap();
        let prior = persisted(Some(sprint), TaskStatus::InProgress);

        // Same sprint, now past its end date: update still allowed.
        let w = write(Some(sprint), TaskStatus::Testing);
        assert!(validate_task_write(&w, Some(&prior), Some(yesterday), today()).is_ok());
    }

    #[test]
    fn violations_are_collected_together() {
        let mut w = write(None, TaskStatus::InProgress);
        w.name = " ";
        w.completed = Some(today());
        let errors = validate_task_write(&w, None, None, today()).unwrap_err();
        let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
        assert!(codes.contains(&error_codes::TASK_NAME_REQUIRED));
        assert!(codes.contains(&error_codes::TASK_BACKLOG_STATUS));
        assert!(codes.contains(&error_codes::TASK_COMPLETED_NOT_DONE));
    }

    #[test]
    fn moving_done_task_to_backlog_is_rejected() {
        let sprint = Uuid::new_v4();
        let prior = persisted(Some(sprint), TaskStatus::Done);
        let w = write(None, TaskStatus::Done);
        let errors = validate_task_write(&w, Some(&prior), None, today()).unwrap_err();
        let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
        assert!(codes.contains(&error_codes::TASK_DONE_SPRINT_LOCKED));
        assert!(codes.contains(&error_codes::TASK_BACKLOG_STATUS));
    }
}
