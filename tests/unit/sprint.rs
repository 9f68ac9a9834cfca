use chrono::{Duration, Utc};
use sprintboard::validation::sprint::{validate_create_sprint, validate_update_sprint};

#[test]
fn create_sprint_end_date_rules() {
    let today = Utc::now().date_naive();
    let yesterday = today - Duration::days(1);
    let tomorrow = today + Duration::days(1);

    assert!(validate_create_sprint(tomorrow, today).is_ok());
    assert!(validate_create_sprint(today, today).is_ok());

    let errors = validate_create_sprint(yesterday, today).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field.as_deref(), Some("end"));
    assert_eq!(errors[0].code, "SPRINT_001");
}

#[test]
fn update_sprint_only_checks_changed_end() {
    let today = Utc::now().date_naive();
    let yesterday = today - Duration::days(1);
    let next_week = today + Duration::days(7);

    // A sprint whose end has passed can still have other fields touched.
    assert!(validate_update_sprint(yesterday, yesterday, today).is_ok());

    // But the end date cannot be moved into the past.
    assert!(validate_update_sprint(yesterday, next_week, today).is_err());
}
