use chrono::NaiveDate;

use crate::db::models::api::{ErrorDetail, error_codes};

pub fn validate_create_sprint(end: NaiveDate, today: NaiveDate) -> Result<(), Vec<ErrorDetail>> {
    if end < today {
        return Err(vec![ErrorDetail::new(
            Some("end"),
            error_codes::SPRINT_END_PAST,
            "Sprint end date cannot be in the past",
        )]);
    }
    Ok(())
}

/// The past-date check only fires when `end` is actually changing; touching
/// other fields of a sprint whose end date has since passed must succeed.
pub fn validate_update_sprint(
    new_end: NaiveDate,
    prior_end: NaiveDate,
    today: NaiveDate,
) -> Result<(), Vec<ErrorDetail>> {
    if new_end != prior_end && new_end < today {
        return Err(vec![ErrorDetail::new(
            Some("end"),
            error_codes::SPRINT_END_PAST,
            "Sprint end date cannot be moved into the past",
        )]);
    }
    Ok(())
}
