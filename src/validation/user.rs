use crate::db::models::api::{ErrorDetail, error_codes};
use crate::validation::rules::validate_username_format;

/// Username checks shared by the create path and the natural-key lookups.
pub fn validate_username(username: &str) -> Result<(), Vec<ErrorDetail>> {
    match validate_username_format(username) {
        Ok(()) => Ok(()),
        Err(_) => Err(vec![ErrorDetail::new(
            Some("username"),
            error_codes::USER_USERNAME_INVALID,
            "Username may contain only letters, digits, underscores and hyphens, and cannot start with a digit",
        )]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_format() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("alice_s-2").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("2cool").is_err());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("bad/name").is_err());
    }
}
