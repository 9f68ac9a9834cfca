use sprintboard::validation::rules::validate_username_format;
use sprintboard::validation::user::validate_username;

#[test]
fn username_format_rules() {
    assert!(validate_username_format("alice").is_ok());
    assert!(validate_username_format("dev_ops-2").is_ok());
    assert!(validate_username_format("").is_err());
    assert!(validate_username_format("9lives").is_err());
    assert!(validate_username_format("no spaces").is_err());
}

#[test]
fn username_violations_carry_the_field() {
    let errors = validate_username("bad name").unwrap_err();
    assert_eq!(errors[0].field.as_deref(), Some("username"));
    assert_eq!(errors[0].code, "USER_002");
}
