//! Validation coverage for user value objects.

use super::*;
use rstest::rstest;

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("ada@", UserValidationError::InvalidEmail)]
#[case("ada@@example.com", UserValidationError::InvalidEmail)]
#[case("ada lovelace@example.com", UserValidationError::InvalidEmail)]
fn rejects_malformed_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Email::new(raw), Err(expected));
}

#[rstest]
#[case("ada@example.com", "ada@example.com")]
#[case("  Ada@Example.com  ", "Ada@Example.com")]
#[case("\tADA@EXAMPLE.COM\n", "ADA@EXAMPLE.COM")]
fn trims_emails_and_keeps_their_case(#[case] raw: &str, #[case] expected: &str) {
    let email = Email::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
fn trims_user_names() {
    let name = UserName::new("  Grace Hopper ").expect("valid name");
    assert_eq!(name.as_ref(), "Grace Hopper");
}

#[rstest]
fn rejects_overlong_user_names() {
    let long = "x".repeat(USER_NAME_MAX + 1);
    assert_eq!(
        UserName::new(long),
        Err(UserValidationError::NameTooLong { max: USER_NAME_MAX })
    );
}

#[rstest]
#[case("", "ada@example.com", "pw", "name", "empty_name")]
#[case("Ada", "", "pw", "email", "empty_email")]
#[case("Ada", "ada@example.com", "", "password", "empty_password")]
fn registration_reports_offending_field(
    #[case] name: &str,
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let err = Registration::try_from_parts(name, email, password).expect_err("invalid input");
    assert_eq!(err.field(), field);
    assert_eq!(err.code(), code);
}

#[rstest]
fn registration_keeps_password_verbatim() {
    let registration =
        Registration::try_from_parts("Ada", "ada@example.com", " spaced pw ").expect("valid");
    assert_eq!(registration.password(), " spaced pw ");
}

#[rstest]
fn user_serialises_camel_case() {
    let user = User::new(
        UserId::new(7),
        UserName::new("Ada").expect("name"),
        Email::new("ada@example.com").expect("email"),
    );
    let value = serde_json::to_value(&user).expect("serialise");
    assert_eq!(
        value,
        serde_json::json!({ "id": 7, "name": "Ada", "email": "ada@example.com" })
    );
}
