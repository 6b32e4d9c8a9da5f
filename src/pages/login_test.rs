use super::*;

#[test]
fn validate_login_input_trims_email_and_keeps_password() {
    assert_eq!(
        validate_login_input("  student@uni.edu ", " secret "),
        Ok(("student@uni.edu".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "secret"), Err("Enter your email and password."));
    assert_eq!(validate_login_input("a@b.com", ""), Err("Enter your email and password."));
}

#[test]
fn validate_login_input_rejects_malformed_email() {
    assert_eq!(validate_login_input("student", "secret"), Err("Enter a valid email address."));
}

#[test]
fn looks_like_email_requires_local_part_and_dotted_domain() {
    assert!(looks_like_email("a@b.co"));
    assert!(!looks_like_email("@b.co"));
    assert!(!looks_like_email("a@localhost"));
    assert!(!looks_like_email("a@.co"));
    assert!(!looks_like_email("a@b."));
}
