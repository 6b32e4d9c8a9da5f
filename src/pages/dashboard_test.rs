use super::*;

fn update() -> ProfileUpdate {
    ProfileUpdate {
        first_name: " Grace ".to_owned(),
        last_name: " Hopper".to_owned(),
        phone_number: "+1 555 010 9999".to_owned(),
        program: "Computer Science".to_owned(),
    }
}

#[test]
fn validate_profile_update_trims_and_normalizes() {
    assert_eq!(
        validate_profile_update(&update()),
        Ok(ProfileUpdate {
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            phone_number: "+15550109999".to_owned(),
            program: "Computer Science".to_owned(),
        })
    );
}

#[test]
fn validate_profile_update_rejects_blank_name() {
    let blank = ProfileUpdate { first_name: " ".to_owned(), ..update() };
    assert_eq!(validate_profile_update(&blank), Err("Enter your first and last name."));
}

#[test]
fn validate_profile_update_rejects_local_phone_number() {
    let local = ProfileUpdate { phone_number: "010 9999".to_owned(), ..update() };
    assert_eq!(validate_profile_update(&local), Err("Enter a phone number with country code."));
}

#[test]
fn validate_profile_update_rejects_unknown_program() {
    let unknown = ProfileUpdate { program: "Alchemy".to_owned(), ..update() };
    assert_eq!(validate_profile_update(&unknown), Err("Choose a program."));
}

#[test]
fn status_badge_class_marks_decisions() {
    assert_eq!(status_badge_class(ApplicationStatus::Accepted), "status-badge status-badge--success");
    assert_eq!(status_badge_class(ApplicationStatus::Rejected), "status-badge status-badge--error");
    assert_eq!(status_badge_class(ApplicationStatus::Draft), "status-badge");
}
