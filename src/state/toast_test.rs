use super::*;

// =============================================================
// ToastState queue
// =============================================================

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Info, "a", "", DEFAULT_DURATION_MS);
    let b = state.push(ToastKind::Error, "b", "", DEFAULT_DURATION_MS);
    assert!(b > a);
    assert_eq!(state.toasts.len(), 2);
    assert!(!state.get(a).unwrap().leaving);
}

#[test]
fn push_drops_oldest_past_limit() {
    let mut state = ToastState::default();
    let first = state.push(ToastKind::Info, "first", "", 0);
    for i in 0..MAX_VISIBLE {
        state.push(ToastKind::Info, format!("t{i}"), "", 0);
    }
    assert_eq!(state.toasts.len(), MAX_VISIBLE);
    assert!(state.get(first).is_none());
}

#[test]
fn begin_exit_is_one_shot() {
    let mut state = ToastState::default();
    let id = state.push(ToastKind::Success, "Saved", "Profile updated", DEFAULT_DURATION_MS);
    assert!(state.begin_exit(id));
    assert!(state.get(id).unwrap().leaving);
    assert!(!state.begin_exit(id));
}

#[test]
fn begin_exit_on_missing_toast_is_false() {
    let mut state = ToastState::default();
    assert!(!state.begin_exit(42));
}

#[test]
fn remove_only_drops_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Info, "a", "", 0);
    let b = state.push(ToastKind::Warning, "b", "", 0);
    state.remove(a);
    assert!(state.get(a).is_none());
    assert!(state.get(b).is_some());
}

// =============================================================
// auto_dismiss_schedule
// =============================================================

#[test]
fn five_second_toast_is_removed_after_exit_animation() {
    let (exit_at, remove_at) = auto_dismiss_schedule(5_000).unwrap();
    assert_eq!(exit_at, 5_000);
    assert_eq!(remove_at, 5_350);
}

#[test]
fn zero_duration_never_auto_dismisses() {
    assert_eq!(auto_dismiss_schedule(0), None);
}

#[test]
fn schedule_saturates_instead_of_overflowing() {
    assert_eq!(auto_dismiss_schedule(u32::MAX), Some((u32::MAX, u32::MAX)));
}

// =============================================================
// ToastKind
// =============================================================

#[test]
fn kind_roles_split_interrupting_and_polite() {
    assert_eq!(ToastKind::Error.aria_role(), "alert");
    assert_eq!(ToastKind::Warning.aria_role(), "alert");
    assert_eq!(ToastKind::Success.aria_role(), "status");
    assert_eq!(ToastKind::Info.aria_role(), "status");
}

#[test]
fn kind_css_modifiers_are_distinct() {
    let kinds = [ToastKind::Success, ToastKind::Error, ToastKind::Warning, ToastKind::Info];
    for (i, a) in kinds.iter().enumerate() {
        for (j, b) in kinds.iter().enumerate() {
            assert_eq!(i == j, a.css_modifier() == b.css_modifier());
        }
    }
}
