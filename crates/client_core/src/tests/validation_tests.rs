use super::*;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingIndicators {
    updates: Mutex<Vec<(PasswordRequirement, bool)>>,
}

impl RecordingIndicators {
    fn updates(&self) -> Vec<(PasswordRequirement, bool)> {
        self.updates.lock().expect("updates lock").clone()
    }
}

impl RequirementIndicators for RecordingIndicators {
    fn set_satisfied(&self, requirement: PasswordRequirement, satisfied: bool) {
        self.updates
            .lock()
            .expect("updates lock")
            .push((requirement, satisfied));
    }
}

#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts lock").clone()
    }
}

impl crate::Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .expect("alerts lock")
            .push(message.to_string());
    }
}

fn validator() -> (
    PasswordPolicyValidator,
    Arc<RecordingIndicators>,
    Arc<RecordingNotifier>,
) {
    let indicators = Arc::new(RecordingIndicators::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let validator = PasswordPolicyValidator::new(
        Arc::clone(&indicators) as Arc<dyn RequirementIndicators>,
        Arc::clone(&notifier) as Arc<dyn crate::Notifier>,
    );
    (validator, indicators, notifier)
}

#[test]
fn min_length_boundary_sits_at_eight_characters() {
    assert!(RequirementReport::evaluate("12345678").has_min_length);
    assert!(!RequirementReport::evaluate("1234567").has_min_length);
}

#[test]
fn uppercase_requirement() {
    assert!(!RequirementReport::evaluate("abc").has_uppercase);
    assert!(RequirementReport::evaluate("Abc").has_uppercase);
}

#[test]
fn lowercase_requirement() {
    assert!(!RequirementReport::evaluate("ABC").has_lowercase);
    assert!(RequirementReport::evaluate("aBC").has_lowercase);
}

#[test]
fn digit_requirement() {
    assert!(!RequirementReport::evaluate("abcdef").has_digit);
    assert!(RequirementReport::evaluate("abc1ef").has_digit);
}

#[test]
fn special_requirement_uses_the_fixed_set() {
    assert!(!RequirementReport::evaluate("abc123").has_special);
    assert!(RequirementReport::evaluate("abc!23").has_special);
    for special in SPECIAL_CHARACTERS.chars() {
        assert!(
            RequirementReport::evaluate(&format!("abc{special}")).has_special,
            "expected {special:?} to satisfy the special-character requirement"
        );
    }
    assert!(!RequirementReport::evaluate("abc-_+=").has_special);
}

#[test]
fn all_met_requires_every_predicate() {
    assert!(RequirementReport::evaluate("Str0ng!pass").all_met());
    assert!(!RequirementReport::evaluate("Str0ngpass").all_met());
    assert!(!RequirementReport::evaluate("str0ng!pass").all_met());
    assert!(!RequirementReport::evaluate("S0!a").all_met());
}

#[test]
fn every_indicator_is_toggled_on_every_evaluation() {
    let (validator, indicators, _notifier) = validator();

    validator.evaluate("abc", "abc");

    let updates = indicators.updates();
    assert_eq!(updates.len(), PasswordRequirement::ALL.len());
    for requirement in PasswordRequirement::ALL {
        assert!(
            updates.iter().any(|(updated, _)| *updated == requirement),
            "missing indicator update for {requirement:?}"
        );
    }
    // "abc" satisfies only the lowercase requirement
    for (requirement, satisfied) in updates {
        assert_eq!(satisfied, requirement == PasswordRequirement::Lowercase);
    }
}

#[test]
fn requirement_flags_ignore_the_confirmation_field() {
    let (validator, indicators, _notifier) = validator();

    validator.evaluate("Str0ng!pass", "Str0ng!pass");
    let matching = indicators.updates();

    let (validator, indicators, _notifier) = self::validator();
    validator.evaluate("Str0ng!pass", "something else entirely");
    let mismatching = indicators.updates();

    assert_eq!(matching, mismatching);
}

#[test]
fn mismatch_alerts_and_reports_failure() {
    let (validator, _indicators, notifier) = validator();

    assert!(!validator.evaluate("Str0ng!pass", "Str0ng!pas"));
    assert_eq!(notifier.alerts(), vec![PASSWORD_MISMATCH_MESSAGE.to_string()]);
}

#[test]
fn transient_mismatch_while_typing_the_confirmation_still_alerts() {
    let (validator, _indicators, notifier) = validator();

    assert!(!validator.evaluate("Str0ng!pass", "Str"));
    assert_eq!(notifier.alerts().len(), 1);
}

#[test]
fn matching_values_report_success_without_notification() {
    let (validator, _indicators, notifier) = validator();

    assert!(validator.evaluate("Str0ng!pass", "Str0ng!pass"));
    assert!(validator.evaluate("", ""));
    assert!(notifier.alerts().is_empty());
}

#[test]
fn validator_runs_headless_with_detached_surfaces() {
    let validator = PasswordPolicyValidator::new(
        Arc::new(DetachedRequirementIndicators),
        Arc::new(crate::SilentNotifier),
    );

    assert!(validator.evaluate("Str0ng!pass", "Str0ng!pass"));
    assert!(!validator.evaluate("Str0ng!pass", "nope"));
}

#[test]
fn email_shape_check() {
    assert!(is_valid_email("farmer@example.com"));
    assert!(is_valid_email("a@b.co"));
    assert!(!is_valid_email("farmer"));
    assert!(!is_valid_email("farmer@"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("farmer@example"));
    assert!(!is_valid_email("farmer@example."));
    assert!(!is_valid_email("farmer@ex@ample.com"));
}

#[test]
fn phone_check_requires_exactly_ten_digits() {
    assert!(is_valid_phone("0123456789"));
    assert!(!is_valid_phone("123456789"));
    assert!(!is_valid_phone("01234567890"));
    assert!(!is_valid_phone("01234 6789"));
    assert!(!is_valid_phone("phone12345"));
}
