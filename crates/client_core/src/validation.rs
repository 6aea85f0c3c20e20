//! Registration-form validation: the password policy evaluated on every
//! keystroke, plus the contact field checks.

use std::sync::Arc;

use crate::Notifier;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordRequirement {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl PasswordRequirement {
    pub const ALL: [PasswordRequirement; 5] = [
        PasswordRequirement::MinLength,
        PasswordRequirement::Uppercase,
        PasswordRequirement::Lowercase,
        PasswordRequirement::Digit,
        PasswordRequirement::Special,
    ];
}

/// Result of evaluating the five policy predicates against one password
/// value. Pure function of the password alone; the confirmation field never
/// influences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequirementReport {
    pub has_min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

impl RequirementReport {
    pub fn evaluate(password: &str) -> Self {
        Self {
            has_min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    pub fn is_satisfied(&self, requirement: PasswordRequirement) -> bool {
        match requirement {
            PasswordRequirement::MinLength => self.has_min_length,
            PasswordRequirement::Uppercase => self.has_uppercase,
            PasswordRequirement::Lowercase => self.has_lowercase,
            PasswordRequirement::Digit => self.has_digit,
            PasswordRequirement::Special => self.has_special,
        }
    }

    pub fn all_met(&self) -> bool {
        self.has_min_length
            && self.has_uppercase
            && self.has_lowercase
            && self.has_digit
            && self.has_special
    }
}

/// The five requirement indicator slots owned by the registration form. Every
/// evaluation toggles every slot, satisfied or not, so the visual state never
/// goes stale.
pub trait RequirementIndicators: Send + Sync {
    fn set_satisfied(&self, requirement: PasswordRequirement, satisfied: bool);
}

pub struct DetachedRequirementIndicators;

impl RequirementIndicators for DetachedRequirementIndicators {
    fn set_satisfied(&self, _requirement: PasswordRequirement, _satisfied: bool) {}
}

pub struct PasswordPolicyValidator {
    indicators: Arc<dyn RequirementIndicators>,
    notifier: Arc<dyn Notifier>,
}

impl PasswordPolicyValidator {
    pub fn new(indicators: Arc<dyn RequirementIndicators>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            indicators,
            notifier,
        }
    }

    /// Recomputes the full requirement snapshot and pushes it to the
    /// indicators, then compares password and confirmation. A mismatch raises
    /// the blocking notification and reports failure. Runs on every keystroke
    /// in either field, including while the confirmation is still being
    /// typed, so transient mismatches alert too.
    pub fn evaluate(&self, password: &str, confirmation: &str) -> bool {
        let report = RequirementReport::evaluate(password);
        for requirement in PasswordRequirement::ALL {
            self.indicators
                .set_satisfied(requirement, report.is_satisfied(requirement));
        }

        if password != confirmation {
            self.notifier.alert(PASSWORD_MISMATCH_MESSAGE);
            return false;
        }

        true
    }
}

/// Accepts `local@domain.tld` shapes: exactly one `@`, a non-empty local
/// part, and a domain with a non-empty label on both sides of its last dot.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Exactly ten ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
