//! Confirmation matching - keeps the confirmation field's validity in sync
//! with the password field.

use secrecy::{ExposeSecret, SecretString};

pub const MISMATCH_MESSAGE: &str = "Entered passwords do not match";
pub const MISSING_PASSWORD_MESSAGE: &str = "Please provide a password for the user";

/// Port for an input that takes part in native form validation.
pub trait ValidatedField {
    fn value(&self) -> &SecretString;
    /// Sets the custom validity message; an empty string marks the field valid.
    fn set_custom_validity(&mut self, message: &str);
}

/// Port for the feedback element shown under the confirmation field.
pub trait FeedbackText {
    fn set_feedback(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched,
    Mismatched,
}

impl MatchOutcome {
    /// Exact comparison, no normalization.
    pub fn compare(confirm: &str, password: &str) -> Self {
        if confirm == password {
            MatchOutcome::Matched
        } else {
            MatchOutcome::Mismatched
        }
    }

    pub fn validity_message(self) -> &'static str {
        match self {
            MatchOutcome::Matched => "",
            MatchOutcome::Mismatched => MISMATCH_MESSAGE,
        }
    }

    pub fn feedback_message(self) -> &'static str {
        match self {
            MatchOutcome::Matched => MISSING_PASSWORD_MESSAGE,
            MatchOutcome::Mismatched => MISMATCH_MESSAGE,
        }
    }

    pub fn apply_to_field<F: ValidatedField + ?Sized>(self, confirm: &mut F) {
        confirm.set_custom_validity(self.validity_message());
    }

    pub fn apply_to_feedback<T: FeedbackText + ?Sized>(self, feedback: &mut T) {
        feedback.set_feedback(self.feedback_message());
    }
}

/// Compares the confirmation with the password and updates the confirmation
/// field plus, when present, its feedback element.
pub fn validate_match<C, P, T>(
    confirm: &mut C,
    password: &P,
    feedback: Option<&mut T>,
) -> MatchOutcome
where
    C: ValidatedField + ?Sized,
    P: ValidatedField + ?Sized,
    T: FeedbackText + ?Sized,
{
    let outcome = MatchOutcome::compare(
        confirm.value().expose_secret(),
        password.value().expose_secret(),
    );
    outcome.apply_to_field(confirm);
    if let Some(feedback) = feedback {
        outcome.apply_to_feedback(feedback);
    }
    outcome
}
