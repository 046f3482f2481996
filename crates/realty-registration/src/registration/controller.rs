use tracing::debug;

use crate::identifiers::phone;

use super::constants::messages;
use super::domain::{FieldUpdate, FormField, RegistrationForm};
use super::error_map::{ErrorCode, ErrorMap};
use super::service::{AccountRegistrar, RegistrationRequest};
use super::validation::FormValidator;

/// Result of [`FormController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was handed off.
    Invalid,
    /// The registrar refused the account. The message is also stored under `general`.
    Rejected(String),
    Accepted,
}

/// Owns one form session: the record, its current errors and the submitted flag.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    form: RegistrationForm,
    errors: ErrorMap,
    submitted: bool,
    validator: FormValidator,
}

impl FormController {
    pub fn new(validator: FormValidator) -> Self {
        Self {
            validator,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Store one edit. Phone input is reformatted as typed, and the edited
    /// field's error is dropped until the next [`validate`](Self::validate).
    pub fn update_field(&mut self, update: FieldUpdate) {
        let update = match update {
            FieldUpdate::Phone(value) => FieldUpdate::Phone(phone::format(&value)),
            other => other,
        };
        let field = self.form.apply(update);
        self.errors.remove(field);
    }

    /// Recompute the error map from scratch; true when the form is clean.
    pub fn validate(&mut self) -> bool {
        self.errors = self.validator.validate(&self.form);
        self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        self.form = RegistrationForm::default();
        self.errors.clear();
        self.submitted = false;
    }

    pub fn set_submitted(&mut self, submitted: bool) {
        self.submitted = submitted;
    }

    /// Validate, then hand the normalized record to `registrar`.
    ///
    /// The submitted flag is raised for the duration of the call. A refusal is
    /// surfaced under [`FormField::General`]; the registrar is never retried.
    pub fn submit<A: AccountRegistrar + ?Sized>(&mut self, registrar: &A) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        self.submitted = true;
        let result = registrar.create_account(RegistrationRequest::from_form(&self.form));
        self.submitted = false;

        if result.success {
            debug!(profile = %self.form.profile_type, "registration handed off");
            return SubmitOutcome::Accepted;
        }

        let message = result
            .error
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| messages::ACCOUNT_CREATION_FAILED.to_string());
        self.errors
            .insert(FormField::General, ErrorCode::External, message.clone());
        SubmitOutcome::Rejected(message)
    }
}
