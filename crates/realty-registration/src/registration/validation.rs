use tracing::debug;

use crate::identifiers::{cnpj, cpf, creci, phone};

use super::constants::{
    messages, EMAIL_MAX_LENGTH, EMAIL_PATTERN, LICENSE_CODE_MAX_LENGTH, LICENSE_CODE_MIN_LENGTH,
    NAME_MAX_LENGTH, NAME_MIN_LENGTH, NAME_PATTERN, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH,
};
use super::domain::{DocumentKind, FormField, ProfileType, RegistrationForm};
use super::error_map::{ErrorCode, ErrorMap};
use super::rules::RuleTables;

/// Stateless validator: the same form always produces the same error map.
#[derive(Debug, Clone)]
pub struct FormValidator {
    tables: RuleTables,
    name_min_length: usize,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(RuleTables::default())
    }
}

impl FormValidator {
    pub fn new(tables: RuleTables) -> Self {
        Self {
            tables,
            name_min_length: NAME_MIN_LENGTH,
        }
    }

    /// Override the minimum name length (in characters).
    pub fn with_name_min_length(mut self, name_min_length: usize) -> Self {
        self.name_min_length = name_min_length;
        self
    }

    pub fn name_min_length(&self) -> usize {
        self.name_min_length
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    /// Shape-level validation of the whole form. Failures are collected, not
    /// short-circuited, and each field keeps the message of its last failing check.
    pub fn validate(&self, form: &RegistrationForm) -> ErrorMap {
        let mut errors = ErrorMap::new();

        check_name(&form.name, self.name_min_length, &mut errors);
        check_email(&form.email, &mut errors);
        check_password(&form.password, &mut errors);
        check_confirmation(&form.password, &form.confirm_password, &mut errors);
        // Profile membership is guaranteed by `ProfileType`; untrusted codes are
        // rejected when they are parsed.

        for field in [
            FormField::Phone,
            FormField::LicenseCode,
            FormField::CompanyTaxId,
            FormField::IndividualTaxId,
        ] {
            if let Some(value) = form.text(field).filter(|value| !value.trim().is_empty()) {
                check_shape(field, value, &mut errors);
            }
        }

        if form.accepted_terms == Some(false) {
            errors.insert(
                FormField::AcceptedTerms,
                ErrorCode::TermsNotAccepted,
                messages::TERMS_REQUIRED,
            );
        }

        let profile = form.profile_type;
        for &field in self.tables.required_fields(profile) {
            if !field.is_credential() {
                continue;
            }
            match form.text(field) {
                Some(value) if !value.trim().is_empty() => check_shape(field, value, &mut errors),
                _ => require(field, &mut errors),
            }
        }

        match self.tables.required_document_kind(profile) {
            Some(DocumentKind::Cpf) if profile != ProfileType::Broker => {
                if form.is_blank(FormField::IndividualTaxId) {
                    require(FormField::IndividualTaxId, &mut errors);
                }
            }
            Some(DocumentKind::Cnpj) => {
                if form.is_blank(FormField::CompanyTaxId) {
                    require(FormField::CompanyTaxId, &mut errors);
                }
            }
            _ => {}
        }

        debug!(
            profile = %profile,
            error_count = errors.len(),
            "registration form validated"
        );
        errors
    }

    /// [`validate`](Self::validate) followed by the mod-11 check on every tax id
    /// that passed the shape check. A checksum failure replaces the shape result.
    pub fn validate_with_checksums(&self, form: &RegistrationForm) -> ErrorMap {
        let mut errors = self.validate(form);

        for (field, value) in [
            (FormField::IndividualTaxId, form.individual_tax_id.as_str()),
            (FormField::CompanyTaxId, form.company_tax_id.as_str()),
        ] {
            if value.trim().is_empty() || errors.contains(field) {
                continue;
            }
            check_checksum(field, value, &mut errors);
        }

        errors
    }

    /// Check a single field in isolation, as a live input would.
    ///
    /// Returns the message for `value`, or `None` when the value is acceptable
    /// or blank. Cross-field and profile rules are out of reach here.
    pub fn validate_field(&self, field: FormField, value: &str) -> Option<String> {
        if value.trim().is_empty() {
            return None;
        }

        let mut errors = ErrorMap::new();
        match field {
            FormField::Name => check_name(value, self.name_min_length, &mut errors),
            FormField::Email => check_email(value, &mut errors),
            FormField::Password => check_password(value, &mut errors),
            FormField::IndividualTaxId | FormField::CompanyTaxId => {
                check_shape(field, value, &mut errors);
                if !errors.contains(field) {
                    check_checksum(field, value, &mut errors);
                }
            }
            FormField::Phone | FormField::LicenseCode => check_shape(field, value, &mut errors),
            _ => {}
        }
        errors.remove(field).map(|error| error.message)
    }
}

/// Validate with the default rule tables.
pub fn validate_form(form: &RegistrationForm) -> ErrorMap {
    FormValidator::default().validate(form)
}

fn require(field: FormField, errors: &mut ErrorMap) {
    errors.insert(field, ErrorCode::Required, messages::required(field.label()));
}

fn check_name(name: &str, min_length: usize, errors: &mut ErrorMap) {
    let field = FormField::Name;
    let length = name.chars().count();
    if name.trim().is_empty() {
        require(field, errors);
    } else if length < min_length {
        errors.insert(
            field,
            ErrorCode::TooShort,
            messages::too_short(field.label(), min_length),
        );
    } else if length > NAME_MAX_LENGTH {
        errors.insert(
            field,
            ErrorCode::TooLong,
            messages::too_long(field.label(), NAME_MAX_LENGTH),
        );
    } else if !NAME_PATTERN.is_match(name) {
        errors.insert(field, ErrorCode::InvalidFormat, messages::NAME_INVALID);
    }
}

fn check_email(email: &str, errors: &mut ErrorMap) {
    let field = FormField::Email;
    if email.is_empty() {
        require(field, errors);
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.insert(field, ErrorCode::InvalidFormat, messages::EMAIL_INVALID);
    } else if email.chars().count() > EMAIL_MAX_LENGTH {
        errors.insert(
            field,
            ErrorCode::TooLong,
            messages::too_long(field.label(), EMAIL_MAX_LENGTH),
        );
    }
}

fn check_password(password: &str, errors: &mut ErrorMap) {
    let field = FormField::Password;
    let length = password.chars().count();
    if password.is_empty() {
        require(field, errors);
    } else if length < PASSWORD_MIN_LENGTH {
        errors.insert(
            field,
            ErrorCode::TooShort,
            messages::too_short(field.label(), PASSWORD_MIN_LENGTH),
        );
    } else if length > PASSWORD_MAX_LENGTH {
        errors.insert(
            field,
            ErrorCode::TooLong,
            messages::too_long(field.label(), PASSWORD_MAX_LENGTH),
        );
    }
}

fn check_confirmation(password: &str, confirmation: &str, errors: &mut ErrorMap) {
    let field = FormField::ConfirmPassword;
    if confirmation.is_empty() {
        errors.insert(field, ErrorCode::Required, messages::CONFIRM_PASSWORD);
    } else if password != confirmation {
        errors.insert(field, ErrorCode::Mismatch, messages::PASSWORDS_DIFFER);
    }
}

/// Structural check for the optional identifier fields. Clears nothing: a
/// passing value leaves any existing entry for the field in place.
fn check_shape(field: FormField, value: &str, errors: &mut ErrorMap) {
    let (valid, message) = match field {
        FormField::Phone => (phone::is_valid(value), messages::PHONE_INVALID),
        FormField::LicenseCode => (is_license_code(value), messages::CRECI_INVALID),
        FormField::CompanyTaxId => (cnpj::is_well_formed(value), messages::CNPJ_INVALID),
        FormField::IndividualTaxId => (cpf::is_well_formed(value), messages::CPF_INVALID),
        _ => return,
    };
    if !valid {
        errors.insert(field, ErrorCode::InvalidFormat, message);
    }
}

fn check_checksum(field: FormField, value: &str, errors: &mut ErrorMap) {
    let (valid, message) = match field {
        FormField::CompanyTaxId => (cnpj::is_valid_checksum(value), messages::CNPJ_CHECKSUM),
        FormField::IndividualTaxId => (cpf::is_valid_checksum(value), messages::CPF_CHECKSUM),
        _ => return,
    };
    if !valid {
        errors.insert(field, ErrorCode::InvalidChecksum, message);
    }
}

fn is_license_code(value: &str) -> bool {
    let length = creci::strip(value).chars().count();
    creci::is_valid_shape(value)
        && (LICENSE_CODE_MIN_LENGTH..=LICENSE_CODE_MAX_LENGTH).contains(&length)
}
