use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RegistrationConfig;
use crate::identifiers::{cnpj, cpf, creci, phone};

use super::constants::messages;
use super::domain::{AccessLevel, ExperienceBand, FormField, ProfileType, RegistrationForm};
use super::error_map::{ErrorCode, ErrorMap};
use super::repository::{
    AccountId, AccountRepository, AccountStatus, RegisteredAccount, RepositoryError,
};
use super::validation::FormValidator;

/// Record handed to the account collaborator. Empty optional inputs arrive
/// as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub profile_type: ProfileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual_tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_terms: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
}

fn present(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl RegistrationRequest {
    pub fn from_form(form: &RegistrationForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
            confirm_password: form.confirm_password.clone(),
            profile_type: form.profile_type,
            phone: present(&form.phone),
            license_code: present(&form.license_code),
            company_tax_id: present(&form.company_tax_id),
            individual_tax_id: present(&form.individual_tax_id),
            company_name: present(&form.company_name),
            accepted_terms: form.accepted_terms,
            experience: form.experience,
            access_level: form.access_level,
        }
    }

    pub fn to_form(&self) -> RegistrationForm {
        RegistrationForm {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            profile_type: self.profile_type,
            phone: self.phone.clone().unwrap_or_default(),
            license_code: self.license_code.clone().unwrap_or_default(),
            company_tax_id: self.company_tax_id.clone().unwrap_or_default(),
            individual_tax_id: self.individual_tax_id.clone().unwrap_or_default(),
            company_name: self.company_name.clone().unwrap_or_default(),
            accepted_terms: self.accepted_terms,
            experience: self.experience,
            access_level: self.access_level,
        }
    }
}

/// Outcome reported by the account collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegistrationResult {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// The "create account" collaborator a form session submits to.
pub trait AccountRegistrar {
    fn create_account(&self, request: RegistrationRequest) -> RegistrationResult;
}

/// Service that re-validates requests and persists new accounts.
pub struct RegistrationService<R> {
    repository: Arc<R>,
    validator: Arc<FormValidator>,
    enforce_checksums: bool,
    require_terms: bool,
}

impl<R> RegistrationService<R>
where
    R: AccountRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: &RegistrationConfig) -> Self {
        Self {
            repository,
            validator: Arc::new(config.validator()),
            enforce_checksums: config.enforce_checksums,
            require_terms: config.require_terms,
        }
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    /// Validate `request` and store a new active account.
    pub fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegisteredAccount, RegistrationError> {
        let errors = self.check(&request);
        if !errors.is_empty() {
            warn!(
                profile = %request.profile_type,
                fields = %errors.fields().map(FormField::key).collect::<Vec<_>>().join(","),
                "registration rejected by validation"
            );
            return Err(RegistrationError::Validation(errors));
        }

        if self.repository.find_by_email(&request.email)?.is_some() {
            warn!(profile = %request.profile_type, "registration rejected: email already in use");
            return Err(RegistrationError::DuplicateEmail);
        }

        let account = build_account(request);
        let stored = self.repository.insert(account).map_err(|err| match err {
            RepositoryError::Conflict => RegistrationError::DuplicateEmail,
            other => RegistrationError::Repository(other),
        })?;

        info!(
            account_id = %stored.id,
            profile = %stored.profile_type,
            "account registered"
        );
        Ok(stored)
    }

    /// Move an existing account to `status`.
    pub fn set_status(
        &self,
        id: &AccountId,
        status: AccountStatus,
    ) -> Result<RegisteredAccount, RegistrationError> {
        let mut account = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        account.status = status;
        account.updated_at = Utc::now();
        self.repository.update(account.clone())?;

        info!(account_id = %account.id, status = account.status.label(), "account status changed");
        Ok(account)
    }

    fn check(&self, request: &RegistrationRequest) -> ErrorMap {
        let form = request.to_form();
        let mut errors = if self.enforce_checksums {
            self.validator.validate_with_checksums(&form)
        } else {
            self.validator.validate(&form)
        };

        if self.require_terms && form.accepted_terms != Some(true) {
            errors.insert(
                FormField::AcceptedTerms,
                ErrorCode::TermsNotAccepted,
                messages::TERMS_REQUIRED,
            );
        }
        errors
    }
}

impl<R> AccountRegistrar for RegistrationService<R>
where
    R: AccountRepository + 'static,
{
    fn create_account(&self, request: RegistrationRequest) -> RegistrationResult {
        match self.register(request) {
            Ok(_) => RegistrationResult::succeeded(),
            Err(err) => RegistrationResult::failed(err.user_message()),
        }
    }
}

fn build_account(request: RegistrationRequest) -> RegisteredAccount {
    let now = Utc::now();
    RegisteredAccount {
        id: AccountId::new(),
        name: request.name,
        email: request.email,
        profile_type: request.profile_type,
        status: AccountStatus::Active,
        phone: request.phone.as_deref().map(phone::format),
        license_code: request.license_code.as_deref().map(creci::format),
        company_tax_id: request.company_tax_id.as_deref().map(cnpj::format),
        individual_tax_id: request.individual_tax_id.as_deref().map(cpf::format),
        company_name: request.company_name,
        experience: request.experience,
        access_level: request.access_level,
        created_at: now,
        updated_at: now,
    }
}

/// Error raised by the registration service.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("registration form is invalid: {0}")]
    Validation(ErrorMap),
    #[error("email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RegistrationError {
    /// Message shown to the registrant. Validation failures surface the first
    /// field message; infrastructure failures stay generic.
    pub fn user_message(&self) -> String {
        match self {
            RegistrationError::Validation(errors) => errors
                .iter()
                .next()
                .map(|(_, error)| error.message.clone())
                .unwrap_or_else(|| messages::ACCOUNT_CREATION_FAILED.to_string()),
            RegistrationError::DuplicateEmail => messages::EMAIL_TAKEN.to_string(),
            RegistrationError::Repository(_) => messages::INTERNAL_ERROR.to_string(),
        }
    }
}
