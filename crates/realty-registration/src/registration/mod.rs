//! Registration form engine: profile rule tables, the form validator, the
//! per-session controller and the account collaborator it submits to.

pub mod constants;
pub mod controller;
pub mod domain;
pub mod error_map;
pub mod import;
pub mod live;
pub mod repository;
pub mod rules;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use controller::{FormController, SubmitOutcome};
pub use domain::{
    AccessLevel, DocumentKind, ExperienceBand, FieldUpdate, FormField, ProfileType,
    RegistrationForm, UnknownProfileType,
};
pub use error_map::{ErrorCode, ErrorMap, FieldError};
pub use import::{parse_forms, ImportError};
pub use live::LiveFieldValidator;
pub use repository::{
    AccountId, AccountRepository, AccountStatus, RegisteredAccount, RepositoryError,
};
pub use rules::{required_document_kind, required_fields, ProfileRule, RuleConfig, RuleTables};
pub use service::{
    AccountRegistrar, RegistrationError, RegistrationRequest, RegistrationResult,
    RegistrationService,
};
pub use validation::{validate_form, FormValidator};
