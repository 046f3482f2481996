//! Integration specifications for the registration workflow.
//!
//! Scenarios drive the public controller, validator and service facade the
//! way the registration front-end does, from the first keystroke to a stored
//! account.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use realty_registration::registration::{
        AccountId, AccountRepository, FieldUpdate, ProfileType, RegisteredAccount,
        RepositoryError,
    };

    #[derive(Default, Clone)]
    pub(super) struct MemoryAccounts {
        accounts: Arc<Mutex<HashMap<AccountId, RegisteredAccount>>>,
    }

    impl MemoryAccounts {
        pub(super) fn all(&self) -> Vec<RegisteredAccount> {
            self.accounts
                .lock()
                .expect("repository mutex poisoned")
                .values()
                .cloned()
                .collect()
        }
    }

    impl AccountRepository for MemoryAccounts {
        fn find_by_email(
            &self,
            email: &str,
        ) -> Result<Option<RegisteredAccount>, RepositoryError> {
            let guard = self.accounts.lock().expect("repository mutex poisoned");
            Ok(guard
                .values()
                .find(|account| account.email.eq_ignore_ascii_case(email))
                .cloned())
        }

        fn fetch(&self, id: &AccountId) -> Result<Option<RegisteredAccount>, RepositoryError> {
            let guard = self.accounts.lock().expect("repository mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn insert(
            &self,
            account: RegisteredAccount,
        ) -> Result<RegisteredAccount, RepositoryError> {
            let mut guard = self.accounts.lock().expect("repository mutex poisoned");
            if guard.contains_key(&account.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(account.id, account.clone());
            Ok(account)
        }

        fn update(&self, account: RegisteredAccount) -> Result<(), RepositoryError> {
            let mut guard = self.accounts.lock().expect("repository mutex poisoned");
            guard.insert(account.id, account);
            Ok(())
        }
    }

    pub(super) fn typed_broker() -> Vec<FieldUpdate> {
        vec![
            FieldUpdate::ProfileType(ProfileType::Broker),
            FieldUpdate::Name("Mariana Lopes".to_string()),
            FieldUpdate::Email("mariana@corretora.com.br".to_string()),
            FieldUpdate::Password("segredo123".to_string()),
            FieldUpdate::ConfirmPassword("segredo123".to_string()),
            FieldUpdate::Phone("21987654321".to_string()),
            FieldUpdate::LicenseCode("RJ 45678".to_string()),
            FieldUpdate::AcceptedTerms(Some(true)),
        ]
    }
}

use std::sync::Arc;

use common::*;
use realty_registration::config::RegistrationConfig;
use realty_registration::identifiers::{cnpj, cpf, phone};
use realty_registration::registration::{
    required_fields, validate_form, AccountStatus, FieldUpdate, FormController, FormField,
    ProfileType, RegistrationForm, RegistrationService, SubmitOutcome,
};

#[test]
fn broker_session_ends_with_a_stored_account() {
    let repository = Arc::new(MemoryAccounts::default());
    let config = RegistrationConfig::default();
    let service = RegistrationService::new(repository.clone(), &config);
    let mut controller = FormController::new(config.validator());

    for update in typed_broker() {
        controller.update_field(update);
    }
    assert_eq!(controller.form().phone, "(21) 98765-4321");

    assert_eq!(controller.submit(&service), SubmitOutcome::Accepted);

    let accounts = repository.all();
    assert_eq!(accounts.len(), 1);
    let account = &accounts[0];
    assert_eq!(account.status, AccountStatus::Active);
    assert_eq!(account.license_code.as_deref(), Some("CRECI/RJ-45678"));
    assert_eq!(account.phone.as_deref(), Some("(21) 98765-4321"));
}

#[test]
fn invalid_session_keeps_errors_until_fixed() {
    let repository = Arc::new(MemoryAccounts::default());
    let config = RegistrationConfig::default();
    let service = RegistrationService::new(repository.clone(), &config);
    let mut controller = FormController::new(config.validator());

    for update in typed_broker() {
        controller.update_field(update);
    }
    controller.update_field(FieldUpdate::LicenseCode(String::new()));

    assert_eq!(controller.submit(&service), SubmitOutcome::Invalid);
    assert_eq!(
        controller.errors().message(FormField::LicenseCode),
        Some("CRECI é obrigatório")
    );

    controller.update_field(FieldUpdate::LicenseCode("CRECI/RJ-45678".to_string()));
    assert!(!controller.errors().contains(FormField::LicenseCode));
    assert_eq!(controller.submit(&service), SubmitOutcome::Accepted);
    assert_eq!(repository.all().len(), 1);
}

#[test]
fn generated_documents_satisfy_the_checksum_layer() {
    for _ in 0..50 {
        let individual = cpf::generate_valid();
        let company = cnpj::generate_valid();
        assert!(cpf::is_valid_checksum(&individual), "{individual}");
        assert!(cnpj::is_valid_checksum(&company), "{company}");
        assert_eq!(cpf::format(&cpf::strip(&individual)), individual);
        assert_eq!(cnpj::format(&cnpj::strip(&company)), company);
    }
}

#[test]
fn public_rule_tables_drive_validation() {
    for profile in ProfileType::ALL {
        let form = RegistrationForm {
            name: "Paula Andrade".to_string(),
            email: "paula@example.com".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
            profile_type: profile,
            ..RegistrationForm::default()
        };

        let errors = validate_form(&form);
        let missing: Vec<_> = required_fields(profile)
            .into_iter()
            .filter(|field| field.is_credential())
            .collect();

        assert_eq!(errors.fields().collect::<Vec<_>>(), missing, "{profile}");
    }
}

#[test]
fn phone_shapes_round_trip() {
    assert_eq!(phone::format("11999999999"), "(11) 99999-9999");
    assert_eq!(phone::format("1133334444"), "(11) 3333-4444");
    assert_eq!(phone::format("123"), "123");
    assert!(phone::is_mobile("(11) 99999-9999"));
    assert!(phone::is_landline("(11) 3333-4444"));
}
