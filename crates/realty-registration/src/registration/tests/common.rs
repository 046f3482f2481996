use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::RegistrationConfig;
use crate::registration::domain::{ProfileType, RegistrationForm};
use crate::registration::repository::{
    AccountId, AccountRepository, RegisteredAccount, RepositoryError,
};
use crate::registration::service::{
    AccountRegistrar, RegistrationRequest, RegistrationResult, RegistrationService,
};

pub(super) const VALID_CPF: &str = "529.982.247-25";
pub(super) const VALID_CNPJ: &str = "11.222.333/0001-81";

pub(super) fn base_form(profile_type: ProfileType) -> RegistrationForm {
    RegistrationForm {
        name: "Carlos Eduardo".to_string(),
        email: "carlos@example.com".to_string(),
        password: "abcdef".to_string(),
        confirm_password: "abcdef".to_string(),
        profile_type,
        ..RegistrationForm::default()
    }
}

pub(super) fn broker_form() -> RegistrationForm {
    RegistrationForm {
        license_code: "CRECI/SP-123456".to_string(),
        phone: "(11) 99999-9999".to_string(),
        accepted_terms: Some(true),
        ..base_form(ProfileType::Broker)
    }
}

pub(super) fn agency_form() -> RegistrationForm {
    RegistrationForm {
        company_tax_id: VALID_CNPJ.to_string(),
        company_name: "Central Imóveis".to_string(),
        accepted_terms: Some(true),
        ..base_form(ProfileType::Agency)
    }
}

pub(super) fn customer_form() -> RegistrationForm {
    RegistrationForm {
        individual_tax_id: VALID_CPF.to_string(),
        accepted_terms: Some(true),
        ..base_form(ProfileType::Customer)
    }
}

pub(super) fn service_with(
    config: RegistrationConfig,
) -> (RegistrationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = RegistrationService::new(repository.clone(), &config);
    (service, repository)
}

pub(super) fn service() -> (RegistrationService<MemoryRepository>, Arc<MemoryRepository>) {
    service_with(RegistrationConfig::default())
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) accounts: Arc<Mutex<HashMap<AccountId, RegisteredAccount>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.accounts.lock().expect("repository mutex poisoned").len()
    }
}

impl AccountRepository for MemoryRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<RegisteredAccount>, RepositoryError> {
        let guard = self.accounts.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|account| account.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    fn fetch(&self, id: &AccountId) -> Result<Option<RegisteredAccount>, RepositoryError> {
        let guard = self.accounts.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert(&self, account: RegisteredAccount) -> Result<RegisteredAccount, RepositoryError> {
        let mut guard = self.accounts.lock().expect("repository mutex poisoned");
        if guard.contains_key(&account.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(account.id, account.clone());
        Ok(account)
    }

    fn update(&self, account: RegisteredAccount) -> Result<(), RepositoryError> {
        let mut guard = self.accounts.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&account.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(account.id, account);
        Ok(())
    }
}

/// Repository whose backend is always down.
pub(super) struct OfflineRepository;

impl AccountRepository for OfflineRepository {
    fn find_by_email(&self, _email: &str) -> Result<Option<RegisteredAccount>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn fetch(&self, _id: &AccountId) -> Result<Option<RegisteredAccount>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn insert(&self, _account: RegisteredAccount) -> Result<RegisteredAccount, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn update(&self, _account: RegisteredAccount) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }
}

/// Registrar stub that records requests and answers with a canned result.
pub(super) struct ScriptedRegistrar {
    pub(super) result: RegistrationResult,
    pub(super) requests: Mutex<Vec<RegistrationRequest>>,
}

impl ScriptedRegistrar {
    pub(super) fn answering(result: RegistrationResult) -> Self {
        Self {
            result,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn requests(&self) -> Vec<RegistrationRequest> {
        self.requests.lock().expect("registrar mutex poisoned").clone()
    }
}

impl AccountRegistrar for ScriptedRegistrar {
    fn create_account(&self, request: RegistrationRequest) -> RegistrationResult {
        self.requests
            .lock()
            .expect("registrar mutex poisoned")
            .push(request);
        self.result.clone()
    }
}
