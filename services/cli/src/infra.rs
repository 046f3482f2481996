use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use realty_registration::registration::{
    AccountId, AccountRepository, ProfileType, RegisteredAccount, RepositoryError,
};

/// Process-local account store for demos; lost when the command exits.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAccountRepository {
    accounts: Arc<Mutex<HashMap<AccountId, RegisteredAccount>>>,
}

impl InMemoryAccountRepository {
    pub(crate) fn accounts(&self) -> Vec<RegisteredAccount> {
        let guard = self.accounts.lock().expect("repository mutex poisoned");
        let mut accounts: Vec<_> = guard.values().cloned().collect();
        accounts.sort_by_key(|account| account.created_at);
        accounts
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<RegisteredAccount>, RepositoryError> {
        let guard = self.accounts.lock().expect("repository mutex poisoned");
        let email = email.trim();
        Ok(guard
            .values()
            .find(|account| account.email.eq_ignore_ascii_case(email))
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
        if guard.contains_key(&account.id) {
            guard.insert(account.id, account);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}

pub(crate) fn parse_profile(value: &str) -> Result<ProfileType, String> {
    value.parse().map_err(|err| {
        let codes: Vec<_> = ProfileType::ALL.iter().map(|profile| profile.code()).collect();
        format!("{err}; expected one of {}", codes.join(", "))
    })
}
