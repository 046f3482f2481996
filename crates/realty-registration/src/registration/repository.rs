use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{AccessLevel, ExperienceBand, ProfileType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle of a stored account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Pending,
    Active,
    Suspended,
    Deactivated,
}

impl AccountStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Active => "active",
            AccountStatus::Suspended => "suspended",
            AccountStatus::Deactivated => "deactivated",
        }
    }
}

/// Stored account. Identifiers are kept in canonical format and the
/// password never reaches this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredAccount {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub profile_type: ProfileType,
    pub status: AccountStatus,
    pub phone: Option<String>,
    pub license_code: Option<String>,
    pub company_tax_id: Option<String>,
    pub individual_tax_id: Option<String>,
    pub company_name: Option<String>,
    pub experience: Option<ExperienceBand>,
    pub access_level: Option<AccessLevel>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction for accounts; lookups by email ignore case.
pub trait AccountRepository: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<RegisteredAccount>, RepositoryError>;
    fn fetch(&self, id: &AccountId) -> Result<Option<RegisteredAccount>, RepositoryError>;
    fn insert(&self, account: RegisteredAccount) -> Result<RegisteredAccount, RepositoryError>;
    fn update(&self, account: RegisteredAccount) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("account already exists")]
    Conflict,
    #[error("account not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
