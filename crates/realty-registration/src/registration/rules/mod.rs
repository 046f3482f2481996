//! Profile-driven requirement tables.
//!
//! The two lookups here are the only place that knows which credentials a
//! profile must present. Validation consults them and never branches on the
//! profile for required-field decisions itself.

mod config;
mod tables;

pub use config::RuleConfig;
pub use tables::ProfileRule;

use super::domain::{DocumentKind, FormField, ProfileType};
use tables::build_rule;

/// Rule entries for every profile, resolved once from a [`RuleConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTables {
    rules: Vec<ProfileRule>,
}

impl RuleTables {
    pub fn new(config: RuleConfig) -> Self {
        let rules = ProfileType::ALL
            .into_iter()
            .map(|profile| build_rule(profile, &config))
            .collect();
        Self { rules }
    }

    pub fn rule(&self, profile: ProfileType) -> &ProfileRule {
        &self.rules[profile.index()]
    }

    /// Ordered fields that must be non-empty for `profile`.
    pub fn required_fields(&self, profile: ProfileType) -> &[FormField] {
        &self.rule(profile).required_fields
    }

    pub fn required_document_kind(&self, profile: ProfileType) -> Option<DocumentKind> {
        self.rule(profile).document
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProfileRule> {
        self.rules.iter()
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::new(RuleConfig::default())
    }
}

/// Required fields under the default configuration.
pub fn required_fields(profile: ProfileType) -> Vec<FormField> {
    build_rule(profile, &RuleConfig::default()).required_fields
}

/// Expected document under the default configuration.
pub fn required_document_kind(profile: ProfileType) -> Option<DocumentKind> {
    build_rule(profile, &RuleConfig::default()).document
}
