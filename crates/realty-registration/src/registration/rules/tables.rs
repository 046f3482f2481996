use crate::registration::domain::{DocumentKind, FormField, ProfileType};

use super::config::RuleConfig;

pub(super) const BASE_FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::Email,
    FormField::Password,
    FormField::ConfirmPassword,
];

/// Requirement entry for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRule {
    pub profile: ProfileType,
    pub required_fields: Vec<FormField>,
    pub document: Option<DocumentKind>,
}

pub(super) fn build_rule(profile: ProfileType, config: &RuleConfig) -> ProfileRule {
    let (credential, document) = match profile {
        ProfileType::Broker => (Some(FormField::LicenseCode), config.broker_document),
        ProfileType::Agency | ProfileType::Developer => {
            (Some(FormField::CompanyTaxId), Some(DocumentKind::Cnpj))
        }
        ProfileType::Customer | ProfileType::PropertyOwner => {
            (Some(FormField::IndividualTaxId), Some(DocumentKind::Cpf))
        }
        ProfileType::Administrator => (None, config.administrator_document),
    };

    let mut required_fields = BASE_FIELDS.to_vec();
    required_fields.extend(credential);
    if let Some(kind) = document {
        if !required_fields.contains(&kind.field()) {
            required_fields.push(kind.field());
        }
    }

    ProfileRule {
        profile,
        required_fields,
        document,
    }
}
