use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Registrant category selected before any rule is evaluated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ProfileType {
    /// Individual licensed broker.
    #[default]
    #[serde(rename = "corretor")]
    Broker,
    #[serde(rename = "imobiliaria")]
    Agency,
    /// Developer or incorporator.
    #[serde(rename = "incorporadora")]
    Developer,
    #[serde(rename = "cliente")]
    Customer,
    #[serde(rename = "proprietario")]
    PropertyOwner,
    #[serde(rename = "administrador")]
    Administrator,
}

impl ProfileType {
    pub const ALL: [ProfileType; 6] = [
        ProfileType::Broker,
        ProfileType::Agency,
        ProfileType::Developer,
        ProfileType::Customer,
        ProfileType::PropertyOwner,
        ProfileType::Administrator,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            ProfileType::Broker => "corretor",
            ProfileType::Agency => "imobiliaria",
            ProfileType::Developer => "incorporadora",
            ProfileType::Customer => "cliente",
            ProfileType::PropertyOwner => "proprietario",
            ProfileType::Administrator => "administrador",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProfileType::Broker => "Corretor",
            ProfileType::Agency => "Imobiliária",
            ProfileType::Developer => "Incorporadora",
            ProfileType::Customer => "Cliente",
            ProfileType::PropertyOwner => "Proprietário",
            ProfileType::Administrator => "Administrador",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ProfileType::Broker => "Profissional autônomo ou vinculado a imobiliária",
            ProfileType::Agency => "Empresa com vários corretores e imóveis",
            ProfileType::Developer => "Construtora ou desenvolvedora de imóveis",
            ProfileType::Customer => "Busca imóveis para comprar ou alugar",
            ProfileType::PropertyOwner => "Possui imóveis para vender ou alugar",
            ProfileType::Administrator => "Acesso total ao sistema (interno)",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            ProfileType::Broker => 0,
            ProfileType::Agency => 1,
            ProfileType::Developer => 2,
            ProfileType::Customer => 3,
            ProfileType::PropertyOwner => 4,
            ProfileType::Administrator => 5,
        }
    }

    /// Resolve a code that upstream code guarantees to be part of the closed set.
    ///
    /// # Panics
    ///
    /// Panics when `code` is unknown: that is a caller bug, not user input.
    /// Use [`str::parse`] for untrusted text.
    pub fn from_code_strict(code: &str) -> Self {
        match code.parse() {
            Ok(profile) => profile,
            Err(UnknownProfileType(code)) => panic!("profile type '{code}' is outside the closed set"),
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile type '{0}'")]
pub struct UnknownProfileType(pub String);

impl FromStr for ProfileType {
    type Err = UnknownProfileType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ProfileType::ALL
            .into_iter()
            .find(|profile| profile.code() == normalized)
            .ok_or_else(|| UnknownProfileType(value.to_string()))
    }
}

/// Taxpayer document a profile is expected to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Cpf,
    Cnpj,
}

impl DocumentKind {
    pub const fn code(self) -> &'static str {
        match self {
            DocumentKind::Cpf => "cpf",
            DocumentKind::Cnpj => "cnpj",
        }
    }

    /// Form field that carries this document.
    pub const fn field(self) -> FormField {
        match self {
            DocumentKind::Cpf => FormField::IndividualTaxId,
            DocumentKind::Cnpj => FormField::CompanyTaxId,
        }
    }
}

/// Years of market experience, mostly relevant to brokers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceBand {
    #[serde(rename = "less-1")]
    LessThanOneYear,
    #[serde(rename = "1-3")]
    OneToThreeYears,
    #[serde(rename = "3-5")]
    ThreeToFiveYears,
    #[serde(rename = "5-10")]
    FiveToTenYears,
    #[serde(rename = "more-10")]
    MoreThanTenYears,
}

impl ExperienceBand {
    pub const ALL: [ExperienceBand; 5] = [
        ExperienceBand::LessThanOneYear,
        ExperienceBand::OneToThreeYears,
        ExperienceBand::ThreeToFiveYears,
        ExperienceBand::FiveToTenYears,
        ExperienceBand::MoreThanTenYears,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            ExperienceBand::LessThanOneYear => "less-1",
            ExperienceBand::OneToThreeYears => "1-3",
            ExperienceBand::ThreeToFiveYears => "3-5",
            ExperienceBand::FiveToTenYears => "5-10",
            ExperienceBand::MoreThanTenYears => "more-10",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExperienceBand::LessThanOneYear => "Menos de 1 ano",
            ExperienceBand::OneToThreeYears => "1-3 anos",
            ExperienceBand::ThreeToFiveYears => "3-5 anos",
            ExperienceBand::FiveToTenYears => "5-10 anos",
            ExperienceBand::MoreThanTenYears => "Mais de 10 anos",
        }
    }
}

impl FromStr for ExperienceBand {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        ExperienceBand::ALL
            .into_iter()
            .find(|band| band.code() == value)
            .ok_or_else(|| format!("unknown experience band '{value}'"))
    }
}

/// Back-office permission tier for administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    #[serde(rename = "super")]
    SuperAdmin,
    #[serde(rename = "moderador")]
    Moderator,
    #[serde(rename = "visualizador")]
    Viewer,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 3] = [
        AccessLevel::SuperAdmin,
        AccessLevel::Moderator,
        AccessLevel::Viewer,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            AccessLevel::SuperAdmin => "super",
            AccessLevel::Moderator => "moderador",
            AccessLevel::Viewer => "visualizador",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AccessLevel::SuperAdmin => "Super Administrador",
            AccessLevel::Moderator => "Moderador",
            AccessLevel::Viewer => "Apenas Visualização",
        }
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        AccessLevel::ALL
            .into_iter()
            .find(|level| level.code() == normalized)
            .ok_or_else(|| format!("unknown access level '{value}'"))
    }
}

/// Keys of the error map. `General` carries failures that belong to no field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Password,
    ConfirmPassword,
    ProfileType,
    Phone,
    LicenseCode,
    CompanyTaxId,
    IndividualTaxId,
    CompanyName,
    AcceptedTerms,
    Experience,
    AccessLevel,
    General,
}

impl FormField {
    pub const fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
            FormField::ProfileType => "profileType",
            FormField::Phone => "phone",
            FormField::LicenseCode => "licenseCode",
            FormField::CompanyTaxId => "companyTaxId",
            FormField::IndividualTaxId => "individualTaxId",
            FormField::CompanyName => "companyName",
            FormField::AcceptedTerms => "acceptedTerms",
            FormField::Experience => "experience",
            FormField::AccessLevel => "accessLevel",
            FormField::General => "general",
        }
    }

    /// Label used inside user-facing messages.
    pub const fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nome",
            FormField::Email => "Email",
            FormField::Password => "Senha",
            FormField::ConfirmPassword => "Confirmação de senha",
            FormField::ProfileType => "Tipo de perfil",
            FormField::Phone => "Telefone",
            FormField::LicenseCode => "CRECI",
            FormField::CompanyTaxId => "CNPJ",
            FormField::IndividualTaxId => "CPF",
            FormField::CompanyName => "Nome da empresa",
            FormField::AcceptedTerms => "Termos e condições",
            FormField::Experience => "Experiência",
            FormField::AccessLevel => "Nível de acesso",
            FormField::General => "Cadastro",
        }
    }

    /// License code and tax ids: the fields whose presence depends on the profile.
    pub const fn is_credential(self) -> bool {
        matches!(
            self,
            FormField::LicenseCode | FormField::CompanyTaxId | FormField::IndividualTaxId
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Mutable registration record owned by a single form session.
///
/// Optional text fields use the empty string for "absent", mirroring what a
/// form input holds before the user types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub profile_type: ProfileType,
    pub phone: String,
    pub license_code: String,
    pub company_tax_id: String,
    pub individual_tax_id: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_terms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
}

impl RegistrationForm {
    /// Text content of a string-valued field; `None` for enum or flag fields.
    pub fn text(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::ConfirmPassword => &self.confirm_password,
            FormField::Phone => &self.phone,
            FormField::LicenseCode => &self.license_code,
            FormField::CompanyTaxId => &self.company_tax_id,
            FormField::IndividualTaxId => &self.individual_tax_id,
            FormField::CompanyName => &self.company_name,
            FormField::ProfileType
            | FormField::AcceptedTerms
            | FormField::Experience
            | FormField::AccessLevel
            | FormField::General => return None,
        };
        Some(value.as_str())
    }

    /// True when a text field is missing or holds only whitespace.
    pub fn is_blank(&self, field: FormField) -> bool {
        self.text(field).map_or(true, |value| value.trim().is_empty())
    }

    /// Replace one field, returning which field changed.
    pub fn apply(&mut self, update: FieldUpdate) -> FormField {
        let field = update.field();
        match update {
            FieldUpdate::Name(value) => self.name = value,
            FieldUpdate::Email(value) => self.email = value,
            FieldUpdate::Password(value) => self.password = value,
            FieldUpdate::ConfirmPassword(value) => self.confirm_password = value,
            FieldUpdate::ProfileType(value) => self.profile_type = value,
            FieldUpdate::Phone(value) => self.phone = value,
            FieldUpdate::LicenseCode(value) => self.license_code = value,
            FieldUpdate::CompanyTaxId(value) => self.company_tax_id = value,
            FieldUpdate::IndividualTaxId(value) => self.individual_tax_id = value,
            FieldUpdate::CompanyName(value) => self.company_name = value,
            FieldUpdate::AcceptedTerms(value) => self.accepted_terms = value,
            FieldUpdate::Experience(value) => self.experience = value,
            FieldUpdate::AccessLevel(value) => self.access_level = value,
        }
        field
    }
}

/// A single typed edit to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Email(String),
    Password(String),
    ConfirmPassword(String),
    ProfileType(ProfileType),
    Phone(String),
    LicenseCode(String),
    CompanyTaxId(String),
    IndividualTaxId(String),
    CompanyName(String),
    AcceptedTerms(Option<bool>),
    Experience(Option<ExperienceBand>),
    AccessLevel(Option<AccessLevel>),
}

impl FieldUpdate {
    pub const fn field(&self) -> FormField {
        match self {
            FieldUpdate::Name(_) => FormField::Name,
            FieldUpdate::Email(_) => FormField::Email,
            FieldUpdate::Password(_) => FormField::Password,
            FieldUpdate::ConfirmPassword(_) => FormField::ConfirmPassword,
            FieldUpdate::ProfileType(_) => FormField::ProfileType,
            FieldUpdate::Phone(_) => FormField::Phone,
            FieldUpdate::LicenseCode(_) => FormField::LicenseCode,
            FieldUpdate::CompanyTaxId(_) => FormField::CompanyTaxId,
            FieldUpdate::IndividualTaxId(_) => FormField::IndividualTaxId,
            FieldUpdate::CompanyName(_) => FormField::CompanyName,
            FieldUpdate::AcceptedTerms(_) => FormField::AcceptedTerms,
            FieldUpdate::Experience(_) => FormField::Experience,
            FieldUpdate::AccessLevel(_) => FormField::AccessLevel,
        }
    }
}
