//! Field bounds, format patterns and the Portuguese message catalogue.

use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 100;
pub const EMAIL_MAX_LENGTH: usize = 100;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 50;
pub const LICENSE_CODE_MIN_LENGTH: usize = 3;
pub const LICENSE_CODE_MAX_LENGTH: usize = 20;

/// Letters (accented included) and whitespace.
pub static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÿ\s]+$").expect("name pattern is valid"));

pub static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub mod messages {
    pub const EMAIL_INVALID: &str = "Email inválido";
    pub const PASSWORDS_DIFFER: &str = "As senhas não coincidem";
    pub const CONFIRM_PASSWORD: &str = "Confirme sua senha";
    pub const PHONE_INVALID: &str = "Telefone inválido (use: (11) 99999-9999)";
    pub const CPF_INVALID: &str = "CPF inválido (use: 123.456.789-00)";
    pub const CNPJ_INVALID: &str = "CNPJ inválido (use: 12.345.678/0001-90)";
    pub const CRECI_INVALID: &str = "CRECI inválido (use: CRECI/SP-123456)";
    pub const NAME_INVALID: &str = "Nome inválido (apenas letras e espaços)";
    pub const TERMS_REQUIRED: &str = "É necessário aceitar os termos e condições";
    pub const CPF_CHECKSUM: &str = "CPF inválido (dígitos verificadores não conferem)";
    pub const CNPJ_CHECKSUM: &str = "CNPJ inválido (dígitos verificadores não conferem)";
    pub const ACCOUNT_CREATION_FAILED: &str = "Erro ao criar conta";
    pub const EMAIL_TAKEN: &str = "Email já cadastrado";
    pub const INTERNAL_ERROR: &str = "Erro interno do sistema. Tente novamente mais tarde.";

    pub fn required(label: &str) -> String {
        format!("{label} é obrigatório")
    }

    pub fn too_short(label: &str, min: usize) -> String {
        format!("{label} deve ter pelo menos {min} caracteres")
    }

    pub fn too_long(label: &str, max: usize) -> String {
        format!("{label} deve ter no máximo {max} caracteres")
    }
}
