use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use realty_registration::config::AppConfig;
use realty_registration::error::AppError;
use realty_registration::identifiers::{cnpj, cpf, creci, phone};
use realty_registration::registration::{
    parse_forms, DocumentKind, ErrorMap, FormValidator, ProfileType, RegistrationForm,
};
use serde_json::json;

#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("input").required(true).args(["file", "csv"])))]
pub(crate) struct ValidateArgs {
    /// JSON file holding a single registration form
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// CSV export with one registration form per row
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Also verify CPF/CNPJ check digits
    #[arg(long)]
    pub(crate) checksums: bool,
}

#[derive(Args, Debug)]
pub(crate) struct FormatArgs {
    /// Kind of value to format
    #[arg(value_enum)]
    pub(crate) kind: FormatKind,
    /// Raw or partially formatted input
    pub(crate) value: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum FormatKind {
    Phone,
    Cpf,
    Cnpj,
    Creci,
}

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Document kind to generate
    #[arg(value_enum)]
    pub(crate) kind: GenerateKind,
    /// Number of documents to print
    #[arg(long, default_value_t = 1)]
    pub(crate) count: usize,
    /// Seed for reproducible fixtures
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum GenerateKind {
    Cpf,
    Cnpj,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RulesArgs {
    /// Restrict the output to one profile code (e.g. corretor, imobiliaria)
    #[arg(long, value_parser = crate::infra::parse_profile)]
    pub(crate) profile: Option<ProfileType>,
}

pub(crate) fn run_validate(args: ValidateArgs, config: &AppConfig) -> Result<(), AppError> {
    let validator = config.registration.validator();
    let check = |form: &RegistrationForm| -> ErrorMap {
        if args.checksums {
            validator.validate_with_checksums(form)
        } else {
            validator.validate(form)
        }
    };

    if let Some(path) = &args.file {
        let form: RegistrationForm = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        let errors = check(&form);
        println!("{}", serde_json::to_string_pretty(&report(&form, &errors))?);
    }

    if let Some(path) = &args.csv {
        let forms = parse_forms(BufReader::new(File::open(path)?))?;
        let reports: Vec<_> = forms
            .iter()
            .enumerate()
            .map(|(index, form)| {
                let mut entry = report(form, &check(form));
                entry["row"] = json!(index + 1);
                entry
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

fn report(form: &RegistrationForm, errors: &ErrorMap) -> serde_json::Value {
    json!({
        "email": form.email,
        "profileType": form.profile_type,
        "valid": errors.is_empty(),
        "errors": errors,
    })
}

pub(crate) fn run_format(args: FormatArgs) -> Result<(), AppError> {
    let formatted = match args.kind {
        FormatKind::Phone => phone::format(&args.value),
        FormatKind::Cpf => cpf::format(&args.value),
        FormatKind::Cnpj => cnpj::format(&args.value),
        FormatKind::Creci => creci::format(&args.value),
    };
    println!("{formatted}");
    Ok(())
}

pub(crate) fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..args.count {
        let document = match args.kind {
            GenerateKind::Cpf => cpf::generate_valid_with(&mut rng),
            GenerateKind::Cnpj => cnpj::generate_valid_with(&mut rng),
        };
        println!("{document}");
    }
    Ok(())
}

pub(crate) fn run_rules(args: RulesArgs, config: &AppConfig) -> Result<(), AppError> {
    let validator: FormValidator = config.registration.validator();
    let rules: Vec<_> = validator
        .tables()
        .iter()
        .filter(|rule| args.profile.map_or(true, |profile| profile == rule.profile))
        .map(|rule| {
            json!({
                "profile": rule.profile,
                "label": rule.profile.label(),
                "description": rule.profile.description(),
                "requiredFields": rule.required_fields,
                "document": rule.document.map(DocumentKind::code),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rules)?);
    Ok(())
}
