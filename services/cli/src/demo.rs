use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use realty_registration::config::AppConfig;
use realty_registration::error::AppError;
use realty_registration::identifiers::{cnpj, cpf};
use realty_registration::registration::{
    AccountStatus, FieldUpdate, FormController, FormField, LiveFieldValidator, ProfileType,
    RegistrationService, SubmitOutcome,
};
use tracing::info;

use crate::infra::InMemoryAccountRepository;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for the generated CPF/CNPJ fixtures
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Skip the duplicate-email and suspension steps
    #[arg(long)]
    pub(crate) skip_follow_up: bool,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        seed,
        skip_follow_up,
    } = args;
    let mut rng = StdRng::seed_from_u64(seed.unwrap_or(2024));

    let repository = Arc::new(InMemoryAccountRepository::default());
    let service = RegistrationService::new(repository.clone(), &config.registration);
    let validator = config.registration.validator();

    println!("Registration demo");

    println!("\nLive validation ({} ms debounce)", config.registration.live_debounce.as_millis());
    let mut live = LiveFieldValidator::for_field(
        validator.clone(),
        FormField::IndividualTaxId,
        config.registration.live_debounce,
    );
    let start = Instant::now();
    for (offset, typed) in [(0, "529.982"), (120, "529.982.247-2"), (260, "529.982.247-25")] {
        live.edit(typed, start + Duration::from_millis(offset));
    }
    let settled = start + Duration::from_millis(260) + config.registration.live_debounce;
    live.poll(settled);
    println!(
        "- CPF field settled on last keystroke: {}",
        live.error().unwrap_or("ok")
    );

    println!("\nBroker session");
    let mut controller = FormController::new(validator.clone());
    controller.update_field(FieldUpdate::Name("Jo".to_string()));
    controller.update_field(FieldUpdate::Email("jo@".to_string()));
    if !controller.validate() {
        for (field, error) in controller.errors().iter() {
            println!("- {}: {}", field.key(), error.message);
        }
    }

    for update in [
        FieldUpdate::Name("Joana Ribeiro".to_string()),
        FieldUpdate::Email("joana@corretora.com.br".to_string()),
        FieldUpdate::Password("segredo123".to_string()),
        FieldUpdate::ConfirmPassword("segredo123".to_string()),
        FieldUpdate::Phone("11987654321".to_string()),
        FieldUpdate::LicenseCode("sp 123456".to_string()),
        FieldUpdate::AcceptedTerms(Some(true)),
    ] {
        controller.update_field(update);
    }
    println!("- phone stored as {}", controller.form().phone);
    print_outcome(&controller.submit(&service));

    println!("\nAgency session");
    let mut agency = FormController::new(validator.clone());
    for update in [
        FieldUpdate::ProfileType(ProfileType::Agency),
        FieldUpdate::Name("Central Imoveis".to_string()),
        FieldUpdate::Email("contato@central.com.br".to_string()),
        FieldUpdate::Password("abcdef".to_string()),
        FieldUpdate::ConfirmPassword("abcdef".to_string()),
        FieldUpdate::CompanyTaxId(cnpj::generate_valid_with(&mut rng)),
        FieldUpdate::AcceptedTerms(Some(true)),
    ] {
        agency.update_field(update);
    }
    print_outcome(&agency.submit(&service));

    if !skip_follow_up {
        println!("\nFollow-up");
        let mut duplicate = FormController::new(validator);
        for update in [
            FieldUpdate::ProfileType(ProfileType::Customer),
            FieldUpdate::Name("Joana Ribeiro".to_string()),
            FieldUpdate::Email("JOANA@corretora.com.br".to_string()),
            FieldUpdate::Password("segredo123".to_string()),
            FieldUpdate::ConfirmPassword("segredo123".to_string()),
            FieldUpdate::IndividualTaxId(cpf::generate_valid_with(&mut rng)),
            FieldUpdate::AcceptedTerms(Some(true)),
        ] {
            duplicate.update_field(update);
        }
        print_outcome(&duplicate.submit(&service));

        if let Some(account) = repository.accounts().first() {
            let suspended = service.set_status(&account.id, AccountStatus::Suspended)?;
            println!("- {} is now {}", suspended.email, suspended.status.label());
        }
    }

    println!("\nStored accounts");
    for account in repository.accounts() {
        println!(
            "- {} [{}] {} | {}",
            account.email,
            account.profile_type.label(),
            account.status.label(),
            account
                .license_code
                .as_deref()
                .or(account.company_tax_id.as_deref())
                .or(account.individual_tax_id.as_deref())
                .unwrap_or("-")
        );
    }
    info!(accounts = repository.accounts().len(), "demo finished");
    Ok(())
}

fn print_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Accepted => println!("- account created"),
        SubmitOutcome::Rejected(message) => println!("- rejected: {message}"),
        SubmitOutcome::Invalid => println!("- form still has errors"),
    }
}
