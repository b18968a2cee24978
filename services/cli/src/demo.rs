use crate::infra::{born_years_before, build_shelter, Overrides};
use chrono::NaiveDate;
use clap::Args;
use pet_shelter::config::ShelterConfig;
use pet_shelter::error::AppError;
use pet_shelter::shelter::{
    AdoptionDecision, CustomerRecord, NewCustomer, Pet, PetKind, RosterImporter,
    SelectionStrategy, ShelterManager,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Shelter date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed for customer numbers and random candidate selection.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Candidate selection strategy (random or lowest_id).
    #[arg(long, value_parser = crate::infra::parse_selection)]
    pub(crate) selection: Option<SelectionStrategy>,
}

#[derive(Args, Debug)]
pub(crate) struct IntakeArgs {
    /// CSV roster with first_name,last_name,date_of_birth,has_garden,requested_pet
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Cats to register before processing the roster
    #[arg(long, default_value_t = 0)]
    pub(crate) cats: usize,
    /// Untrained dogs to register before processing the roster
    #[arg(long, default_value_t = 0)]
    pub(crate) dogs: usize,
    /// Trained dogs to register before processing the roster
    #[arg(long, default_value_t = 0)]
    pub(crate) trained_dogs: usize,
    /// Shelter date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed for customer numbers and random candidate selection.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Candidate selection strategy (random or lowest_id).
    #[arg(long, value_parser = crate::infra::parse_selection)]
    pub(crate) selection: Option<SelectionStrategy>,
    /// Emit the intake report as JSON instead of text.
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs, config: ShelterConfig) -> Result<(), AppError> {
    let DemoArgs {
        today,
        seed,
        selection,
    } = args;
    let (mut shelter, today) = build_shelter(
        config,
        Overrides {
            today,
            seed,
            selection,
        },
    );

    println!("Pet shelter demo ({today})");

    println!("\nRegistering pets");
    for pet_type in ["cat", "Cat", "CAT", "dog", "Dog"] {
        let pet = shelter.add_pet(pet_type)?;
        println!("- {pet}");
    }
    if let Err(err) = shelter.add_pet("parrot") {
        println!("- rejected: {err}");
    }

    let dogs: Vec<_> = shelter
        .pets()
        .filter(|pet| pet.kind() == PetKind::Dog)
        .map(Pet::id)
        .collect();
    if let Some(first_dog) = dogs.first() {
        shelter.update_pet_record(Some(first_dog), true)?;
        println!("- trained dog {first_dog}");
    }
    let first_cat = shelter
        .pets()
        .find(|pet| pet.kind() == PetKind::Cat)
        .map(Pet::id);
    if let Some(cat) = first_cat {
        if let Err(err) = shelter.update_pet_record(Some(&cat), true) {
            println!("- rejected: {err}");
        }
    }
    if let Err(err) = shelter.update_pet_record(None, true) {
        println!("- rejected: {err}");
    }
    print_availability(&shelter);

    println!("\nRegistering customers");
    let jan = register(&mut shelter, "Jan", "Kowalski", born_years_before(today, 34), true)?;
    let ola = register(&mut shelter, "Ola", "Lis", born_years_before(today, 19), true)?;
    let tom = register(&mut shelter, "Tom", "Young", born_years_before(today, 16), false)?;
    let piotr = register(&mut shelter, "Piotr", "Flat", born_years_before(today, 52), false)?;
    match shelter.add_customer_record(NewCustomer::new(
        "Jan",
        "Kowalski",
        jan.date_of_birth(),
        false,
    )) {
        Ok(record) => println!("- unexpected duplicate accepted: {record}"),
        Err(err) => println!("- rejected: {err}"),
    }
    if let Err(err) = shelter.add_customer_record(NewCustomer {
        first_name: Some("Anna".to_string()),
        ..NewCustomer::default()
    }) {
        println!("- rejected: {err}");
    }

    println!("\nAdoptions");
    let requests = [
        (&tom, "cat"),
        (&piotr, "dog"),
        (&ola, "dog"),
        (&jan, "dog"),
        (&jan, "cat"),
        (&jan, "cat"),
        (&jan, "cat"),
        (&piotr, "dog"),
        (&piotr, "hamster"),
    ];
    for (customer, pet_type) in requests {
        let decision = shelter.adopt_pet(customer, pet_type);
        print_decision(customer, pet_type, &decision);
    }
    print_availability(&shelter);

    println!("\nAdoption history");
    for customer in [&jan, &ola, &tom, &piotr] {
        let history = shelter.adopted_pets_by_customer(customer.customer_number());
        println!(
            "- {} ({}): {} pet(s)",
            customer.name(),
            customer.customer_number(),
            history.len()
        );
        for pet in history.iter() {
            println!("    {pet}");
        }
    }

    Ok(())
}

pub(crate) fn run_intake(args: IntakeArgs, config: ShelterConfig) -> Result<(), AppError> {
    let IntakeArgs {
        roster,
        cats,
        dogs,
        trained_dogs,
        today,
        seed,
        selection,
        json,
    } = args;

    let entries = RosterImporter::from_path(&roster)?;
    let (mut shelter, today) = build_shelter(
        config,
        Overrides {
            today,
            seed,
            selection,
        },
    );

    for _ in 0..cats {
        shelter.add_pet("cat")?;
    }
    for _ in 0..dogs {
        shelter.add_pet("dog")?;
    }
    for _ in 0..trained_dogs {
        let id = shelter.add_pet("dog")?.id();
        shelter.update_pet_record(Some(&id), true)?;
    }
    let stocked: Vec<Pet> = shelter.pets().cloned().collect();

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut outcome = RowOutcome {
            line: entry.line,
            customer: None,
            requested_pet: entry.requested_pet.clone(),
            decision: None,
            error: None,
        };
        match shelter.add_customer_record(entry.customer) {
            Ok(record) => {
                outcome.decision = entry
                    .requested_pet
                    .as_deref()
                    .map(|requested| shelter.adopt_pet(&record, requested));
                outcome.customer = Some(record);
            }
            Err(err) => outcome.error = Some(err.to_string()),
        }
        rows.push(outcome);
    }

    let report = IntakeReport {
        today,
        stocked,
        rows,
        available_cats: shelter.no_of_available_pets("cat"),
        available_dogs: shelter.no_of_available_pets("dog"),
    };

    if json {
        let payload = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{payload}");
    } else {
        render_intake_report(&report);
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct IntakeReport {
    today: NaiveDate,
    stocked: Vec<Pet>,
    rows: Vec<RowOutcome>,
    available_cats: usize,
    available_dogs: usize,
}

#[derive(Debug, Serialize)]
struct RowOutcome {
    line: u64,
    customer: Option<CustomerRecord>,
    requested_pet: Option<String>,
    decision: Option<AdoptionDecision>,
    error: Option<String>,
}

fn render_intake_report(report: &IntakeReport) {
    println!("Roster intake ({})", report.today);
    println!("Stocked {} pet(s)", report.stocked.len());

    for row in &report.rows {
        match (&row.customer, &row.error) {
            (Some(customer), _) => {
                println!(
                    "- line {}: registered {} as {}",
                    row.line,
                    customer.name(),
                    customer.customer_number()
                );
                match (&row.decision, &row.requested_pet) {
                    (Some(decision), Some(requested)) => {
                        println!("    {requested}: {}", decision.summary())
                    }
                    _ => println!("    no adoption requested"),
                }
            }
            (None, Some(error)) => println!("- line {}: rejected ({error})", row.line),
            (None, None) => println!("- line {}: skipped", row.line),
        }
    }

    println!(
        "\nStill available: {} cat(s), {} dog(s)",
        report.available_cats, report.available_dogs
    );
}

fn register(
    shelter: &mut ShelterManager,
    first_name: &str,
    last_name: &str,
    date_of_birth: NaiveDate,
    has_garden: bool,
) -> Result<CustomerRecord, AppError> {
    let record = shelter.add_customer_record(NewCustomer::new(
        first_name,
        last_name,
        date_of_birth,
        has_garden,
    ))?;
    println!("- {record}");
    Ok(record)
}

fn print_decision(customer: &CustomerRecord, pet_type: &str, decision: &AdoptionDecision) {
    match decision {
        AdoptionDecision::Approved { pet } => {
            println!("- {} adopts {pet_type} {pet}", customer.name())
        }
        AdoptionDecision::Denied { .. } => {
            println!("- {} / {pet_type}: {}", customer.name(), decision.summary())
        }
    }
}

fn print_availability(shelter: &ShelterManager) {
    println!(
        "Available: {} cat(s), {} dog(s)",
        shelter.no_of_available_pets("cat"),
        shelter.no_of_available_pets("dog")
    );
}
