use chrono::NaiveDate;
use pet_shelter::config::ShelterConfig;
use pet_shelter::shelter::{
    AdoptionDecision, CandidateSelector, EligibilityConfig, ErrorKind, FixedClock, NewCustomer,
    Pet, PetId, RejectionReason, SelectionStrategy, ShelterManager,
};
use serde_json::json;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 2).expect("valid date")
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn manager(selection: SelectionStrategy, seed: Option<u64>) -> ShelterManager {
    ShelterManager::new(ShelterConfig {
        selection,
        seed,
        eligibility: EligibilityConfig::default(),
    })
    .with_clock(FixedClock(today()))
}

/// Offers the highest identifier in the pool.
struct NewestFirst;

impl CandidateSelector for NewestFirst {
    fn choose(&mut self, pool: &[&Pet]) -> Option<PetId> {
        pool.iter().map(|pet| pet.id()).max()
    }
}

#[test]
fn shelter_day_from_intake_to_adoption_history() {
    let mut shelter = manager(SelectionStrategy::LowestId, Some(11));

    let cat = shelter.add_pet("Cat").expect("cat added").id();
    let untrained = shelter.add_pet("DOG").expect("dog added").id();
    let trained = shelter.add_pet("dog").expect("dog added").id();
    assert!(shelter
        .update_pet_record(Some(&trained), true)
        .expect("dog trained"));
    assert_eq!(shelter.no_of_available_pets("dog"), 2);

    let jan = shelter
        .add_customer_record(NewCustomer::new("Jan", "Kowalski", date(1990, 2, 20), true))
        .expect("jan registers");
    let ola = shelter
        .add_customer_record(NewCustomer::new("Ola", "Lis", date(2004, 5, 1), true))
        .expect("ola registers");

    let duplicate = shelter
        .add_customer_record(NewCustomer::new("Jan", "Kowalski", date(1990, 2, 20), false))
        .expect_err("duplicate rejected");
    assert_eq!(duplicate.kind(), ErrorKind::DuplicateEntity);

    let for_ola = shelter.adopt_pet(&ola, "dog");
    assert_eq!(for_ola, AdoptionDecision::Approved { pet: trained });

    let for_jan = shelter.adopt_pet(&jan, "dog");
    assert_eq!(for_jan, AdoptionDecision::Approved { pet: untrained });
    assert!(shelter.adopt_pet(&jan, "cat").is_approved());

    assert_eq!(shelter.no_of_available_pets("dog"), 0);
    assert_eq!(shelter.no_of_available_pets("cat"), 0);

    let history = shelter.adopted_pets_by_customer(jan.customer_number());
    assert_eq!(history.ids(), &[untrained, cat]);
    let rendered: Vec<String> = history.iter().map(ToString::to_string).collect();
    assert!(rendered[0].contains("Adoption status: adopted"));
    assert!(rendered[0].ends_with("Training status: not trained"));

    let late = shelter.adopt_pet(&ola, "cat");
    assert_eq!(
        late.summary(),
        "adoption unsuccessful: there are no cats available"
    );
}

#[test]
fn custom_selector_decides_which_pet_is_offered() {
    let mut shelter = manager(SelectionStrategy::LowestId, Some(3)).with_selector(NewestFirst);
    shelter.add_pet("cat").expect("cat added");
    let newest = shelter.add_pet("cat").expect("cat added").id();
    let customer = shelter
        .add_customer_record(NewCustomer::new("Ala", "Kot", date(1980, 1, 1), false))
        .expect("customer registers");

    assert_eq!(shelter.adopt_pet(&customer, "cat").adopted_pet(), Some(newest));
}

#[test]
fn seeded_shelters_replay_identically() {
    let run = |seed| {
        let mut shelter = manager(SelectionStrategy::Random, Some(seed));
        for _ in 0..6 {
            shelter.add_pet("cat").expect("cat added");
        }
        let customer = shelter
            .add_customer_record(NewCustomer::new("Jan", "Kowalski", date(1990, 2, 20), false))
            .expect("customer registers");
        let adopted: Vec<Option<PetId>> = (0..3)
            .map(|_| shelter.adopt_pet(&customer, "cat").adopted_pet())
            .collect();
        (customer.customer_number().to_string(), adopted)
    };

    let first = run(2024);
    let second = run(2024);
    assert_eq!(first, second);
    assert!(first.1.iter().all(Option::is_some));
}

#[test]
fn decisions_serialise_with_their_rule() {
    let mut shelter = manager(SelectionStrategy::LowestId, None);
    let dog = shelter.add_pet("dog").expect("dog added").id();
    shelter
        .update_pet_record(Some(&dog), true)
        .expect("dog trained");
    let customer = shelter
        .add_customer_record(NewCustomer::new("Piotr", "Flat", date(1970, 10, 10), false))
        .expect("customer registers");

    let denied = shelter.adopt_pet(&customer, "dog");
    assert_eq!(denied.rejection(), Some(&RejectionReason::GardenRequired));
    assert_eq!(
        serde_json::to_value(&denied).expect("decision serialises"),
        json!({ "decision": "denied", "reason": { "rule": "garden_required" } })
    );

    let approved = AdoptionDecision::Approved { pet: dog };
    assert_eq!(
        serde_json::to_value(&approved).expect("decision serialises"),
        json!({ "decision": "approved", "pet": "A00" })
    );
}

#[test]
fn configured_thresholds_replace_the_defaults() {
    let mut shelter = ShelterManager::new(ShelterConfig {
        selection: SelectionStrategy::LowestId,
        seed: Some(1),
        eligibility: EligibilityConfig {
            minimum_age: 16,
            untrained_dog_minimum_age: 21,
            adoption_quota: 1,
        },
    })
    .with_clock(FixedClock(today()));
    shelter.add_pet("cat").expect("cat added");
    shelter.add_pet("cat").expect("cat added");

    let teen = shelter
        .add_customer_record(NewCustomer::new("Tom", "Young", date(2007, 6, 1), false))
        .expect("customer registers");

    assert!(shelter.adopt_pet(&teen, "cat").is_approved());
    assert_eq!(
        shelter.adopt_pet(&teen, "cat").rejection(),
        Some(&RejectionReason::QuotaReached { quota: 1 })
    );
}
