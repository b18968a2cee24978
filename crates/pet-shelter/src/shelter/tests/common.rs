use chrono::{Months, NaiveDate};

use crate::config::ShelterConfig;
use crate::shelter::domain::{CustomerRecord, NewCustomer, Pet, PetKind};
use crate::shelter::eligibility::{Applicant, EligibilityConfig, EligibilityEngine};
use crate::shelter::ids::PetId;
use crate::shelter::{FixedClock, SelectionStrategy, ShelterManager};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 2).expect("valid date")
}

/// Date of birth giving exactly `years` of age on [`today`].
pub(super) fn born_years_ago(years: u32) -> NaiveDate {
    today()
        .checked_sub_months(Months::new(years * 12))
        .expect("valid date of birth")
}

pub(super) fn shelter_config() -> ShelterConfig {
    ShelterConfig {
        selection: SelectionStrategy::LowestId,
        seed: Some(7),
        eligibility: EligibilityConfig::default(),
    }
}

pub(super) fn shelter() -> ShelterManager {
    ShelterManager::new(shelter_config()).with_clock(FixedClock(today()))
}

pub(super) fn register(
    shelter: &mut ShelterManager,
    first_name: &str,
    last_name: &str,
    age: u32,
    has_garden: bool,
) -> CustomerRecord {
    shelter
        .add_customer_record(NewCustomer::new(
            first_name,
            last_name,
            born_years_ago(age),
            has_garden,
        ))
        .expect("customer registers")
}

pub(super) fn add_trained_dog(shelter: &mut ShelterManager) -> PetId {
    let id = shelter.add_pet("dog").expect("dog added").id();
    let applied = shelter
        .update_pet_record(Some(&id), true)
        .expect("dog can be trained");
    assert!(applied);
    id
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityConfig::default())
}

pub(super) fn applicant(age: i32, has_garden: bool, adoptions: usize) -> Applicant {
    Applicant {
        age,
        has_garden,
        adoptions,
    }
}

pub(super) fn pet_id(raw: &str) -> PetId {
    raw.parse().expect("valid pet id")
}

pub(super) fn cat(raw: &str) -> Pet {
    Pet::new(PetKind::Cat, pet_id(raw))
}

pub(super) fn dog(raw: &str, trained: bool) -> Pet {
    let mut pet = Pet::new(PetKind::Dog, pet_id(raw));
    if let Some(dog) = pet.as_trainable_mut() {
        dog.set_trained(trained);
    }
    pet
}
