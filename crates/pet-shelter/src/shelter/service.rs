use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::ShelterConfig;

use super::clock::{Clock, SystemClock};
use super::domain::{CustomerIdentity, CustomerName, CustomerRecord, NewCustomer, Pet, PetKind};
use super::eligibility::{AdoptionDecision, Applicant, EligibilityEngine};
use super::ids::{CustomerNumber, CustomerNumberGenerator, IdentifierError, PetId, PetIdGenerator};
use super::registry::{CustomerRegistry, PetRegistry, RegistryError};
use super::selection::CandidateSelector;

/// Shelter context owning the identifier generators, registries and adoption history.
///
/// Every operation runs to completion against this single owner; an adoption either
/// applies all of its mutations or none.
pub struct ShelterManager {
    pet_ids: PetIdGenerator,
    customer_numbers: CustomerNumberGenerator,
    pets: PetRegistry,
    customers: CustomerRegistry,
    available: Vec<PetId>,
    adoptions: HashMap<CustomerNumber, Vec<PetId>>,
    engine: EligibilityEngine,
    selector: Box<dyn CandidateSelector>,
    clock: Box<dyn Clock>,
}

impl Default for ShelterManager {
    fn default() -> Self {
        Self::new(ShelterConfig::default())
    }
}

impl ShelterManager {
    pub fn new(config: ShelterConfig) -> Self {
        let ShelterConfig {
            selection,
            seed,
            eligibility,
        } = config;

        Self {
            pet_ids: PetIdGenerator::default(),
            customer_numbers: CustomerNumberGenerator::from_seed(seed),
            pets: PetRegistry::default(),
            customers: CustomerRegistry::default(),
            available: Vec::new(),
            adoptions: HashMap::new(),
            engine: EligibilityEngine::new(eligibility),
            selector: selection.build(seed),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_selector(mut self, selector: impl CandidateSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn eligibility(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Register a new cat or dog (type is case-insensitive) under a fresh identifier.
    pub fn add_pet(&mut self, pet_type: &str) -> Result<Pet, ShelterError> {
        let kind = PetKind::parse(pet_type)
            .ok_or_else(|| ShelterError::InvalidPetType(pet_type.to_string()))?;
        let id = self.pet_ids.next_id()?;

        let (stored, _) = self.pets.insert_if_absent(id, Pet::new(kind, id));
        let pet = stored.clone();
        self.refresh_available();

        info!(pet_id = %id, kind = kind.label(), "pet registered");
        Ok(pet)
    }

    /// Set the training flag of a registered dog. Returns whether the stored record now
    /// carries the requested value.
    pub fn update_pet_record(
        &mut self,
        pet_id: Option<&PetId>,
        trained: bool,
    ) -> Result<bool, ShelterError> {
        let id = *pet_id.ok_or(ShelterError::MissingPetId)?;
        let pet = self.pets.get_mut(&id).ok_or(ShelterError::PetNotFound(id))?;
        let dog = pet
            .as_trainable_mut()
            .ok_or(ShelterError::NotTrainable(id))?;
        dog.set_trained(trained);

        let applied = self
            .pets
            .get(&id)
            .and_then(Pet::as_trainable)
            .map(|dog| dog.is_trained() == trained)
            .unwrap_or(false);
        self.refresh_available();

        info!(pet_id = %id, trained, "pet training status updated");
        Ok(applied)
    }

    /// Count of unadopted pets of the given type; unknown types count zero.
    pub fn no_of_available_pets(&self, pet_type: &str) -> usize {
        match PetKind::parse(pet_type) {
            Some(kind) => self
                .available_pets()
                .filter(|pet| pet.kind() == kind)
                .count(),
            None => 0,
        }
    }

    pub fn add_customer_record(
        &mut self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, ShelterError> {
        let first_name = required_text(customer.first_name, "first name")?;
        let last_name = required_text(customer.last_name, "last name")?;
        let date_of_birth = customer
            .date_of_birth
            .ok_or(ShelterError::MissingField("date of birth"))?;
        let has_garden = customer
            .has_garden
            .ok_or(ShelterError::MissingField("garden ownership"))?;

        let name = CustomerName::new(&first_name, &last_name);
        self.customers.ensure_unique(&CustomerIdentity {
            name: name.clone(),
            date_of_birth,
        })?;

        let issued_on = self.clock.today();
        let number = self.customer_numbers.next_number(name.first(), issued_on)?;
        let record = CustomerRecord::new(name, date_of_birth, number, issued_on, has_garden);
        let stored = self.customers.insert(record)?.clone();

        info!(
            customer_number = %stored.customer_number(),
            has_garden,
            "customer record registered"
        );
        Ok(stored)
    }

    /// Run the eligibility rules for `customer` and, when approved, hand over the chosen pet.
    /// A denial leaves every registry and view untouched.
    pub fn adopt_pet(&mut self, customer: &CustomerRecord, pet_type: &str) -> AdoptionDecision {
        let number = customer.customer_number();
        let applicant = Applicant {
            age: customer.age_on(self.clock.today()),
            has_garden: customer.has_garden(),
            adoptions: self.adoptions.get(number).map_or(0, Vec::len),
        };

        let pets = &self.pets;
        let available: Vec<&Pet> = self
            .available
            .iter()
            .filter_map(|id| pets.get(id))
            .collect();
        let decision =
            self.engine
                .evaluate(&applicant, pet_type, &available, self.selector.as_mut());

        match &decision {
            AdoptionDecision::Approved { pet } => {
                self.record_adoption(number, *pet);
                info!(
                    customer_number = %number,
                    pet_id = %pet,
                    requested = pet_type,
                    "adoption completed"
                );
            }
            AdoptionDecision::Denied { reason } => {
                debug!(
                    customer_number = %number,
                    requested = pet_type,
                    reason = %reason.summary(),
                    "adoption denied"
                );
            }
        }

        decision
    }

    /// Read-only view over the pets adopted by a customer, empty when there are none.
    pub fn adopted_pets_by_customer(&self, customer_number: &CustomerNumber) -> AdoptedPets<'_> {
        let ids = self
            .adoptions
            .get(customer_number)
            .map_or(&[][..], Vec::as_slice);
        AdoptedPets {
            ids,
            pets: &self.pets,
        }
    }

    pub fn pet(&self, id: &PetId) -> Option<&Pet> {
        self.pets.get(id)
    }

    /// Every registered pet, in identifier order.
    pub fn pets(&self) -> impl Iterator<Item = &Pet> {
        self.pets.values()
    }

    /// Unadopted pets, in identifier order.
    pub fn available_pets(&self) -> impl Iterator<Item = &Pet> {
        let pets = &self.pets;
        self.available.iter().filter_map(move |id| pets.get(id))
    }

    pub fn customer(&self, number: &CustomerNumber) -> Option<&CustomerRecord> {
        self.customers.get(number)
    }

    pub fn customers(&self) -> impl Iterator<Item = &CustomerRecord> {
        self.customers.values()
    }

    fn record_adoption(&mut self, number: &CustomerNumber, pet_id: PetId) {
        if let Some(pet) = self.pets.get_mut(&pet_id) {
            pet.mark_adopted();
        }
        self.adoptions
            .entry(number.clone())
            .or_default()
            .push(pet_id);
        self.refresh_available();
    }

    fn refresh_available(&mut self) {
        self.available = self
            .pets
            .values()
            .filter(|pet| !pet.is_adopted())
            .map(Pet::id)
            .collect();
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ShelterError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or(ShelterError::MissingField(field))
}

/// Borrowed, read-only adoption history of one customer, in adoption order.
#[derive(Debug, Clone, Copy)]
pub struct AdoptedPets<'a> {
    ids: &'a [PetId],
    pets: &'a PetRegistry,
}

impl<'a> AdoptedPets<'a> {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &'a [PetId] {
        self.ids
    }

    pub fn contains(&self, id: &PetId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Pet> + 'a {
        let pets = self.pets;
        self.ids.iter().filter_map(move |id| pets.get(id))
    }
}

/// Classification of shelter errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    MissingValue,
    DuplicateEntity,
    Exhaustion,
}

/// Error raised by the shelter manager for structural or input failures.
#[derive(Debug, thiserror::Error)]
pub enum ShelterError {
    #[error("invalid pet type '{0}': expected cat or dog; pet was not added")]
    InvalidPetType(String),
    #[error("pet {0} could not be found in the shelter register")]
    PetNotFound(PetId),
    #[error("pet {0} is not a dog and cannot be trained")]
    NotTrainable(PetId),
    #[error("{0} is required to create a customer record")]
    MissingField(&'static str),
    #[error("a pet id is required to update a pet record")]
    MissingPetId,
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
}

impl ShelterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShelterError::InvalidPetType(_)
            | ShelterError::PetNotFound(_)
            | ShelterError::NotTrainable(_)
            | ShelterError::MissingField(_)
            | ShelterError::Identifier(IdentifierError::MissingInitial) => {
                ErrorKind::InvalidArgument
            }
            ShelterError::MissingPetId => ErrorKind::MissingValue,
            ShelterError::Registry(_) => ErrorKind::DuplicateEntity,
            ShelterError::Identifier(_) => ErrorKind::Exhaustion,
        }
    }
}
