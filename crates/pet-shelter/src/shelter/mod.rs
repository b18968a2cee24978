//! Shelter registry: pet identifiers, customer records and the adoption workflow.
//!
//! `ShelterManager` owns all mutable state. Identifier generation, storage and the
//! eligibility rules live in their own modules so each can be exercised in isolation.

pub mod clock;
pub mod domain;
pub mod eligibility;
pub mod ids;
pub mod registry;
pub mod roster;
pub mod selection;
pub mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{
    age_on, Cat, CustomerIdentity, CustomerName, CustomerRecord, Dog, NewCustomer, Pet, PetKind,
    Trainable,
};
pub use eligibility::{
    AdoptionDecision, Applicant, EligibilityConfig, EligibilityEngine, RejectionReason,
};
pub use ids::{
    CustomerNumber, CustomerNumberGenerator, IdentifierError, PetId, PetIdGenerator,
    PetIdParseError,
};
pub use registry::{CustomerRegistry, PetRegistry, Registry, RegistryError};
pub use roster::{RosterEntry, RosterImportError, RosterImporter};
pub use selection::{CandidateSelector, LowestIdSelector, RandomSelector, SelectionStrategy};
pub use service::{AdoptedPets, ErrorKind, ShelterError, ShelterManager};
