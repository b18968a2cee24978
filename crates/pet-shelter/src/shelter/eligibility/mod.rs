mod config;
mod policy;
mod rules;

pub use config::EligibilityConfig;
pub use policy::{AdoptionDecision, RejectionReason};

use super::domain::{Pet, PetKind};
use super::selection::CandidateSelector;

/// Customer attributes the rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applicant {
    pub age: i32,
    pub has_garden: bool,
    pub adoptions: usize,
}

/// Stateless evaluator applying the adoption rules in order, stopping at the first failure:
/// minimum age, availability of the requested type, adoption quota, then the species check
/// against one candidate drawn from the pool.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Customer-level rules: age, availability and quota.
    pub fn screen(
        &self,
        applicant: &Applicant,
        requested: &str,
        available_of_type: usize,
    ) -> Result<(), RejectionReason> {
        rules::check_age(applicant, &self.config)?;
        rules::check_availability(requested, available_of_type)?;
        rules::check_quota(applicant, &self.config)
    }

    pub fn candidate_pool<'a, I>(&self, kind: PetKind, applicant: &Applicant, available: I) -> Vec<&'a Pet>
    where
        I: IntoIterator<Item = &'a Pet>,
    {
        rules::candidate_pool(kind, applicant, &self.config, available)
    }

    /// Species check against one specific pet.
    pub fn assess(&self, applicant: &Applicant, pet: &Pet) -> Result<(), RejectionReason> {
        rules::check_candidate(applicant, pet, &self.config)
    }

    pub fn evaluate(
        &self,
        applicant: &Applicant,
        requested: &str,
        available: &[&Pet],
        selector: &mut dyn CandidateSelector,
    ) -> AdoptionDecision {
        let kind = PetKind::parse(requested);
        let available_of_type = kind.map_or(0, |kind| {
            available
                .iter()
                .filter(|pet| pet.kind() == kind && !pet.is_adopted())
                .count()
        });

        if let Err(reason) = self.screen(applicant, requested, available_of_type) {
            return reason.into();
        }

        let Some(kind) = kind else {
            return RejectionReason::NoneAvailable {
                requested: requested.trim().to_ascii_lowercase(),
            }
            .into();
        };

        let pool = self.candidate_pool(kind, applicant, available.iter().copied());
        if pool.is_empty() {
            return match kind {
                PetKind::Dog => RejectionReason::NoEligibleDogs { age: applicant.age },
                PetKind::Cat => RejectionReason::NoneAvailable {
                    requested: "cat".to_string(),
                },
            }
            .into();
        }

        let candidate = selector
            .choose(&pool)
            .and_then(|id| pool.iter().find(|pet| pet.id() == id).copied());
        let Some(candidate) = candidate else {
            return RejectionReason::NoneAvailable {
                requested: kind.label().to_ascii_lowercase(),
            }
            .into();
        };

        match self.assess(applicant, candidate) {
            Ok(()) => AdoptionDecision::Approved {
                pet: candidate.id(),
            },
            Err(reason) => reason.into(),
        }
    }
}
