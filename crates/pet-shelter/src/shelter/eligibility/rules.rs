use super::super::domain::{Pet, PetKind};
use super::config::EligibilityConfig;
use super::policy::RejectionReason;
use super::Applicant;

pub(crate) fn check_age(
    applicant: &Applicant,
    config: &EligibilityConfig,
) -> Result<(), RejectionReason> {
    if applicant.age < config.minimum_age {
        return Err(RejectionReason::Underage {
            required: config.minimum_age,
            actual: applicant.age,
        });
    }
    Ok(())
}

pub(crate) fn check_availability(requested: &str, available: usize) -> Result<(), RejectionReason> {
    if available == 0 {
        return Err(RejectionReason::NoneAvailable {
            requested: requested.trim().to_ascii_lowercase(),
        });
    }
    Ok(())
}

pub(crate) fn check_quota(
    applicant: &Applicant,
    config: &EligibilityConfig,
) -> Result<(), RejectionReason> {
    if applicant.adoptions >= config.adoption_quota {
        return Err(RejectionReason::QuotaReached {
            quota: config.adoption_quota,
        });
    }
    Ok(())
}

/// Available pets of `kind` the applicant may be offered. Below the untrained-dog age only
/// trained dogs are kept.
pub(crate) fn candidate_pool<'a, I>(
    kind: PetKind,
    applicant: &Applicant,
    config: &EligibilityConfig,
    available: I,
) -> Vec<&'a Pet>
where
    I: IntoIterator<Item = &'a Pet>,
{
    let trained_only =
        kind == PetKind::Dog && applicant.age < config.untrained_dog_minimum_age;

    available
        .into_iter()
        .filter(|pet| pet.kind() == kind && !pet.is_adopted())
        .filter(|pet| {
            !trained_only
                || pet
                    .as_trainable()
                    .map(|dog| dog.is_trained())
                    .unwrap_or(false)
        })
        .collect()
}

pub(crate) fn check_candidate(
    applicant: &Applicant,
    pet: &Pet,
    config: &EligibilityConfig,
) -> Result<(), RejectionReason> {
    match pet.as_trainable() {
        None => check_age(applicant, config),
        Some(_) if !applicant.has_garden => Err(RejectionReason::GardenRequired),
        Some(dog) if dog.is_trained() => check_age(applicant, config),
        Some(_) => {
            if applicant.age < config.untrained_dog_minimum_age {
                return Err(RejectionReason::TrainingRequired {
                    required_age: config.untrained_dog_minimum_age,
                    actual: applicant.age,
                });
            }
            Ok(())
        }
    }
}
