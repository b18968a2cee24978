use serde::Serialize;

use super::super::ids::PetId;

/// Outcome of an adoption request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AdoptionDecision {
    Approved { pet: PetId },
    Denied { reason: RejectionReason },
}

impl AdoptionDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, AdoptionDecision::Approved { .. })
    }

    pub fn adopted_pet(&self) -> Option<PetId> {
        match self {
            AdoptionDecision::Approved { pet } => Some(*pet),
            AdoptionDecision::Denied { .. } => None,
        }
    }

    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            AdoptionDecision::Approved { .. } => None,
            AdoptionDecision::Denied { reason } => Some(reason),
        }
    }

    pub fn summary(&self) -> String {
        match self {
            AdoptionDecision::Approved { pet } => format!("adoption approved for pet {pet}"),
            AdoptionDecision::Denied { reason } => {
                format!("adoption unsuccessful: {}", reason.summary())
            }
        }
    }
}

impl From<RejectionReason> for AdoptionDecision {
    fn from(reason: RejectionReason) -> Self {
        AdoptionDecision::Denied { reason }
    }
}

/// Eligibility rule that stopped an adoption, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RejectionReason {
    Underage { required: i32, actual: i32 },
    NoneAvailable { requested: String },
    QuotaReached { quota: usize },
    NoEligibleDogs { age: i32 },
    GardenRequired,
    TrainingRequired { required_age: i32, actual: i32 },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::Underage { required, actual } => format!(
                "customer needs to be at least {required} years old (currently {actual})"
            ),
            RejectionReason::NoneAvailable { requested } => {
                format!("there are no {requested}s available")
            }
            RejectionReason::QuotaReached { quota } => {
                format!("customer cannot adopt more than {quota} pets (of all types)")
            }
            RejectionReason::NoEligibleDogs { age } => format!(
                "there are no dogs available for a customer aged {age}; only trained dogs qualify"
            ),
            RejectionReason::GardenRequired => {
                "customer needs to have a garden to adopt a dog".to_string()
            }
            RejectionReason::TrainingRequired {
                required_age,
                actual,
            } => format!(
                "untrained dogs require a customer aged at least {required_age} (currently {actual})"
            ),
        }
    }
}
