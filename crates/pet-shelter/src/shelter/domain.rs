use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::{CustomerNumber, PetId};

/// Species the shelter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetKind {
    Cat,
    Dog,
}

impl PetKind {
    pub const fn ordered() -> [Self; 2] {
        [Self::Cat, Self::Dog]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cat => "Cat",
            Self::Dog => "Dog",
        }
    }

    pub const fn care_instructions(self) -> &'static str {
        match self {
            Self::Cat => "Feed two times a day.",
            Self::Dog => "Feed three times a day, walk once a day.",
        }
    }

    /// Case-insensitive lookup of a requested pet type (`"cat"`, `"CaT"`, `"dog"`).
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
    }
}

/// Capability exposed by pets that can be trained.
pub trait Trainable {
    fn is_trained(&self) -> bool;

    fn set_trained(&mut self, trained: bool);

    fn training_label(&self) -> &'static str {
        if self.is_trained() {
            "trained"
        } else {
            "not trained"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cat {
    id: PetId,
    adopted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dog {
    id: PetId,
    adopted: bool,
    trained: bool,
}

impl Trainable for Dog {
    fn is_trained(&self) -> bool {
        self.trained
    }

    fn set_trained(&mut self, trained: bool) {
        self.trained = trained;
    }
}

/// A registered animal. Adoption is one-way: once adopted a pet never returns to the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pet {
    Cat(Cat),
    Dog(Dog),
}

impl Pet {
    pub(crate) fn new(kind: PetKind, id: PetId) -> Self {
        match kind {
            PetKind::Cat => Self::Cat(Cat { id, adopted: false }),
            PetKind::Dog => Self::Dog(Dog {
                id,
                adopted: false,
                trained: false,
            }),
        }
    }

    pub fn id(&self) -> PetId {
        match self {
            Self::Cat(cat) => cat.id,
            Self::Dog(dog) => dog.id,
        }
    }

    pub fn kind(&self) -> PetKind {
        match self {
            Self::Cat(_) => PetKind::Cat,
            Self::Dog(_) => PetKind::Dog,
        }
    }

    pub fn is_adopted(&self) -> bool {
        match self {
            Self::Cat(cat) => cat.adopted,
            Self::Dog(dog) => dog.adopted,
        }
    }

    pub fn adoption_label(&self) -> &'static str {
        if self.is_adopted() {
            "adopted"
        } else {
            "not adopted"
        }
    }

    pub fn care_instructions(&self) -> &'static str {
        self.kind().care_instructions()
    }

    pub fn as_trainable(&self) -> Option<&dyn Trainable> {
        match self {
            Self::Cat(_) => None,
            Self::Dog(dog) => Some(dog),
        }
    }

    pub fn as_trainable_mut(&mut self) -> Option<&mut dyn Trainable> {
        match self {
            Self::Cat(_) => None,
            Self::Dog(dog) => Some(dog),
        }
    }

    pub(crate) fn mark_adopted(&mut self) {
        match self {
            Self::Cat(cat) => cat.adopted = true,
            Self::Dog(dog) => dog.adopted = true,
        }
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pet ID: {} Pet type: {} Adoption status: {} Care instructions: {}",
            self.id(),
            self.kind().label(),
            self.adoption_label(),
            self.care_instructions()
        )?;
        if let Some(dog) = self.as_trainable() {
            write!(f, " Training status: {}", dog.training_label())?;
        }
        Ok(())
    }
}

/// Customer name with surrounding whitespace removed from both parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CustomerName {
    first: String,
    last: String,
}

impl CustomerName {
    pub fn new(first: &str, last: &str) -> Self {
        Self {
            first: first.trim().to_string(),
            last: last.trim().to_string(),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn last(&self) -> &str {
        &self.last
    }
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

/// Logical identity of a person: two records with the same name and date of birth
/// describe the same customer, whatever number they were issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomerIdentity {
    pub name: CustomerName,
    pub date_of_birth: NaiveDate,
}

/// Intake payload for a new customer. Every field is required; absent or blank values are
/// rejected when the record is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewCustomer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub has_garden: Option<bool>,
}

impl NewCustomer {
    pub fn new(first_name: &str, last_name: &str, date_of_birth: NaiveDate, has_garden: bool) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            date_of_birth: Some(date_of_birth),
            has_garden: Some(has_garden),
        }
    }
}

/// Registered customer. Immutable once issued.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerRecord {
    name: CustomerName,
    date_of_birth: NaiveDate,
    customer_number: CustomerNumber,
    issued_on: NaiveDate,
    has_garden: bool,
}

impl CustomerRecord {
    pub(crate) fn new(
        name: CustomerName,
        date_of_birth: NaiveDate,
        customer_number: CustomerNumber,
        issued_on: NaiveDate,
        has_garden: bool,
    ) -> Self {
        Self {
            name,
            date_of_birth,
            customer_number,
            issued_on,
            has_garden,
        }
    }

    pub fn name(&self) -> &CustomerName {
        &self.name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn customer_number(&self) -> &CustomerNumber {
        &self.customer_number
    }

    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    pub fn has_garden(&self) -> bool {
        self.has_garden
    }

    pub fn garden_label(&self) -> &'static str {
        if self.has_garden {
            "yes"
        } else {
            "no"
        }
    }

    pub fn identity(&self) -> CustomerIdentity {
        CustomerIdentity {
            name: self.name.clone(),
            date_of_birth: self.date_of_birth,
        }
    }

    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.date_of_birth, today)
    }
}

/// Records compare by logical identity, not by customer number.
impl PartialEq for CustomerRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.date_of_birth == other.date_of_birth
    }
}

impl Eq for CustomerRecord {}

impl fmt::Display for CustomerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer name: {} Date of birth: {} Customer number: {} Date of record issue: {} Has Garden: {}",
            self.name,
            self.date_of_birth,
            self.customer_number,
            self.issued_on,
            self.garden_label()
        )
    }
}

/// Whole years between `date_of_birth` and `today`, dropping one year while the birthday's
/// day-of-year has not been reached.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if today.ordinal() < date_of_birth.ordinal() {
        age -= 1;
    }
    age
}
