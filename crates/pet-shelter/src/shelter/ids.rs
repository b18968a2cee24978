use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

const FIRST_LETTER: u8 = b'A';
const LAST_LETTER: u8 = b'Z';
const MAX_PET_NUMBER: u8 = 99;
const SERIAL_SPACE: u8 = 100;

/// Shelter-wide pet identifier: one letter `A`-`Z` followed by a two digit number.
///
/// Ordering follows generation order (`A00 < A01 < ... < A99 < B00`), which is also the
/// lexical order of the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PetId {
    letter: u8,
    number: u8,
}

impl PetId {
    pub fn letter(self) -> char {
        char::from(self.letter)
    }

    pub fn number(self) -> u8 {
        self.number
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.letter(), self.number)
    }
}

impl FromStr for PetId {
    type Err = PetIdParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 3 {
            return Err(PetIdParseError(raw.to_string()));
        }

        let letter = bytes[0].to_ascii_uppercase();
        if !letter.is_ascii_uppercase() || !bytes[1..].iter().all(u8::is_ascii_digit) {
            return Err(PetIdParseError(raw.to_string()));
        }

        let number = (bytes[1] - b'0') * 10 + (bytes[2] - b'0');
        Ok(Self { letter, number })
    }
}

impl TryFrom<String> for PetId {
    type Error = PetIdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PetId> for String {
    fn from(value: PetId) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pet id '{0}': expected a letter A-Z followed by two digits")]
pub struct PetIdParseError(String);

/// Monotonic generator for [`PetId`] values.
///
/// The counter starts "before" `A00`; every call advances it by one, rolling the letter over
/// after `99`. Once `Z99` has been issued the generator is exhausted and keeps failing.
#[derive(Debug, Clone)]
pub struct PetIdGenerator {
    letter: u8,
    counter: Option<u8>,
}

impl Default for PetIdGenerator {
    fn default() -> Self {
        Self {
            letter: FIRST_LETTER,
            counter: None,
        }
    }
}

impl PetIdGenerator {
    pub fn next_id(&mut self) -> Result<PetId, IdentifierError> {
        let (letter, number) = match self.counter {
            None => (self.letter, 0),
            Some(MAX_PET_NUMBER) if self.letter == LAST_LETTER => {
                return Err(IdentifierError::PetIdsExhausted)
            }
            Some(MAX_PET_NUMBER) => (self.letter + 1, 0),
            Some(current) => (self.letter, current + 1),
        };

        self.letter = letter;
        self.counter = Some(number);
        Ok(PetId { letter, number })
    }

    pub fn last_issued(&self) -> Option<PetId> {
        self.counter.map(|number| PetId {
            letter: self.letter,
            number,
        })
    }

    pub fn issued(&self) -> usize {
        self.counter.map_or(0, |number| {
            usize::from(self.letter - FIRST_LETTER) * usize::from(SERIAL_SPACE)
                + usize::from(number)
                + 1
        })
    }
}

/// Customer number of the form `{initial}{serial}.{month}{year}`, e.g. `J10.12024`.
///
/// The month is 1-indexed without zero padding, so `12024` reads as January 2024 and
/// `122024` as December 2024.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct CustomerNumber {
    initial: char,
    serial: u8,
    issue_month: u32,
    issue_year: i32,
}

impl CustomerNumber {
    pub fn initial(&self) -> char {
        self.initial
    }

    pub fn serial(&self) -> u8 {
        self.serial
    }

    /// First component: initial followed by the serial (`J10`).
    pub fn serial_component(&self) -> String {
        format!("{}{}", self.initial, self.serial)
    }

    /// Second component: issue month followed by the four digit year (`12024`).
    pub fn issue_component(&self) -> String {
        format!("{}{}", self.issue_month, self.issue_year)
    }

    fn shares_prefix(&self, initial: char, month: u32, year: i32) -> bool {
        self.initial == initial && self.issue_month == month && self.issue_year == year
    }
}

impl fmt::Display for CustomerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}",
            self.serial_component(),
            self.issue_component()
        )
    }
}

impl From<CustomerNumber> for String {
    fn from(value: CustomerNumber) -> Self {
        value.to_string()
    }
}

/// Draws customer numbers with a random serial, redrawing until the number is unused.
#[derive(Debug)]
pub struct CustomerNumberGenerator {
    rng: StdRng,
    issued: HashSet<CustomerNumber>,
}

impl CustomerNumberGenerator {
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng)
    }

    pub fn next_number(
        &mut self,
        first_name: &str,
        issued_on: NaiveDate,
    ) -> Result<CustomerNumber, IdentifierError> {
        let initial = first_name
            .trim()
            .chars()
            .next()
            .ok_or(IdentifierError::MissingInitial)?;
        let issue_month = issued_on.month();
        let issue_year = issued_on.year();

        let used = self
            .issued
            .iter()
            .filter(|number| number.shares_prefix(initial, issue_month, issue_year))
            .count();
        if used >= usize::from(SERIAL_SPACE) {
            return Err(IdentifierError::CustomerNumbersExhausted {
                prefix: format!("{initial}*.{issue_month}{issue_year}"),
            });
        }

        loop {
            let candidate = CustomerNumber {
                initial,
                serial: self.rng.random_range(0..SERIAL_SPACE),
                issue_month,
                issue_year,
            };
            if self.issued.insert(candidate.clone()) {
                return Ok(candidate);
            }
            debug!(customer_number = %candidate, "customer number already issued, redrawing serial");
        }
    }

    pub fn contains(&self, number: &CustomerNumber) -> bool {
        self.issued.contains(number)
    }

    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("pet identifier space exhausted: no identifiers remain after Z99")]
    PetIdsExhausted,
    #[error("customer numbers exhausted for {prefix}: all 100 serials are in use")]
    CustomerNumbersExhausted { prefix: String },
    #[error("a first name is required to derive a customer number")]
    MissingInitial,
}
