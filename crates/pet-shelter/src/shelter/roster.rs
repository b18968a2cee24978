use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::domain::NewCustomer;

/// One roster line: a customer to register and the pet type they asked for, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub line: u64,
    pub customer: NewCustomer,
    pub requested_pet: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster line {line}: invalid {field} '{value}'")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },
}

/// CSV roster reader. Expected headers:
/// `first_name,last_name,date_of_birth,has_garden,requested_pet`.
///
/// Blank cells are kept as absent values so record creation reports them.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RosterEntry>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RosterEntry>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut entries = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |position| position.line());
            let row: RosterRow = record.deserialize(Some(&headers))?;
            entries.push(row.into_entry(line)?);
        }

        Ok(entries)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    first_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_garden: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    requested_pet: Option<String>,
}

impl RosterRow {
    fn into_entry(self, line: u64) -> Result<RosterEntry, RosterImportError> {
        let date_of_birth = self
            .date_of_birth
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                    RosterImportError::InvalidField {
                        line,
                        field: "date_of_birth",
                        value: raw.clone(),
                    }
                })
            })
            .transpose()?;

        let has_garden = self
            .has_garden
            .map(|raw| {
                parse_flag(&raw).ok_or(RosterImportError::InvalidField {
                    line,
                    field: "has_garden",
                    value: raw.clone(),
                })
            })
            .transpose()?;

        Ok(RosterEntry {
            line,
            customer: NewCustomer {
                first_name: self.first_name,
                last_name: self.last_name,
                date_of_birth,
                has_garden,
            },
            requested_pet: self.requested_pet,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
