use chrono::{Local, Months, NaiveDate};
use pet_shelter::config::ShelterConfig;
use pet_shelter::shelter::{FixedClock, SelectionStrategy, ShelterManager};

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_selection(raw: &str) -> Result<SelectionStrategy, String> {
    SelectionStrategy::parse(raw)
        .ok_or_else(|| format!("unknown selection '{raw}': expected random or lowest_id"))
}

/// Command line overrides layered on top of the environment configuration.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Overrides {
    pub(crate) today: Option<NaiveDate>,
    pub(crate) seed: Option<u64>,
    pub(crate) selection: Option<SelectionStrategy>,
}

/// Build a shelter pinned to one calendar day so every age and issue date in a run agrees.
pub(crate) fn build_shelter(
    mut config: ShelterConfig,
    overrides: Overrides,
) -> (ShelterManager, NaiveDate) {
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(selection) = overrides.selection {
        config.selection = selection;
    }
    let today = overrides
        .today
        .unwrap_or_else(|| Local::now().date_naive());

    (
        ShelterManager::new(config).with_clock(FixedClock(today)),
        today,
    )
}

/// Birth date `years` before `today`, falling back to `today` outside the calendar range.
pub(crate) fn born_years_before(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years * 12))
        .unwrap_or(today)
}
