use std::collections::HashSet;

use chrono::NaiveDate;

use super::common::*;
use crate::shelter::ids::{CustomerNumberGenerator, IdentifierError, PetId, PetIdGenerator};

#[test]
fn pet_ids_follow_generation_order() {
    let mut generator = PetIdGenerator::default();
    assert_eq!(generator.last_issued(), None);

    let issued: Vec<String> = (0..102)
        .map(|_| generator.next_id().expect("id available").to_string())
        .collect();

    assert_eq!(issued[0], "A00");
    assert_eq!(issued[1], "A01");
    assert_eq!(issued[99], "A99");
    assert_eq!(issued[100], "B00");
    assert_eq!(issued[101], "B01");
    assert_eq!(generator.issued(), 102);
    assert_eq!(generator.last_issued(), Some(pet_id("B01")));
}

#[test]
fn pet_ids_never_repeat_and_exhaust_after_z99() {
    let mut generator = PetIdGenerator::default();
    let mut seen = HashSet::new();
    let mut previous: Option<PetId> = None;

    for _ in 0..2600 {
        let id = generator.next_id().expect("id available");
        assert!(seen.insert(id), "duplicate id {id}");
        if let Some(previous) = previous {
            assert!(previous < id, "{previous} should sort before {id}");
        }
        previous = Some(id);
    }

    assert_eq!(previous.map(|id| id.to_string()).as_deref(), Some("Z99"));
    assert_eq!(generator.next_id(), Err(IdentifierError::PetIdsExhausted));
    assert_eq!(generator.next_id(), Err(IdentifierError::PetIdsExhausted));
    assert_eq!(generator.issued(), 2600);
}

#[test]
fn pet_id_parses_components_and_serializes_as_string() {
    let id = pet_id("c07");
    assert_eq!(id.letter(), 'C');
    assert_eq!(id.number(), 7);
    assert_eq!(id.to_string(), "C07");

    let json = serde_json::to_string(&id).expect("serializes");
    assert_eq!(json, "\"C07\"");
    let parsed: PetId = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(parsed, id);

    assert!("7C0".parse::<PetId>().is_err());
    assert!("A100".parse::<PetId>().is_err());
    assert!("".parse::<PetId>().is_err());
}

#[test]
fn customer_number_encodes_initial_serial_month_and_year() {
    let mut generator = CustomerNumberGenerator::from_seed(Some(11));

    let december = generator
        .next_number("  Jan", today())
        .expect("number issued");
    assert_eq!(december.initial(), 'J');
    assert!(december.serial() < 100);
    assert_eq!(december.issue_component(), "122024");
    assert_eq!(
        december.to_string(),
        format!("J{}.122024", december.serial())
    );

    let january = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
    let number = generator.next_number("Jan", january).expect("number issued");
    assert_eq!(number.issue_component(), "12024");
    assert_eq!(number.serial_component(), format!("J{}", number.serial()));
}

#[test]
fn customer_numbers_for_same_name_and_date_are_unique_until_exhausted() {
    let mut generator = CustomerNumberGenerator::from_seed(Some(3));
    let mut seen = HashSet::new();

    for _ in 0..100 {
        let number = generator.next_number("Jan", today()).expect("serial left");
        assert!(generator.contains(&number));
        assert!(seen.insert(number.to_string()), "duplicate {number}");
    }

    match generator.next_number("Jan", today()) {
        Err(IdentifierError::CustomerNumbersExhausted { prefix }) => {
            assert_eq!(prefix, "J*.122024");
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }

    let other_initial = generator.next_number("Anna", today());
    assert!(other_initial.is_ok(), "other initials still have serials");
    assert_eq!(generator.issued(), 101);
}

#[test]
fn customer_number_requires_a_first_name() {
    let mut generator = CustomerNumberGenerator::from_seed(Some(1));
    assert_eq!(
        generator.next_number("   ", today()),
        Err(IdentifierError::MissingInitial)
    );
}
