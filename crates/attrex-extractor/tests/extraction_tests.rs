//! Extraction Integration Tests
//!
//! Exercises the public extractor API end to end: the documented product
//! name examples, the dosage precedence rule, and property tests for
//! determinism, totality and parallel batch ordering.

use attrex_core::{AttrexError, AttributeRecord};
use attrex_extractor::{
    extract_batch, extract_batch_parallel, AttributeExtractor, MultilingualExtractor,
};
use proptest::prelude::*;

fn extractor() -> MultilingualExtractor {
    MultilingualExtractor::new().expect("built-in vocabulary compiles")
}

fn extract(name: &str) -> AttributeRecord {
    extractor().extract(name).unwrap()
}

// =============================================================================
// Documented Examples
// =============================================================================

#[test]
fn test_multiplicative_precedence() {
    let record = extract("3x3.5g Probe");

    assert_eq!(record.dosage.as_deref(), Some("10.5"));
    assert_eq!(record.dosage_unit.as_deref(), Some("g"));
}

#[test]
fn test_plain_dosage_micrograms() {
    let record = extract("Vitamin D 50 µg Tropfen");

    assert_eq!(record.dosage.as_deref(), Some("50"));
    assert_eq!(record.dosage_unit.as_deref(), Some("µg"));
}

#[test]
fn test_volume_language_independent() {
    let french = extract("Sirop 200 mL");
    assert_eq!(french.volume.as_deref(), Some("200"));
    assert_eq!(french.volume_unit.as_deref(), Some("mL"));

    let spanish = extract("Jarabe 200 mililitros");
    assert_eq!(spanish.volume.as_deref(), Some("200"));
    assert_eq!(spanish.volume_unit.as_deref(), Some("mililitros"));
}

#[test]
fn test_count_with_packaging() {
    let record = extract("Tabletten 30 Stück Packung");

    assert_eq!(record.count.as_deref(), Some("30"));
    assert_eq!(record.count_unit.as_deref(), Some("Stück"));

    let packaging = record.packaging_type.expect("packaging noun present");
    assert!(["Tabletten", "Stück", "Packung"].contains(&packaging.as_str()));
}

#[test]
fn test_no_match_all_absent() {
    assert_eq!(extract("Handcreme Aloe Vera"), AttributeRecord::default());
}

// =============================================================================
// Overlapping Vocabularies
// =============================================================================

#[test]
fn test_gram_feeds_volume_and_dosage() {
    let record = extract("Magnesium Pulver 250g");

    assert_eq!(record.volume.as_deref(), Some("250"));
    assert_eq!(record.volume_unit.as_deref(), Some("g"));
    assert_eq!(record.dosage.as_deref(), Some("250"));
    assert_eq!(record.dosage_unit.as_deref(), Some("g"));
}

#[test]
fn test_italian_product_name() {
    let record = extract("Vitamina C 1000 mg 20 compressa effervescente");

    assert_eq!(record.dosage.as_deref(), Some("1000"));
    assert_eq!(record.dosage_unit.as_deref(), Some("mg"));
    assert_eq!(record.count.as_deref(), Some("20"));
    assert_eq!(record.count_unit.as_deref(), Some("compressa"));
    assert_eq!(record.packaging_type.as_deref(), Some("compressa"));
}

#[test]
fn test_uppercase_multiplier() {
    let record = extract("Kombipack 2X500MG");

    assert_eq!(record.dosage.as_deref(), Some("1000.0"));
    assert_eq!(record.dosage_unit.as_deref(), Some("MG"));
}

#[test]
fn test_non_ascii_multiplier_keeps_record() {
    let record = extract("Kapseln ٣x٣g");

    assert_eq!(record.dosage.as_deref(), Some("9.0"));
    assert_eq!(record.volume.as_deref(), Some("٣"));
    assert_eq!(record.volume_unit.as_deref(), Some("g"));
}

#[test]
fn test_multiplicative_exponent_rendering() {
    assert_eq!(extract("1x0.00001g").dosage.as_deref(), Some("1e-05"));
    assert_eq!(extract("2x5000000000000000g").dosage.as_deref(), Some("1e+16"));
}

#[test]
fn test_arithmetic_fault_is_per_record() {
    let extractor = extractor();
    let overflow = format!("{}x2g", "9".repeat(400));
    let results = extract_batch(&extractor, &[overflow.as_str(), "Sirop 200 mL"]);

    assert!(matches!(results[0], Err(AttrexError::Arithmetic { .. })));
    assert!(results[1].is_ok());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_extract_is_deterministic(name in "\\PC{0,60}") {
        let extractor = extractor();
        let first = extractor.extract(&name).ok();
        let second = extractor.extract(&name).ok();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_ascii_names_always_yield_a_record(name in "[ -~]{0,80}") {
        prop_assert!(extractor().extract(&name).is_ok());
    }

    #[test]
    fn prop_only_arithmetic_faults(name in "\\PC{0,60}") {
        match extractor().extract(&name) {
            Ok(_) | Err(AttrexError::Arithmetic { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn prop_count_magnitude_is_literal(
        n in 0u32..100_000,
        noun in prop::sample::select(vec!["Kapseln", "tabletas", "gouttes", "fiala", "pieces"]),
    ) {
        let record = extractor().extract(&format!("Omega {n} {noun}")).unwrap();
        prop_assert_eq!(record.count, Some(n.to_string()));
    }

    #[test]
    fn prop_parallel_batch_matches_sequential(
        names in prop::collection::vec("[a-zA-Z0-9 .x]{0,30}", 0..64),
    ) {
        let extractor = extractor();
        let sequential: Vec<_> = extract_batch(&extractor, &names)
            .into_iter()
            .map(|r| r.ok())
            .collect();
        let parallel: Vec<_> = extract_batch_parallel(&extractor, &names)
            .into_iter()
            .map(|r| r.ok())
            .collect();

        prop_assert_eq!(sequential, parallel);
    }
}
