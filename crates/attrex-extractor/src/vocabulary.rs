//! Vocabulary module
//!
//! The unit and noun tables behind every extraction pattern, kept as plain
//! `(category, language, token)` data so that languages and units can be
//! added without touching the matching code.
//!
//! Table order is match priority: when several tokens could match at the
//! same position, the one listed first wins.

use std::collections::HashSet;

use attrex_core::{Category, Language, VocabularyEntry};

use Category::{CountNoun, DosageUnit, MultiplierUnit, PackagingNoun, VolumeUnit};
use Language::{English as En, French as Fr, German as De, Italian as It, Spanish as Es};

// ============================================================================
// Built-in Table
// ============================================================================

const BUILTIN: &[(Category, Language, &str)] = &[
    // Multiplicative dosage units
    (MultiplierUnit, En, "mg"),
    (MultiplierUnit, En, "g"),
    (MultiplierUnit, En, "gr"),
    (MultiplierUnit, En, "µg"),
    // Dosage units
    (DosageUnit, En, "mg"),
    (DosageUnit, En, "g"),
    (DosageUnit, En, "gr"),
    (DosageUnit, En, "µg"),
    (DosageUnit, De, "Milligramm"),
    (DosageUnit, De, "Gramm"),
    (DosageUnit, De, "Mikrogramm"),
    (DosageUnit, Es, "miligramos"),
    (DosageUnit, Es, "gramos"),
    (DosageUnit, Es, "microgramos"),
    (DosageUnit, Fr, "milligramme"),
    (DosageUnit, Fr, "gramme"),
    (DosageUnit, Fr, "microgramme"),
    (DosageUnit, It, "milligrammo"),
    (DosageUnit, It, "grammo"),
    (DosageUnit, It, "microgrammo"),
    // Volume units
    (VolumeUnit, En, "ml"),
    (VolumeUnit, En, "mL"),
    (VolumeUnit, En, "l"),
    (VolumeUnit, En, "L"),
    (VolumeUnit, En, "g"),
    (VolumeUnit, En, "mg"),
    (VolumeUnit, En, "kg"),
    (VolumeUnit, En, "µg"),
    (VolumeUnit, En, "oz"),
    (VolumeUnit, En, "gr"),
    (VolumeUnit, De, "Gramm"),
    (VolumeUnit, De, "Liter"),
    (VolumeUnit, De, "Milliliter"),
    (VolumeUnit, Es, "mililitros"),
    (VolumeUnit, Es, "litro"),
    (VolumeUnit, Es, "gramo"),
    (VolumeUnit, Fr, "milligramme"),
    (VolumeUnit, Fr, "litre"),
    (VolumeUnit, Fr, "gramme"),
    (VolumeUnit, It, "millilitro"),
    (VolumeUnit, It, "litri"),
    (VolumeUnit, It, "grammi"),
    // Count nouns
    (CountNoun, En, "tablet"),
    (CountNoun, En, "capsule"),
    (CountNoun, En, "caps"),
    (CountNoun, En, "bottle"),
    (CountNoun, En, "pack"),
    (CountNoun, En, "vial"),
    (CountNoun, En, "drop"),
    (CountNoun, En, "effervescence"),
    (CountNoun, De, "karton"),
    (CountNoun, En, "count"),
    (CountNoun, En, "piece"),
    (CountNoun, En, "pieces"),
    (CountNoun, De, "Tabletten"),
    (CountNoun, De, "Kapseln"),
    (CountNoun, De, "Flasche"),
    (CountNoun, De, "Packung"),
    (CountNoun, De, "Ampullen"),
    (CountNoun, De, "Tropfen"),
    (CountNoun, De, "Stück"),
    (CountNoun, Es, "tableta"),
    (CountNoun, Es, "cápsula"),
    (CountNoun, Es, "botella"),
    (CountNoun, Es, "paquete"),
    (CountNoun, Es, "vial"),
    (CountNoun, Es, "gota"),
    (CountNoun, It, "effervescente"),
    (CountNoun, Es, "cartón"),
    (CountNoun, Fr, "comprimé"),
    (CountNoun, Fr, "capsule"),
    (CountNoun, Fr, "bouteille"),
    (CountNoun, Fr, "paquet"),
    (CountNoun, Fr, "flacon"),
    (CountNoun, Fr, "goutte"),
    (CountNoun, It, "compressa"),
    (CountNoun, It, "capsula"),
    (CountNoun, It, "bottiglia"),
    (CountNoun, It, "confezione"),
    (CountNoun, It, "fiala"),
    (CountNoun, It, "goccia"),
    // Packaging nouns
    (PackagingNoun, En, "tablet"),
    (PackagingNoun, En, "capsule"),
    (PackagingNoun, En, "drop"),
    (PackagingNoun, En, "effervescence"),
    (PackagingNoun, En, "bottle"),
    (PackagingNoun, En, "vial"),
    (PackagingNoun, De, "karton"),
    (PackagingNoun, En, "pack"),
    (PackagingNoun, En, "count"),
    (PackagingNoun, En, "piece"),
    (PackagingNoun, En, "pieces"),
    (PackagingNoun, De, "Tabletten"),
    (PackagingNoun, De, "Kapseln"),
    (PackagingNoun, De, "Flasche"),
    (PackagingNoun, De, "Packung"),
    (PackagingNoun, De, "Ampulle"),
    (PackagingNoun, De, "Tropfen"),
    (PackagingNoun, De, "Stück"),
    (PackagingNoun, Es, "tableta"),
    (PackagingNoun, Es, "cápsula"),
    (PackagingNoun, Es, "botella"),
    (PackagingNoun, Es, "paquete"),
    (PackagingNoun, Es, "vial"),
    (PackagingNoun, Es, "gota"),
    (PackagingNoun, It, "effervescente"),
    (PackagingNoun, Es, "cartón"),
    (PackagingNoun, Fr, "comprimé"),
    (PackagingNoun, Fr, "capsule"),
    (PackagingNoun, Fr, "bouteille"),
    (PackagingNoun, Fr, "paquet"),
    (PackagingNoun, Fr, "flacon"),
    (PackagingNoun, Fr, "goutte"),
    (PackagingNoun, It, "compressa"),
    (PackagingNoun, It, "capsula"),
    (PackagingNoun, It, "bottiglia"),
    (PackagingNoun, It, "confezione"),
    (PackagingNoun, It, "fiala"),
    (PackagingNoun, It, "goccia"),
];

// ============================================================================
// Vocabulary
// ============================================================================

/// Ordered vocabulary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    /// Built-in English, German, Spanish, French and Italian vocabulary
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(category, language, token)| VocabularyEntry::new(*category, *language, *token))
            .collect();

        Self { entries }
    }

    /// Built-in vocabulary followed by `extra`.
    ///
    /// Extra entries rank after every built-in token of their category, so
    /// they only add matches and never change an existing one.
    pub fn with_entries(extra: impl IntoIterator<Item = VocabularyEntry>) -> Self {
        let mut vocabulary = Self::builtin();
        vocabulary.entries.extend(extra);
        vocabulary
    }

    /// All entries in priority order
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// Tokens of one category in priority order.
    ///
    /// Matching is case-insensitive, so tokens differing only in case are
    /// reported once, at the position of their first occurrence.
    pub fn tokens(&self, category: Category) -> Vec<&str> {
        let mut seen = HashSet::new();

        self.entries
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.token.as_str())
            .filter(|token| seen.insert(token.to_lowercase()))
            .collect()
    }

    /// Languages with at least one token in `category`
    pub fn languages(&self, category: Category) -> Vec<Language> {
        let mut languages = Vec::new();

        for entry in self.entries.iter().filter(|e| e.category == category) {
            if !languages.contains(&entry.language) {
                languages.push(entry.language);
            }
        }

        languages
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_units_closed_set() {
        let vocabulary = Vocabulary::builtin();
        assert_eq!(
            vocabulary.tokens(Category::MultiplierUnit),
            vec!["mg", "g", "gr", "µg"]
        );
    }

    #[test]
    fn test_tokens_dedup_case_insensitive() {
        let vocabulary = Vocabulary::builtin();
        let volume = vocabulary.tokens(Category::VolumeUnit);

        assert_eq!(&volume[..3], &["ml", "l", "g"]);
        assert!(!volume.contains(&"mL"));
        assert!(!volume.contains(&"L"));

        let count = vocabulary.tokens(Category::CountNoun);
        assert_eq!(count.iter().filter(|t| **t == "vial").count(), 1);
        assert_eq!(count.iter().filter(|t| **t == "capsule").count(), 1);
    }

    #[test]
    fn test_every_category_covers_all_languages() {
        let vocabulary = Vocabulary::builtin();

        for category in [
            Category::DosageUnit,
            Category::VolumeUnit,
            Category::CountNoun,
            Category::PackagingNoun,
        ] {
            let languages = vocabulary.languages(category);
            assert_eq!(languages.len(), 5, "{category} covers {languages:?}");
        }
    }

    #[test]
    fn test_with_entries_appends_after_builtin() {
        let vocabulary = Vocabulary::with_entries(vec![
            VocabularyEntry::new(Category::CountNoun, Language::German, "Beutel"),
            VocabularyEntry::new(Category::CountNoun, Language::German, "TABLETTEN"),
        ]);

        let count = vocabulary.tokens(Category::CountNoun);
        assert_eq!(count.last(), Some(&"Beutel"));
        assert!(!count.contains(&"TABLETTEN"));
        assert_eq!(
            vocabulary.entries().len(),
            Vocabulary::builtin().entries().len() + 2
        );
    }
}
