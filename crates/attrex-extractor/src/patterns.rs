//! Pattern catalog
//!
//! Compiles the vocabulary into one case-insensitive regex per attribute.
//! Each regex captures the magnitude (where there is one) followed by the
//! unit or noun exactly as it appeared in the input.

use regex::Regex;

use attrex_core::{AttrexError, Category, Result};

use crate::vocabulary::Vocabulary;

/// Decimal or integer magnitude, e.g. `3`, `3.5`, `3.`
const DECIMAL: &str = r"(\d+\.?\d*)";

/// Integer magnitude
const INTEGER: &str = r"(\d+)";

/// Pre-compiled patterns for all five attributes
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    multiplicative: Regex,
    dosage: Regex,
    volume: Regex,
    count: Regex,
    packaging: Regex,
    decimal_digit: Regex,
}

impl PatternCatalog {
    /// Compile every pattern from `vocabulary`
    pub fn compile(vocabulary: &Vocabulary) -> Result<Self> {
        let multiplier_units = alternation(vocabulary, Category::MultiplierUnit)?;
        let dosage_units = alternation(vocabulary, Category::DosageUnit)?;
        let volume_units = alternation(vocabulary, Category::VolumeUnit)?;
        let count_nouns = alternation(vocabulary, Category::CountNoun)?;
        let packaging_nouns = alternation(vocabulary, Category::PackagingNoun)?;

        Ok(Self {
            multiplicative: build(&format!(
                r"(?i){INTEGER}x{DECIMAL}\s?({multiplier_units})"
            ))?,
            dosage: build(&format!(r"(?i){DECIMAL}\s?({dosage_units})"))?,
            volume: build(&format!(r"(?i){DECIMAL}\s?({volume_units})"))?,
            count: build(&format!(r"(?i){INTEGER}\s?({count_nouns})"))?,
            packaging: build(&format!(r"(?i)\b({packaging_nouns})\b"))?,
            decimal_digit: build(r"^\p{Nd}$")?,
        })
    }

    /// `<count>x<weight><unit>`: groups count, weight, unit
    pub fn multiplicative(&self) -> &Regex {
        &self.multiplicative
    }

    /// Groups magnitude, unit
    pub fn dosage(&self) -> &Regex {
        &self.dosage
    }

    /// Groups magnitude, unit
    pub fn volume(&self) -> &Regex {
        &self.volume
    }

    /// Groups integer, noun
    pub fn count(&self) -> &Regex {
        &self.count
    }

    /// Group: the bare noun
    pub fn packaging(&self) -> &Regex {
        &self.packaging
    }

    /// Whether `c` is a Unicode decimal digit, the set `\d` matches
    pub fn is_decimal_digit(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.decimal_digit.is_match(c.encode_utf8(&mut buf))
    }
}

/// Join the escaped tokens of `category` into a regex alternation
fn alternation(vocabulary: &Vocabulary, category: Category) -> Result<String> {
    let tokens = vocabulary.tokens(category);

    if tokens.is_empty() {
        return Err(AttrexError::Pattern(format!(
            "no tokens for category {category}"
        )));
    }
    if tokens.iter().any(|t| t.trim().is_empty()) {
        return Err(AttrexError::Pattern(format!(
            "empty token in category {category}"
        )));
    }

    Ok(tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|"))
}

fn build(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| AttrexError::Pattern(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
