//! Multilingual attribute extraction
//!
//! Applies the five catalog patterns independently to the original product
//! name. The only interaction between patterns is that a multiplicative
//! dosage (`3x3.5g`) replaces the plain dosage search.

use regex::Regex;

use attrex_core::{AttrexError, AttributeRecord, ExtractionConfig, Result};

use crate::patterns::PatternCatalog;
use crate::vocabulary::Vocabulary;
use crate::AttributeExtractor;

/// Regex-table extractor for English, German, Spanish, French and Italian
/// product names
#[derive(Debug, Clone)]
pub struct MultilingualExtractor {
    catalog: PatternCatalog,
}

impl MultilingualExtractor {
    /// Create an extractor over the built-in vocabulary
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(&Vocabulary::builtin())
    }

    /// Create with a custom vocabulary
    pub fn with_vocabulary(vocabulary: &Vocabulary) -> Result<Self> {
        Ok(Self {
            catalog: PatternCatalog::compile(vocabulary)?,
        })
    }

    /// Create from configuration (built-in plus configured entries)
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Self::with_vocabulary(&Vocabulary::with_entries(
            config.extra_vocabulary.iter().cloned(),
        ))
    }

    /// Dosage from the multiplicative form, falling back to the plain form
    fn dosage(&self, name: &str) -> Result<Option<(String, String)>> {
        if let Some(caps) = self.catalog.multiplicative().captures(name) {
            let count = self.ascii_digits(&caps[1]);
            let weight = self.ascii_digits(&caps[2]);
            let total = multiply(name, &count, &weight)?;
            return Ok(Some((total, caps[3].to_string())));
        }

        Ok(magnitude_and_unit(self.catalog.dosage(), name))
    }

    /// Rewrite any Unicode decimal digit as its ASCII counterpart.
    ///
    /// Decimal digits are assigned in contiguous runs whose values cycle
    /// 0 through 9, so a digit's value is its offset from the start of its
    /// run, modulo 10.
    fn ascii_digits(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                if c.is_ascii() || !self.catalog.is_decimal_digit(c) {
                    return c;
                }

                let mut start = c as u32;
                while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
                    if !self.catalog.is_decimal_digit(prev) {
                        break;
                    }
                    start -= 1;
                }

                char::from_digit((c as u32 - start) % 10, 10).unwrap_or(c)
            })
            .collect()
    }
}

impl AttributeExtractor for MultilingualExtractor {
    fn extract(&self, name: &str) -> Result<AttributeRecord> {
        let (dosage, dosage_unit) = self.dosage(name)?.unzip();
        let (volume, volume_unit) = magnitude_and_unit(self.catalog.volume(), name).unzip();
        let (count, count_unit) = magnitude_and_unit(self.catalog.count(), name).unzip();
        let packaging_type = self
            .catalog
            .packaging()
            .captures(name)
            .map(|caps| caps[1].to_string());

        Ok(AttributeRecord {
            volume,
            volume_unit,
            count,
            count_unit,
            dosage,
            dosage_unit,
            packaging_type,
        })
    }
}

/// First match of a two-group `(magnitude)(unit)` pattern
fn magnitude_and_unit(regex: &Regex, name: &str) -> Option<(String, String)> {
    regex
        .captures(name)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Multiply the unit count by the per-unit weight.
///
/// Both factors must already be ASCII; a factor that does not parse or a
/// non-finite product is reported as an arithmetic fault.
fn multiply(name: &str, count: &str, weight: &str) -> Result<String> {
    let fault = |reason: String| AttrexError::Arithmetic {
        name: name.to_string(),
        reason,
    };
    let parse = |text: &str| {
        text.parse::<f64>()
            .map_err(|e| fault(format!("cannot parse {text:?}: {e}")))
    };

    let total = parse(count)? * parse(weight)?;
    if !total.is_finite() {
        return Err(fault(format!("{count} x {weight} is not finite")));
    }

    Ok(format_decimal(total))
}

/// Render like the existing attribute tables: the shortest round-trip
/// digits, integral values with a trailing `.0` (`6.0`), and exponent form
/// with a signed two-digit exponent below `1e-4` or from `1e16` up
/// (`1e-05`, `1.5e+16`).
fn format_decimal(value: f64) -> String {
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if value != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

// ============================================================================
// Tests
// ============================================================================
