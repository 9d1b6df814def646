//! ATTREX Core - Domain models and shared types
//!
//! This crate defines the core abstractions used throughout ATTREX:
//! - The seven-field attribute record emitted per product name
//! - Vocabulary categories and languages
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, ExtractionConfig, LoggingConfig, PipelineConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for ATTREX operations
#[derive(Error, Debug)]
pub enum AttrexError {
    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("Arithmetic fault in {name:?}: {reason}")]
    Arithmetic { name: String, reason: String },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AttrexError>;

// ============================================================================
// Vocabulary Model
// ============================================================================

/// Which pattern a vocabulary token feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Units accepted by the `<n>x<weight><unit>` dosage form
    MultiplierUnit,
    DosageUnit,
    VolumeUnit,
    /// Nouns that follow an integer count
    CountNoun,
    /// Nouns detected as bare words
    PackagingNoun,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::MultiplierUnit,
        Self::DosageUnit,
        Self::VolumeUnit,
        Self::CountNoun,
        Self::PackagingNoun,
    ];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultiplierUnit => "multiplier_unit",
            Self::DosageUnit => "dosage_unit",
            Self::VolumeUnit => "volume_unit",
            Self::CountNoun => "count_noun",
            Self::PackagingNoun => "packaging_noun",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");

        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "category".to_string(),
                value: s.to_string(),
            })
    }
}

/// Language a vocabulary token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "it")]
    Italian,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::German => "de",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::Italian => "it",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One `(category, language, token)` row of the vocabulary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub category: Category,
    pub language: Language,
    pub token: String,
}

impl VocabularyEntry {
    pub fn new(category: Category, language: Language, token: impl Into<String>) -> Self {
        Self {
            category,
            language,
            token: token.into(),
        }
    }
}

// ============================================================================
// Attribute Record
// ============================================================================

/// Output column names, in emission order
pub const ATTRIBUTE_COLUMNS: [&str; 7] = [
    "Volume",
    "Volume_Unit",
    "Count",
    "Count_Unit",
    "Dosage",
    "Dosage_Unit",
    "Packaging_Type",
];

/// Attributes extracted from a single product name.
///
/// Every field is independent; `None` means the corresponding pattern did
/// not match. Values are the literal text from the name, except `dosage`
/// for multiplicative expressions, which holds the computed product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    #[serde(rename = "Volume")]
    pub volume: Option<String>,

    #[serde(rename = "Volume_Unit")]
    pub volume_unit: Option<String>,

    #[serde(rename = "Count")]
    pub count: Option<String>,

    #[serde(rename = "Count_Unit")]
    pub count_unit: Option<String>,

    #[serde(rename = "Dosage")]
    pub dosage: Option<String>,

    #[serde(rename = "Dosage_Unit")]
    pub dosage_unit: Option<String>,

    #[serde(rename = "Packaging_Type")]
    pub packaging_type: Option<String>,
}

impl AttributeRecord {
    /// Fields paired with their output column names
    pub fn columns(&self) -> [(&'static str, Option<&str>); 7] {
        [
            (ATTRIBUTE_COLUMNS[0], self.volume.as_deref()),
            (ATTRIBUTE_COLUMNS[1], self.volume_unit.as_deref()),
            (ATTRIBUTE_COLUMNS[2], self.count.as_deref()),
            (ATTRIBUTE_COLUMNS[3], self.count_unit.as_deref()),
            (ATTRIBUTE_COLUMNS[4], self.dosage.as_deref()),
            (ATTRIBUTE_COLUMNS[5], self.dosage_unit.as_deref()),
            (ATTRIBUTE_COLUMNS[6], self.packaging_type.as_deref()),
        ]
    }

    /// True when no pattern matched
    pub fn is_empty(&self) -> bool {
        self.columns().iter().all(|(_, value)| value.is_none())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_column_names() {
        let record = AttributeRecord {
            volume: Some("200".to_string()),
            volume_unit: Some("mL".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();

        for column in ATTRIBUTE_COLUMNS {
            assert!(keys.contains(&column), "missing column {column}");
        }
        assert_eq!(json["Volume_Unit"], "mL");
        assert!(json["Packaging_Type"].is_null());
    }

    #[test]
    fn test_record_columns_order() {
        let record = AttributeRecord {
            packaging_type: Some("Flasche".to_string()),
            ..Default::default()
        };

        let columns = record.columns();
        assert_eq!(columns[0].0, "Volume");
        assert_eq!(columns[6], ("Packaging_Type", Some("Flasche")));
        assert!(!record.is_empty());
        assert!(AttributeRecord::default().is_empty());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "volume_unit".parse::<Category>().unwrap(),
            Category::VolumeUnit
        );
        assert_eq!(
            "Packaging-Noun".parse::<Category>().unwrap(),
            Category::PackagingNoun
        );
        assert!("colour".parse::<Category>().is_err());
    }

    #[test]
    fn test_vocabulary_entry_deserialize() {
        let entry: VocabularyEntry = serde_json::from_str(
            r#"{"category": "count_noun", "language": "de", "token": "Beutel"}"#,
        )
        .unwrap();

        assert_eq!(entry.category, Category::CountNoun);
        assert_eq!(entry.language, Language::German);
        assert_eq!(entry.token, "Beutel");
    }

    #[test]
    fn test_arithmetic_error_display() {
        let err = AttrexError::Arithmetic {
            name: "3x3.5g".to_string(),
            reason: "overflow".to_string(),
        };
        assert_eq!(err.to_string(), "Arithmetic fault in \"3x3.5g\": overflow");
    }
}
