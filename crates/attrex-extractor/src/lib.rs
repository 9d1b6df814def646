//! ATTREX Extractor - Product attribute extraction pipeline
//!
//! Extracts volume, count, dosage and packaging type from free-text
//! product names in English, German, Spanish, French and Italian, and
//! provides the batch and dataset glue around it.

use attrex_core::{AttributeRecord, Result};

/// Trait for product attribute extractors
pub trait AttributeExtractor: Send + Sync {
    /// Extract the attributes of a single product name.
    ///
    /// A name without any recognisable attribute yields an empty record,
    /// not an error.
    fn extract(&self, name: &str) -> Result<AttributeRecord>;
}

pub mod batch;
pub mod dataset;
pub mod multilingual;
pub mod patterns;
pub mod vocabulary;

pub use batch::{extract_batch, extract_batch_parallel, BatchSummary};
pub use multilingual::MultilingualExtractor;
pub use patterns::PatternCatalog;
pub use vocabulary::Vocabulary;
