//! Batch extraction
//!
//! Runs an extractor over many names, sequentially or on the rayon thread
//! pool. Both forms return one result per input, in input order, so a
//! failing name never shifts or drops its neighbours.

use rayon::prelude::*;
use serde::Serialize;

use attrex_core::{AttributeRecord, Result, ATTRIBUTE_COLUMNS};

use crate::AttributeExtractor;

/// Extract every name on the current thread
pub fn extract_batch<E, S>(extractor: &E, names: &[S]) -> Vec<Result<AttributeRecord>>
where
    E: AttributeExtractor + ?Sized,
    S: AsRef<str>,
{
    names
        .iter()
        .map(|name| extractor.extract(name.as_ref()))
        .collect()
}

/// Extract every name in parallel; output order matches `names`
pub fn extract_batch_parallel<E, S>(extractor: &E, names: &[S]) -> Vec<Result<AttributeRecord>>
where
    E: AttributeExtractor + ?Sized,
    S: AsRef<str> + Sync,
{
    names
        .par_iter()
        .map(|name| extractor.extract(name.as_ref()))
        .collect()
}

// ============================================================================
// Batch Summary
// ============================================================================

/// How many records of a batch populated each output column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Names processed
    pub processed: usize,
    /// Names that raised an arithmetic fault
    pub failed: usize,
    /// Populated count per column, in column order
    pub coverage: Vec<(&'static str, usize)>,
}

impl BatchSummary {
    /// Summarize a batch of results
    pub fn from_results(results: &[Result<AttributeRecord>]) -> Self {
        let mut coverage: Vec<(&'static str, usize)> =
            ATTRIBUTE_COLUMNS.iter().map(|c| (*c, 0)).collect();
        let mut failed = 0;

        for result in results {
            match result {
                Ok(record) => {
                    for (slot, (_, value)) in coverage.iter_mut().zip(record.columns()) {
                        if value.is_some() {
                            slot.1 += 1;
                        }
                    }
                }
                Err(_) => failed += 1,
            }
        }

        Self {
            processed: results.len(),
            failed,
            coverage,
        }
    }

    /// Records that produced an attribute record
    pub fn succeeded(&self) -> usize {
        self.processed - self.failed
    }

    /// Populated count for a column (0 for unknown columns)
    pub fn populated(&self, column: &str) -> usize {
        self.coverage
            .iter()
            .find(|(name, _)| *name == column)
            .map_or(0, |(_, count)| *count)
    }

    /// Share of successful records that populated `column`
    pub fn coverage_rate(&self, column: &str) -> f32 {
        if self.succeeded() == 0 {
            0.0
        } else {
            self.populated(column) as f32 / self.succeeded() as f32
        }
    }

    /// Emit the summary at info level
    pub fn log(&self) {
        tracing::info!(
            processed = self.processed,
            failed = self.failed,
            "Extracted attributes from {} names",
            self.succeeded()
        );
        for (column, count) in &self.coverage {
            tracing::debug!(column = *column, populated = *count, "Column coverage");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
