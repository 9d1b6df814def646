//! Dataset module
//!
//! Connects extraction to tabular records: pulls the product name out of
//! an input row, appends the seven attribute columns, and keeps only rows
//! that previous results have not seen yet. Rows are stored as JSON Lines.

use std::collections::{BTreeSet, HashSet};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};

use attrex_core::{AttrexError, AttributeRecord, PipelineConfig, Result};

use crate::batch::{extract_batch, extract_batch_parallel, BatchSummary};
use crate::AttributeExtractor;

/// A source row; only the name column is interpreted
pub type InputRecord = Map<String, Value>;

/// A source row followed by the attribute columns
pub type OutputRow = Map<String, Value>;

// ============================================================================
// Record Conversion
// ============================================================================

/// Product name of `record`, with null or missing values read as `""`
pub fn product_name(record: &InputRecord, column: &str) -> String {
    match record.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    }
}

/// Append the attribute columns to a copy of `record`
pub fn enrich(record: &InputRecord, attributes: &AttributeRecord) -> OutputRow {
    let mut row = record.clone();

    for (column, value) in attributes.columns() {
        let value = value.map_or(Value::Null, |v| Value::String(v.to_string()));
        row.insert(column.to_string(), value);
    }

    row
}

/// Extract and enrich every record.
///
/// The name column is written back as the normalized string that was
/// extracted from. Records whose extraction fails are logged and left out;
/// all others keep their input order.
pub fn process_records<E>(
    extractor: &E,
    records: &[InputRecord],
    config: &PipelineConfig,
) -> Vec<OutputRow>
where
    E: AttributeExtractor + ?Sized,
{
    let names: Vec<String> = records
        .iter()
        .map(|r| product_name(r, &config.name_column))
        .collect();

    let results = if config.parallel {
        extract_batch_parallel(extractor, &names)
    } else {
        extract_batch(extractor, &names)
    };
    BatchSummary::from_results(&results).log();

    records
        .iter()
        .zip(names.into_iter().zip(results))
        .enumerate()
        .filter_map(|(index, (record, (name, result)))| match result {
            Ok(attributes) => {
                let mut record = record.clone();
                record.insert(config.name_column.clone(), Value::String(name));
                Some(enrich(&record, &attributes))
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping record");
                None
            }
        })
        .collect()
}

// ============================================================================
// Diff Against Previous Results
// ============================================================================

/// Rows of `rows` that do not occur in `previous`.
///
/// Rows are compared on the columns both datasets share; a column missing
/// from a row compares as null. Without previous results every row is new.
pub fn new_entries(rows: Vec<OutputRow>, previous: &[OutputRow]) -> Result<Vec<OutputRow>> {
    if previous.is_empty() {
        return Ok(rows);
    }

    let current_columns = column_set(&rows);
    let previous_columns = column_set(previous);
    let shared: Vec<String> = current_columns
        .intersection(&previous_columns)
        .map(|column| column.to_string())
        .collect();

    if shared.is_empty() {
        return Err(AttrexError::Dataset(
            "no common columns with previous results".to_string(),
        ));
    }

    let seen: HashSet<String> = previous.iter().map(|row| row_key(row, &shared)).collect();

    Ok(rows
        .into_iter()
        .filter(|row| !seen.contains(&row_key(row, &shared)))
        .collect())
}

fn column_set(rows: &[OutputRow]) -> BTreeSet<&str> {
    rows.iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect()
}

fn row_key(row: &OutputRow, columns: &[String]) -> String {
    let values: Vec<&Value> = columns
        .iter()
        .map(|c| row.get(c).unwrap_or(&Value::Null))
        .collect();

    // Serializing a Vec<&Value> cannot fail
    serde_json::to_string(&values).unwrap_or_default()
}

// ============================================================================
// JSON Lines Storage
// ============================================================================

/// Read every record of a JSON Lines file
pub fn read_jsonl(path: impl AsRef<Path>) -> Result<Vec<InputRecord>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(&line)? {
            Value::Object(record) => records.push(record),
            other => {
                return Err(AttrexError::Dataset(format!(
                    "{}:{}: expected a JSON object, found {}",
                    path.display(),
                    index + 1,
                    kind_of(&other)
                )))
            }
        }
    }

    Ok(records)
}

/// Read previous results; a file that does not exist yet holds none
pub fn read_previous(path: impl AsRef<Path>) -> Result<Vec<OutputRow>> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No previous results at {}", path.display());
        return Ok(Vec::new());
    }

    read_jsonl(path)
}

/// Append rows to a JSON Lines file, creating it if needed
pub fn append_jsonl(path: impl AsRef<Path>, rows: &[OutputRow]) -> Result<usize> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(rows.len())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tests
// ============================================================================
