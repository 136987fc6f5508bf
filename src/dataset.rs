//! Ingestion boundary: locating and loading the cached datasets.
//!
//! Files live flat in the raw data directory:
//! - `{STATE}-{YEAR}.json` for LegiScan bills
//! - the first file (by name) containing `senate`, the state and the year
//!   for senate bills, e.g. `NY-2023-senate.json`
//!
//! Non-bill LegiScan rows are dropped while still untyped, and every other
//! row is deserialized on its own so one bad row is a row error rather
//! than a failed file.

use crate::classifier;
use crate::config::{Config, MalformedPolicy};
use crate::error::{Error, Result};
use crate::pipeline::{handle_row, SkippedRow};
use crate::types::{LegiscanBill, SenateBill};
use jwalk::WalkDir;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::info;

pub const LEGISCAN: &str = "legiscan";
pub const SENATE: &str = "senate";

const LEGISCAN_ID: &str = "bill_number";
const SENATE_ID: &str = "basePrintNo";

/// Both input tables for one state and year, with what loading dropped
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub legiscan: Vec<LegiscanBill>,
    pub senate: Vec<SenateBill>,
    /// LegiScan rows in the file, before any were dropped
    pub legiscan_rows: usize,
    /// LegiScan rows whose bill number is not a bill (resolutions, pandas
    /// `status` rows)
    pub resolutions_dropped: usize,
    /// Rows that failed to load under [`MalformedPolicy::Skip`]
    pub skipped: Vec<SkippedRow>,
}

/// Path of the LegiScan dataset
pub fn legiscan_path(data_dir: &Path, state: &str, year: u16) -> PathBuf {
    data_dir.join(format!("{}-{}.json", state, year))
}

/// Find the senate dataset in the raw data directory
pub fn find_senate_path(data_dir: &Path, state: &str, year: u16) -> Result<PathBuf> {
    let year = year.to_string();
    let mut candidates = Vec::new();

    for entry_result in WalkDir::new(data_dir).max_depth(1).sort(true) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name.ends_with(".json")
            && name.contains(SENATE)
            && name.contains(state)
            && name.contains(&year)
        {
            candidates.push(entry.path());
        }
    }

    candidates.sort();
    candidates.into_iter().next().ok_or_else(|| Error::MissingDataset {
        dataset: SENATE.to_string(),
        path: data_dir
            .join(format!("{}-{}-senate.json", state, year))
            .display()
            .to_string(),
    })
}

/// Load both datasets for the configured state and year
pub fn load(config: &Config) -> Result<Datasets> {
    let policy = config.on_malformed;
    let mut skipped = Vec::new();

    let senate_path = find_senate_path(&config.data_dir, &config.state, config.year)?;
    let senate_rows = read_table(&senate_path, SENATE)?;
    let senate: Vec<SenateBill> =
        typed_rows(senate_rows, SENATE, SENATE_ID, policy, &mut skipped)?;
    info!(path = %senate_path.display(), rows = senate.len(), "loaded senate dataset");

    let legiscan_path = legiscan_path(&config.data_dir, &config.state, config.year);
    let legiscan_rows = read_table(&legiscan_path, LEGISCAN)?;
    let total = legiscan_rows.len();
    let bill_rows = drop_non_bills(legiscan_rows);
    let resolutions_dropped = total - bill_rows.len();
    let legiscan: Vec<LegiscanBill> =
        typed_rows(bill_rows, LEGISCAN, LEGISCAN_ID, policy, &mut skipped)?;
    info!(
        path = %legiscan_path.display(),
        rows = legiscan.len(),
        dropped = resolutions_dropped,
        "loaded legiscan dataset"
    );

    Ok(Datasets {
        legiscan,
        senate,
        legiscan_rows: total,
        resolutions_dropped,
        skipped,
    })
}

/// Read a dataset file into untyped row objects
pub fn read_table(path: &Path, dataset: &str) -> Result<Vec<Value>> {
    if !path.is_file() {
        return Err(Error::MissingDataset {
            dataset: dataset.to_string(),
            path: path.display().to_string(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    let rows = table_rows(value).map_err(|reason| Error::InvalidDataset {
        dataset: dataset.to_string(),
        path: path.display().to_string(),
        reason,
    })?;

    Ok(rows.into_iter().map(unwrap_bill).collect())
}

/// Keep LegiScan rows whose `bill_number` is a string starting with `A` or `S`
pub fn drop_non_bills(rows: Vec<Value>) -> Vec<Value> {
    rows.into_iter()
        .filter(|row| {
            row.get(LEGISCAN_ID)
                .and_then(Value::as_str)
                .map_or(false, classifier::is_bill)
        })
        .collect()
}

/// Deserialize rows one at a time. A row that does not fit `T` is a row
/// error named by its `id_field`, handled by the malformed-row policy.
pub fn typed_rows<T: DeserializeOwned>(
    rows: Vec<Value>,
    dataset: &str,
    id_field: &str,
    policy: MalformedPolicy,
    skipped: &mut Vec<SkippedRow>,
) -> Result<Vec<T>> {
    let mut typed = Vec::with_capacity(rows.len());
    for row in rows {
        let bill_number = row
            .get(id_field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let result = serde_json::from_value(row).map_err(|e| Error::InvalidRow {
            dataset: dataset.to_string(),
            bill_number: bill_number.clone(),
            reason: e.to_string(),
        });
        if let Some(value) = handle_row(result, dataset, &bill_number, policy, skipped)? {
            typed.push(value);
        }
    }
    Ok(typed)
}

/// Normalize the accepted JSON layouts to a list of row objects:
/// - an array of rows
/// - an API page `{"result": {"items": [...]}}`
/// - a column layout `{column: {row_index: value}}`
pub fn table_rows(value: Value) -> std::result::Result<Vec<Value>, String> {
    match value {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => {
            if let Some(items) = map
                .get_mut("result")
                .and_then(|r| r.get_mut("items"))
                .map(Value::take)
            {
                return match items {
                    Value::Array(rows) => Ok(rows),
                    _ => Err("result.items is not an array".to_string()),
                };
            }
            columns_to_rows(map)
        }
        _ => Err("expected a JSON array or object".to_string()),
    }
}

fn columns_to_rows(columns: Map<String, Value>) -> std::result::Result<Vec<Value>, String> {
    let mut row_keys: Vec<String> = Vec::new();
    for (name, column) in &columns {
        let cells = column
            .as_object()
            .ok_or_else(|| format!("column '{}' is not an object", name))?;
        for key in cells.keys() {
            if !row_keys.contains(key) {
                row_keys.push(key.clone());
            }
        }
    }

    // Row indexes are numeric strings; keep their numeric order
    row_keys.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    });

    let rows = row_keys
        .iter()
        .map(|key| {
            let row: Map<String, Value> = columns
                .iter()
                .filter_map(|(name, column)| {
                    column.get(key).map(|cell| (name.clone(), cell.clone()))
                })
                .collect();
            Value::Object(row)
        })
        .collect();
    Ok(rows)
}

/// LegiScan bill files wrap each row as `{"bill": {...}}`
fn unwrap_bill(row: Value) -> Value {
    match row {
        Value::Object(mut map) if map.len() == 1 && map.get("bill").map_or(false, Value::is_object) => {
            map.remove("bill").unwrap_or(Value::Null)
        }
        other => other,
    }
}
