use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use serde_json::Value as JsonValue;

use crate::error::DataError;

use super::model::{CellValue, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Supported on-disk layouts of the salary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
    Parquet,
}

impl Format {
    /// Pick a format from the extension of a path or URL. Query strings are
    /// ignored; a location without extension is read as CSV.
    pub fn from_location(location: &str) -> Result<Self, DataError> {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "parquet" | "pq" => Ok(Format::Parquet),
            other => Err(DataError::UnsupportedFormat(other.to_string())),
        }
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Load the raw salary table from a local path or an HTTP(S) URL.
///
/// Supported formats:
/// * `.csv`     – header row + one record per line (the published dataset)
/// * `.json`    – `[{ "ano": 2024, "cargo": "...", "usd": 120000, ... }, ...]`
/// * `.parquet` – flat columns of strings, ints, floats or bools
pub fn load(location: &str) -> Result<RawTable> {
    let format = Format::from_location(location)?;
    let table = if is_remote(location) {
        load_remote(location, format)?
    } else {
        load_file(Path::new(location), format)?
    };
    log::info!(
        "Loaded {} rows with columns {:?} from {location}",
        table.len(),
        table.columns
    );
    Ok(table)
}

fn load_file(path: &Path, format: Format) -> Result<RawTable> {
    match format {
        Format::Csv => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening CSV {}", path.display()))?;
            read_csv(file)
        }
        Format::Json => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading JSON {}", path.display()))?;
            read_json(&text)
        }
        Format::Parquet => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening parquet {}", path.display()))?;
            read_parquet(file)
        }
    }
}

fn load_remote(url: &str, format: Format) -> Result<RawTable> {
    let response = reqwest::blocking::get(url).with_context(|| format!("downloading {url}"))?;
    if !response.status().is_success() {
        bail!("dataset download returned status {}", response.status());
    }
    match format {
        Format::Csv => read_csv(response),
        Format::Json => read_json(&response.text().context("reading dataset body")?),
        Format::Parquet => read_parquet(response.bytes().context("reading dataset body")?),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`).
/// Columns are the union of keys in first-seen order.
pub fn read_json(text: &str) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = BTreeMap::new();
        for (key, val) in obj {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
            row.insert(key.clone(), json_to_cell(val));
        }
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
/// Cell types are guessed per value (int, float, bool, else string).
pub fn read_csv<R: Read>(input: R) -> Result<RawTable> {
    let mut reader = csv::Reader::from_reader(input);
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row = columns
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Read a flat Parquet table. Works with files written by **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
pub fn read_parquet<T: ChunkReader + 'static>(input: T) -> Result<RawTable> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(input).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = columns
                .iter()
                .enumerate()
                .map(|(col_idx, name)| (name.clone(), extract_cell(batch.column(col_idx), row)))
                .collect();
            rows.push(cells);
        }
    }

    Ok(RawTable { columns, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map_or(CellValue::Null, |a| CellValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(CellValue::Null, |a| CellValue::Bool(a.value(row))),
        other => CellValue::String(format!("{other:?}")),
    }
}
