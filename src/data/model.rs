use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Source column names as they appear in the published salary dataset.
pub mod columns {
    pub const YEAR: &str = "ano";
    pub const TITLE: &str = "cargo";
    pub const SENIORITY: &str = "senioridade";
    pub const CONTRACT: &str = "contrato";
    pub const COMPANY_SIZE: &str = "tamanho_empresa";
    pub const RESIDENCE: &str = "residencia_iso3";
    pub const REMOTE: &str = "remoto";
    pub const SALARY_USD: &str = "usd";

    /// Derived: `usd` multiplied by the conversion rate.
    pub const SALARY_CONVERTED: &str = "salary_converted";
    /// Derived: `cargo` passed through the title translator.
    pub const TITLE_DISPLAY: &str = "title_display";

    /// Columns that must exist in any dataset we accept.
    pub const REQUIRED: [&str; 2] = [SALARY_USD, TITLE];

    pub fn is_derived(column: &str) -> bool {
        column == SALARY_CONVERTED || column == TITLE_DISPLAY
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes found in the dataset.
/// Used as a key in `BTreeMap` / `BTreeSet` downstream so it must be `Ord`.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --
// Equality follows `cmp`, so floats compare by `total_cmp` like `Hash` does.

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl CellValue {
    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// RawTable – the dataset as read from disk / network
// ---------------------------------------------------------------------------

/// Untyped table produced by the loader, before any derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// One map per row: column_name → value.
    pub rows: Vec<BTreeMap<String, CellValue>>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SalaryRecord – one prepared row
// ---------------------------------------------------------------------------

/// One row of the salary dataset plus its derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    /// Source columns: column_name → value.
    pub fields: BTreeMap<String, CellValue>,
    /// `usd` × conversion rate, fixed at preparation time.
    pub salary_converted: f64,
    /// Display title from the translator.
    pub title_display: String,
}

impl SalaryRecord {
    /// Look up any column by name, derived columns included.
    /// Missing source columns read as [`CellValue::Null`].
    pub fn value(&self, column: &str) -> CellValue {
        match column {
            columns::SALARY_CONVERTED => CellValue::Float(self.salary_converted),
            columns::TITLE_DISPLAY => CellValue::String(self.title_display.clone()),
            _ => self.fields.get(column).cloned().unwrap_or(CellValue::Null),
        }
    }

    /// Numeric value of a column, `None` if missing or non-numeric.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            columns::SALARY_CONVERTED => Some(self.salary_converted),
            _ => self.fields.get(column).and_then(CellValue::as_f64),
        }
    }

    pub fn salary_usd(&self) -> Option<f64> {
        self.numeric(columns::SALARY_USD)
    }

    pub fn raw_title(&self) -> Option<&str> {
        self.fields.get(columns::TITLE).and_then(CellValue::as_str)
    }

    pub fn year(&self) -> Option<i64> {
        match self.fields.get(columns::YEAR) {
            Some(CellValue::Integer(y)) => Some(*y),
            _ => None,
        }
    }
}

/// View a borrowed record generically, so filters and reducers accept both
/// `&[SalaryRecord]` and `&[&SalaryRecord]`.
pub(crate) fn as_record<R: Borrow<SalaryRecord>>(r: &R) -> &SalaryRecord {
    r.borrow()
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete prepared dataset
// ---------------------------------------------------------------------------

/// The prepared dataset: immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryDataset {
    pub records: Vec<SalaryRecord>,
    /// Source column names in file order (derived columns excluded).
    pub column_names: Vec<String>,
    /// Rate used to compute `salary_converted`.
    pub rate: f64,
}

impl SalaryDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        columns::is_derived(column) || self.column_names.iter().any(|c| c == column)
    }
}
