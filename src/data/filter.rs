use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};

use super::model::{as_record, columns, CellValue, SalaryRecord};

// ---------------------------------------------------------------------------
// Filterable columns
// ---------------------------------------------------------------------------

/// A column offered in the filter sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterColumn {
    pub label: &'static str,
    pub column: &'static str,
}

pub const FILTER_COLUMNS: [FilterColumn; 4] = [
    FilterColumn {
        label: "Year",
        column: columns::YEAR,
    },
    FilterColumn {
        label: "Seniority",
        column: columns::SENIORITY,
    },
    FilterColumn {
        label: "Contract Type",
        column: columns::CONTRACT,
    },
    FilterColumn {
        label: "Company Size",
        column: columns::COMPANY_SIZE,
    },
];

// ---------------------------------------------------------------------------
// Filter selection: which values are accepted per column
// ---------------------------------------------------------------------------

/// Per-column accepted values: column_name → set of accepted values.
/// An absent column or an empty set means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    accepted: BTreeMap<String, BTreeSet<CellValue>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the accepted set of one column. An empty set lifts the restriction.
    pub fn set(&mut self, column: &str, values: BTreeSet<CellValue>) {
        if values.is_empty() {
            self.accepted.remove(column);
        } else {
            self.accepted.insert(column.to_string(), values);
        }
    }

    /// Builder form of [`FilterSelection::set`].
    pub fn with(mut self, column: &str, values: impl IntoIterator<Item = CellValue>) -> Self {
        self.set(column, values.into_iter().collect());
        self
    }

    pub fn toggle(&mut self, column: &str, value: &CellValue) {
        let mut values = self.accepted(column).cloned().unwrap_or_default();
        if !values.remove(value) {
            values.insert(value.clone());
        }
        self.set(column, values);
    }

    pub fn clear_column(&mut self, column: &str) {
        self.accepted.remove(column);
    }

    pub fn clear(&mut self) {
        self.accepted.clear();
    }

    /// Accepted values of a restricted column, `None` when unrestricted.
    pub fn accepted(&self, column: &str) -> Option<&BTreeSet<CellValue>> {
        self.accepted.get(column)
    }

    /// Whether no column is restricted.
    pub fn is_unrestricted(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Whether `record` passes every active column predicate.
    pub fn matches(&self, record: &SalaryRecord) -> bool {
        self.accepted
            .iter()
            .all(|(col, values)| values.contains(&record.value(col)))
    }
}

// ---------------------------------------------------------------------------
// Filter operations
// ---------------------------------------------------------------------------

/// Sorted distinct values of `column`, for populating filter choices.
pub fn available_values<R: Borrow<SalaryRecord>>(
    records: &[R],
    column: &str,
) -> BTreeSet<CellValue> {
    records.iter().map(|r| as_record(r).value(column)).collect()
}

/// Return indices of records that pass all active filters, in input order.
pub fn filtered_indices<R: Borrow<SalaryRecord>>(
    records: &[R],
    selection: &FilterSelection,
) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(as_record(*r)))
        .map(|(i, _)| i)
        .collect()
}

/// Stable filter: the records passing `selection`, in their original order.
pub fn apply<'a, R: Borrow<SalaryRecord>>(
    records: &'a [R],
    selection: &FilterSelection,
) -> Vec<&'a SalaryRecord> {
    records
        .iter()
        .map(as_record)
        .filter(|r| selection.matches(r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i64, seniority: &str, title: &str) -> SalaryRecord {
        let mut fields = BTreeMap::new();
        fields.insert(columns::YEAR.to_string(), CellValue::Integer(year));
        fields.insert(columns::SENIORITY.to_string(), CellValue::from(seniority));
        fields.insert(columns::TITLE.to_string(), CellValue::from(title));
        SalaryRecord {
            fields,
            salary_converted: 1.0,
            title_display: title.to_string(),
        }
    }

    fn sample() -> Vec<SalaryRecord> {
        vec![
            record(2024, "senior", "A"),
            record(2023, "junior", "B"),
            record(2023, "senior", "C"),
            record(2022, "pleno", "D"),
        ]
    }

    #[test]
    fn available_values_sorted_and_distinct() {
        let recs = sample();
        let years: Vec<_> = available_values(&recs, columns::YEAR).into_iter().collect();
        assert_eq!(
            years,
            vec![
                CellValue::Integer(2022),
                CellValue::Integer(2023),
                CellValue::Integer(2024)
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_outputs() {
        let recs: Vec<SalaryRecord> = Vec::new();
        assert!(available_values(&recs, columns::YEAR).is_empty());
        let sel = FilterSelection::new().with(columns::YEAR, [CellValue::Integer(2023)]);
        assert!(apply(&recs, &sel).is_empty());
    }

    #[test]
    fn unrestricted_selection_returns_input_in_order() {
        let recs = sample();
        let mut sel = FilterSelection::new()
            .with(columns::YEAR, [CellValue::Integer(2023)])
            .with(columns::SENIORITY, [CellValue::from("senior")]);
        for fc in FILTER_COLUMNS {
            sel.set(fc.column, BTreeSet::new());
        }
        assert!(sel.is_unrestricted());
        let out = apply(&recs, &sel);
        assert_eq!(out, recs.iter().collect::<Vec<_>>());
        assert_eq!(filtered_indices(&recs, &sel), vec![0, 1, 2, 3]);
        assert_eq!(apply(&recs, &FilterSelection::new()), out);
    }

    #[test]
    fn or_within_column_and_across_columns() {
        let recs = sample();
        let sel = FilterSelection::new()
            .with(
                columns::YEAR,
                [CellValue::Integer(2023), CellValue::Integer(2024)],
            )
            .with(columns::SENIORITY, [CellValue::from("senior")]);
        let titles: Vec<_> = apply(&recs, &sel)
            .iter()
            .map(|r| r.title_display.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(filtered_indices(&recs, &sel), vec![0, 2]);
    }

    #[test]
    fn apply_is_idempotent() {
        let recs = sample();
        let selections = [
            FilterSelection::new(),
            FilterSelection::new().with(columns::YEAR, [CellValue::Integer(2023)]),
            FilterSelection::new()
                .with(
                    columns::YEAR,
                    [CellValue::Integer(2022), CellValue::Integer(2024)],
                )
                .with(
                    columns::SENIORITY,
                    [CellValue::from("senior"), CellValue::from("pleno")],
                ),
            FilterSelection::new().with(columns::YEAR, [CellValue::Integer(1999)]),
            FilterSelection::new().with(columns::CONTRACT, [CellValue::Null]),
        ];
        for sel in &selections {
            let once = apply(&recs, sel);
            let twice = apply(&once, sel);
            assert_eq!(once, twice, "{sel:?}");
        }
    }

    #[test]
    fn missing_column_only_passes_when_null_accepted() {
        let recs = sample();
        let sel = FilterSelection::new().with(columns::CONTRACT, [CellValue::from("FT")]);
        assert!(apply(&recs, &sel).is_empty());
        let sel = FilterSelection::new().with(columns::CONTRACT, [CellValue::Null]);
        assert_eq!(apply(&recs, &sel).len(), recs.len());
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut sel = FilterSelection::new();
        sel.toggle(columns::YEAR, &CellValue::Integer(2023));
        assert_eq!(sel.accepted(columns::YEAR).map(|s| s.len()), Some(1));
        sel.toggle(columns::YEAR, &CellValue::Integer(2023));
        assert!(sel.accepted(columns::YEAR).is_none());
    }
}
