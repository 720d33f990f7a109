use crate::error::DataError;

use super::model::{columns, CellValue, RawTable, SalaryDataset, SalaryRecord};
use super::translate::TitleTranslator;

/// Derive the converted salary and display title for every row.
///
/// The source table is left untouched. Missing `usd` / `cargo` columns or a
/// non-numeric salary cell abort preparation: the dashboard cannot be shown
/// without them.
pub fn prepare(
    raw: &RawTable,
    rate: f64,
    translator: &TitleTranslator,
) -> Result<SalaryDataset, DataError> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(DataError::InvalidRate(rate));
    }
    for required in columns::REQUIRED {
        if !raw.has_column(required) {
            return Err(DataError::MissingColumn(required.to_string()));
        }
    }

    let records = raw
        .rows
        .iter()
        .enumerate()
        .map(|(row, fields)| {
            // NaN / inf parse as floats but are not salaries.
            let usd = match fields.get(columns::SALARY_USD) {
                Some(cell) => cell
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| DataError::NonNumeric {
                        row,
                        column: columns::SALARY_USD.to_string(),
                        value: cell.to_string(),
                    })?,
                None => {
                    return Err(DataError::NonNumeric {
                        row,
                        column: columns::SALARY_USD.to_string(),
                        value: CellValue::Null.to_string(),
                    })
                }
            };
            // Titles that parsed as numbers still get a display string.
            let raw_title = match fields.get(columns::TITLE) {
                Some(CellValue::String(s)) => s.clone(),
                Some(CellValue::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };

            Ok(SalaryRecord {
                fields: fields.clone(),
                salary_converted: usd * rate,
                title_display: translator.translate(&raw_title).to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "Prepared {} records at rate {rate:.4} ({} columns)",
        records.len(),
        raw.columns.len()
    );

    Ok(SalaryDataset {
        records,
        column_names: raw.columns.clone(),
        rate,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn table(rows: &[(&str, CellValue)]) -> RawTable {
        RawTable {
            columns: vec![columns::TITLE.into(), columns::SALARY_USD.into()],
            rows: rows
                .iter()
                .map(|(title, usd)| {
                    let mut row = BTreeMap::new();
                    row.insert(columns::TITLE.to_string(), CellValue::from(*title));
                    row.insert(columns::SALARY_USD.to_string(), usd.clone());
                    row
                })
                .collect(),
        }
    }

    #[test]
    fn converted_salary_is_usd_times_rate() {
        let raw = table(&[
            ("Data Scientist", CellValue::Integer(100)),
            ("Data Analyst", CellValue::Float(200.5)),
            ("Unknown Role", CellValue::Integer(0)),
        ]);
        for rate in [0.5, 1.0, 5.44, 123.456] {
            let ds = prepare(&raw, rate, &TitleTranslator::default()).unwrap();
            for (rec, row) in ds.records.iter().zip(&raw.rows) {
                let usd = row[columns::SALARY_USD].as_f64().unwrap();
                assert_eq!(rec.salary_converted, usd * rate);
            }
            assert_eq!(ds.rate, rate);
        }
    }

    #[test]
    fn titles_are_translated_and_source_kept() {
        let raw = table(&[
            ("Data Scientist", CellValue::Integer(1)),
            ("Unknown Role", CellValue::Integer(1)),
        ]);
        let before = raw.clone();
        let ds = prepare(&raw, 2.0, &TitleTranslator::default()).unwrap();

        assert_eq!(ds.records[0].title_display, "Cientista de Dados");
        assert_eq!(ds.records[1].title_display, "Unknown Role");
        assert_eq!(ds.records[0].raw_title(), Some("Data Scientist"));
        assert_eq!(raw, before);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let mut raw = table(&[("Data Scientist", CellValue::Integer(1))]);
        raw.columns.retain(|c| c != columns::SALARY_USD);
        let err = prepare(&raw, 1.0, &TitleTranslator::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "usd"));

        let raw = RawTable {
            columns: vec![columns::SALARY_USD.into()],
            rows: Vec::new(),
        };
        let err = prepare(&raw, 1.0, &TitleTranslator::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "cargo"));
    }

    #[test]
    fn non_numeric_salary_is_fatal() {
        let raw = table(&[
            ("Data Scientist", CellValue::Integer(1)),
            ("Data Analyst", CellValue::from("lots")),
        ]);
        let err = prepare(&raw, 1.0, &TitleTranslator::default()).unwrap_err();
        assert!(matches!(err, DataError::NonNumeric { row: 1, .. }));
    }

    #[test]
    fn non_finite_salary_is_fatal() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let raw = table(&[
                ("Data Scientist", CellValue::Integer(100)),
                ("Data Analyst", CellValue::Float(bad)),
            ]);
            let err = prepare(&raw, 5.0, &TitleTranslator::default()).unwrap_err();
            assert!(
                matches!(err, DataError::NonNumeric { row: 1, ref column, .. } if column == columns::SALARY_USD),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn nan_salary_from_csv_is_fatal() {
        let csv = "cargo,usd\nData Scientist,100\nData Analyst,NaN\nData Engineer,inf\n";
        let raw = crate::data::loader::read_csv(csv.as_bytes()).unwrap();
        let err = prepare(&raw, 5.0, &TitleTranslator::default()).unwrap_err();
        assert!(matches!(err, DataError::NonNumeric { row: 1, .. }));
    }

    #[test]
    fn rejects_non_positive_rate() {
        let raw = table(&[]);
        assert!(matches!(
            prepare(&raw, 0.0, &TitleTranslator::default()),
            Err(DataError::InvalidRate(_))
        ));
        assert!(prepare(&raw, f64::NAN, &TitleTranslator::default()).is_err());
    }

    #[test]
    fn empty_table_prepares_to_empty_dataset() {
        let ds = prepare(&table(&[]), 5.0, &TitleTranslator::default()).unwrap();
        assert!(ds.is_empty());
    }
}
