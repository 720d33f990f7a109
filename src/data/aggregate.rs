//! Reducers over a (filtered) record set.
//!
//! Every function here is total: an empty input produces a well-defined
//! zero / empty / sentinel result so the UI can draw a placeholder instead
//! of failing.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};

use super::model::{as_record, CellValue, SalaryRecord};

/// Shown by [`mode_title`] when there is nothing to count.
pub const NO_TITLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Scalar metrics
// ---------------------------------------------------------------------------

/// Mean converted salary, `0.0` for an empty input.
pub fn mean_salary<R: Borrow<SalaryRecord>>(records: &[R]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: f64 = records.iter().map(|r| as_record(r).salary_converted).sum();
    total / records.len() as f64
}

/// Highest converted salary, `0.0` for an empty input.
pub fn max_salary<R: Borrow<SalaryRecord>>(records: &[R]) -> f64 {
    records
        .iter()
        .map(|r| as_record(r).salary_converted)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

pub fn count<R: Borrow<SalaryRecord>>(records: &[R]) -> usize {
    records.len()
}

/// Most frequent display title. Ties go to the title seen first.
pub fn mode_title<R: Borrow<SalaryRecord>>(records: &[R]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for r in records {
        let title = as_record(r).title_display.as_str();
        let n = counts.entry(title).or_insert(0);
        if *n == 0 {
            order.push(title);
        }
        *n += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for title in order {
        let n = counts[title];
        if best.map_or(true, |(_, m)| n > m) {
            best = Some((title, n));
        }
    }
    best.map_or_else(|| NO_TITLE.to_string(), |(t, _)| t.to_string())
}

// ---------------------------------------------------------------------------
// Grouped aggregates
// ---------------------------------------------------------------------------

/// Running sum / count for one group.
#[derive(Debug, Clone, Copy, Default)]
struct MeanAcc {
    sum: f64,
    n: usize,
}

impl MeanAcc {
    fn push(&mut self, v: f64) {
        self.sum += v;
        self.n += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.n as f64
    }
}

fn group_means<'a, I>(
    records: I,
    group_column: &str,
    value_column: &str,
) -> BTreeMap<CellValue, f64>
where
    I: IntoIterator<Item = &'a SalaryRecord>,
{
    let mut groups: BTreeMap<CellValue, MeanAcc> = BTreeMap::new();
    for r in records {
        // Rows without a numeric value do not contribute a group.
        let Some(v) = r.numeric(value_column) else {
            continue;
        };
        groups.entry(r.value(group_column)).or_default().push(v);
    }
    groups.into_iter().map(|(k, acc)| (k, acc.mean())).collect()
}

/// The `n` groups with the highest mean of `value_column`, returned in
/// ascending order of mean (lowest first) for a horizontal bar chart.
/// Equal means are ordered by group key.
pub fn top_n_by_mean<R: Borrow<SalaryRecord>>(
    records: &[R],
    group_column: &str,
    value_column: &str,
    n: usize,
) -> Vec<(CellValue, f64)> {
    let mut means: Vec<(CellValue, f64)> =
        group_means(records.iter().map(as_record), group_column, value_column)
            .into_iter()
            .collect();

    means.sort_by(|(ka, a), (kb, b)| b.total_cmp(a).then_with(|| ka.cmp(kb)));
    means.truncate(n);
    means.sort_by(|(ka, a), (kb, b)| a.total_cmp(b).then_with(|| ka.cmp(kb)));
    means
}

/// Per-group mean over the records accepted by `predicate`. Groups without
/// any matching record are absent from the result.
pub fn group_mean_by_key<R, P>(
    records: &[R],
    predicate: P,
    group_column: &str,
    value_column: &str,
) -> BTreeMap<CellValue, f64>
where
    R: Borrow<SalaryRecord>,
    P: Fn(&SalaryRecord) -> bool,
{
    group_means(
        records.iter().map(as_record).filter(|r| predicate(*r)),
        group_column,
        value_column,
    )
}

/// Frequency of each value of `column`.
pub fn category_counts<R: Borrow<SalaryRecord>>(
    records: &[R],
    column: &str,
) -> BTreeMap<CellValue, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(as_record(r).value(column)).or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One equal-width histogram bin covering `[start, end)`; the last bin is
/// closed on the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBucket {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBucket {
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width buckets spanning `[min, max]` of `value_column`.
///
/// With no numeric values, or when every value is the same, everything lands
/// in a single bucket (`[0, 0]` with count 0 for no values).
pub fn histogram_buckets<R: Borrow<SalaryRecord>>(
    records: &[R],
    value_column: &str,
    bucket_count: usize,
) -> Vec<HistogramBucket> {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| as_record(r).numeric(value_column))
        .filter(|v| v.is_finite())
        .collect();

    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return vec![HistogramBucket {
            start: 0.0,
            end: 0.0,
            count: 0,
        }];
    };

    let bucket_count = bucket_count.max(1);
    if min == max || bucket_count == 1 {
        return vec![HistogramBucket {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bucket_count as f64;
    let mut buckets: Vec<HistogramBucket> = (0..bucket_count)
        .map(|i| HistogramBucket {
            start: min + width * i as f64,
            end: if i + 1 == bucket_count {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in values {
        let idx = (((v - min) / width).floor() as usize).min(bucket_count - 1);
        buckets[idx].count += 1;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::columns;

    fn rec(title: &str, salary: f64, country: &str) -> SalaryRecord {
        let mut fields = BTreeMap::new();
        fields.insert(columns::RESIDENCE.to_string(), CellValue::from(country));
        SalaryRecord {
            fields,
            salary_converted: salary,
            title_display: title.to_string(),
        }
    }

    fn empty() -> Vec<SalaryRecord> {
        Vec::new()
    }

    #[test]
    fn scalar_metrics_are_zero_on_empty_input() {
        assert_eq!(mean_salary(&empty()), 0.0);
        assert_eq!(max_salary(&empty()), 0.0);
        assert_eq!(count(&empty()), 0);
        assert_eq!(mode_title(&empty()), "N/A");
    }

    #[test]
    fn scalar_metrics() {
        let recs = vec![rec("A", 100.0, "BRA"), rec("B", 300.0, "USA")];
        assert_eq!(mean_salary(&recs), 200.0);
        assert_eq!(max_salary(&recs), 300.0);
        assert_eq!(count(&recs), 2);
    }

    #[test]
    fn mode_prefers_highest_count_then_first_seen() {
        let recs = vec![rec("B", 1.0, "X"), rec("A", 1.0, "X"), rec("A", 1.0, "X")];
        assert_eq!(mode_title(&recs), "A");

        let tie = vec![rec("B", 1.0, "X"), rec("A", 1.0, "X")];
        assert_eq!(mode_title(&tie), "B");
    }

    #[test]
    fn top_n_is_bounded_and_ascending() {
        let recs = vec![
            rec("low", 10.0, "X"),
            rec("mid", 50.0, "X"),
            rec("high", 90.0, "X"),
            rec("high", 110.0, "X"),
            rec("tiny", 1.0, "X"),
        ];
        let top = top_n_by_mean(&recs, columns::TITLE_DISPLAY, columns::SALARY_CONVERTED, 3);
        assert_eq!(
            top,
            vec![
                (CellValue::from("low"), 10.0),
                (CellValue::from("mid"), 50.0),
                (CellValue::from("high"), 100.0),
            ]
        );
        assert!(top.windows(2).all(|w| w[0].1 <= w[1].1));

        let by_title = |recs: &[SalaryRecord], n| {
            top_n_by_mean(recs, columns::TITLE_DISPLAY, columns::SALARY_CONVERTED, n)
        };
        assert_eq!(by_title(&recs, 10).len(), 4);
        assert!(by_title(&recs, 0).is_empty());
        assert!(by_title(&empty(), 5).is_empty());
    }

    #[test]
    fn top_n_ties_follow_key_order() {
        let recs = vec![
            rec("c", 10.0, "X"),
            rec("a", 10.0, "X"),
            rec("b", 10.0, "X"),
        ];
        let top = top_n_by_mean(&recs, columns::TITLE_DISPLAY, columns::SALARY_CONVERTED, 2);
        assert_eq!(
            top,
            vec![(CellValue::from("a"), 10.0), (CellValue::from("b"), 10.0)]
        );
    }

    #[test]
    fn histogram_equal_width() {
        let recs: Vec<_> = [0.0, 1.0, 2.0, 3.0, 4.0, 10.0]
            .iter()
            .map(|&v| rec("t", v, "X"))
            .collect();
        let buckets = histogram_buckets(&recs, columns::SALARY_CONVERTED, 5);
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0].start, 0.0);
        assert_eq!(buckets[4].end, 10.0);
        let counts: Vec<_> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 2, 1, 0, 1]);
        assert!(buckets.iter().all(|b| (b.width() - 2.0).abs() < 1e-9));
    }

    #[test]
    fn histogram_degenerate_inputs_use_one_bucket() {
        let same = vec![rec("t", 7.0, "X"), rec("t", 7.0, "X")];
        let buckets = histogram_buckets(&same, columns::SALARY_CONVERTED, 30);
        assert_eq!(
            buckets,
            vec![HistogramBucket {
                start: 7.0,
                end: 7.0,
                count: 2
            }]
        );

        let buckets = histogram_buckets(&empty(), columns::SALARY_CONVERTED, 30);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 0);
    }

    #[test]
    fn category_counts_tally_values() {
        let recs = vec![rec("a", 1.0, "BRA"), rec("b", 1.0, "USA"), rec("c", 1.0, "BRA")];
        let counts = category_counts(&recs, columns::RESIDENCE);
        assert_eq!(counts[&CellValue::from("BRA")], 2);
        assert_eq!(counts[&CellValue::from("USA")], 1);
        assert!(category_counts(&empty(), columns::RESIDENCE).is_empty());
    }

    #[test]
    fn group_mean_by_key_skips_unmatched_groups() {
        let recs = vec![
            rec("ds", 100.0, "BRA"),
            rec("ds", 300.0, "BRA"),
            rec("da", 999.0, "USA"),
            rec("ds", 50.0, "DEU"),
        ];
        let by_country = group_mean_by_key(
            &recs,
            |r| r.title_display == "ds",
            columns::RESIDENCE,
            columns::SALARY_CONVERTED,
        );
        assert_eq!(by_country.len(), 2);
        assert_eq!(by_country[&CellValue::from("BRA")], 200.0);
        assert_eq!(by_country[&CellValue::from("DEU")], 50.0);
        assert!(!by_country.contains_key(&CellValue::from("USA")));
    }
}
