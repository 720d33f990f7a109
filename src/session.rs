use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::DashboardConfig;
use crate::data::aggregate::{self, HistogramBucket};
use crate::data::filter::{self, FilterColumn, FilterSelection, FILTER_COLUMNS};
use crate::data::model::{columns, CellValue, SalaryDataset, SalaryRecord};
use crate::data::{loader, prepare, translate::TitleTranslator};
use crate::rate::{ExchangeRateApi, RateProvider, ResolvedRate};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// User interactions that change the filtered view.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Replace the accepted values of one column (empty = no restriction).
    SelectionChanged {
        column: String,
        values: BTreeSet<CellValue>,
    },
    /// Toggle one value of a column's selection.
    ValueToggled { column: String, value: CellValue },
    /// Drop every restriction.
    SelectionCleared,
}

// ---------------------------------------------------------------------------
// Aggregate result
// ---------------------------------------------------------------------------

/// Chart sizing knobs taken from the config.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub top_n: usize,
    pub histogram_buckets: usize,
    pub focus_title: String,
}

impl From<&DashboardConfig> for ViewSettings {
    fn from(cfg: &DashboardConfig) -> Self {
        Self {
            top_n: cfg.top_n,
            histogram_buckets: cfg.histogram_buckets,
            focus_title: cfg.focus_title.clone(),
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        (&DashboardConfig::default()).into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub record_count: usize,
    pub top_title: String,
}

/// Everything the presentation layer draws for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub metrics: Metrics,
    /// Ascending by mean, ready for a horizontal bar chart.
    pub top_titles: Vec<(CellValue, f64)>,
    pub salary_histogram: Vec<HistogramBucket>,
    /// `None` when the dataset has no remote-work column.
    pub remote_counts: Option<BTreeMap<CellValue, usize>>,
    /// Mean converted salary of the focus title per residence country.
    pub focus_by_country: BTreeMap<CellValue, f64>,
}

impl DashboardSnapshot {
    pub fn compute(records: &[&SalaryRecord], settings: &ViewSettings, has_remote: bool) -> Self {
        let metrics = Metrics {
            mean_salary: aggregate::mean_salary(records),
            max_salary: aggregate::max_salary(records),
            record_count: aggregate::count(records),
            top_title: aggregate::mode_title(records),
        };
        Self {
            metrics,
            top_titles: aggregate::top_n_by_mean(
                records,
                columns::TITLE_DISPLAY,
                columns::SALARY_CONVERTED,
                settings.top_n,
            ),
            salary_histogram: aggregate::histogram_buckets(
                records,
                columns::SALARY_CONVERTED,
                settings.histogram_buckets,
            ),
            remote_counts: has_remote.then(|| aggregate::category_counts(records, columns::REMOTE)),
            focus_by_country: aggregate::group_mean_by_key(
                records,
                |r| r.title_display == settings.focus_title,
                columns::RESIDENCE,
                columns::SALARY_CONVERTED,
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.record_count == 0
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One user's dashboard: shared read-only data plus this user's selection
/// and the views derived from it.
pub struct DashboardSession {
    dataset: Arc<SalaryDataset>,
    rate: ResolvedRate,
    settings: ViewSettings,
    /// Distinct values per filterable column, from the full dataset.
    filter_options: Vec<(FilterColumn, BTreeSet<CellValue>)>,

    selection: FilterSelection,
    /// Indices of records passing the current selection (cached).
    visible_indices: Vec<usize>,
    snapshot: DashboardSnapshot,
}

impl DashboardSession {
    pub fn new(dataset: Arc<SalaryDataset>, rate: ResolvedRate, settings: ViewSettings) -> Self {
        let filter_options = FILTER_COLUMNS
            .iter()
            .map(|fc| (*fc, filter::available_values(&dataset.records, fc.column)))
            .collect();
        let mut session = Self {
            visible_indices: Vec::new(),
            snapshot: DashboardSnapshot::compute(&[], &settings, false),
            dataset,
            rate,
            settings,
            filter_options,
            selection: FilterSelection::new(),
        };
        session.refilter();
        session
    }

    /// Resolve the rate, load and prepare the dataset. Any dataset problem
    /// is fatal; a rate failure only produces an advisory.
    pub fn start(config: &DashboardConfig) -> Result<Self> {
        let provider = RateProvider::with_fallback(
            ExchangeRateApi::new(
                &config.rate_endpoint,
                &config.base_currency,
                &config.target_currency,
            ),
            config.fallback_rate,
        );
        let rate = provider.resolve();

        let raw = loader::load(&config.dataset)
            .with_context(|| format!("loading dataset from {}", config.dataset))?;
        let dataset = prepare::prepare(&raw, rate.value, &TitleTranslator::default())
            .context("preparing dataset")?;

        Ok(Self::new(Arc::new(dataset), rate, config.into()))
    }

    /// Apply a user interaction and recompute the derived views.
    pub fn handle(&mut self, event: SessionEvent) {
        log::debug!("session event: {event:?}");
        match event {
            SessionEvent::SelectionChanged { column, values } => {
                self.selection.set(&column, values);
            }
            SessionEvent::ValueToggled { column, value } => {
                self.selection.toggle(&column, &value);
            }
            SessionEvent::SelectionCleared => self.selection.clear(),
        }
        self.refilter();
    }

    /// Recompute `visible_indices` and the snapshot after a selection change.
    fn refilter(&mut self) {
        self.visible_indices = filter::filtered_indices(&self.dataset.records, &self.selection);
        let records = self.filtered_records();
        let has_remote = self.dataset.has_column(columns::REMOTE);
        let snapshot = DashboardSnapshot::compute(&records, &self.settings, has_remote);
        self.snapshot = snapshot;
    }

    pub fn filtered_records(&self) -> Vec<&SalaryRecord> {
        self.visible_indices
            .iter()
            .map(|&i| &self.dataset.records[i])
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_indices.len()
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn filter_options(&self) -> &[(FilterColumn, BTreeSet<CellValue>)] {
        &self.filter_options
    }

    pub fn rate(&self) -> &ResolvedRate {
        &self.rate
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn dataset(&self) -> &Arc<SalaryDataset> {
        &self.dataset
    }

    /// Columns for the detail table: source columns only.
    pub fn table_columns(&self) -> &[String] {
        &self.dataset.column_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate::RateOrigin;

    fn record(year: i64, title: &str, salary: f64, remote: &str) -> SalaryRecord {
        let mut fields = BTreeMap::new();
        fields.insert(columns::YEAR.to_string(), CellValue::Integer(year));
        fields.insert(columns::REMOTE.to_string(), CellValue::from(remote));
        fields.insert(columns::RESIDENCE.to_string(), CellValue::from("BRA"));
        SalaryRecord {
            fields,
            salary_converted: salary,
            title_display: title.to_string(),
        }
    }

    fn session() -> DashboardSession {
        let dataset = SalaryDataset {
            records: vec![
                record(2023, "Cientista de Dados", 500.0, "remoto"),
                record(2023, "Analista de Dados", 1000.0, "presencial"),
                record(2024, "Cientista de Dados", 750.0, "remoto"),
            ],
            column_names: vec![
                columns::YEAR.into(),
                columns::REMOTE.into(),
                columns::RESIDENCE.into(),
            ],
            rate: 5.0,
        };
        let rate = ResolvedRate {
            value: 5.0,
            origin: RateOrigin::Live,
        };
        DashboardSession::new(Arc::new(dataset), rate, ViewSettings::default())
    }

    #[test]
    fn starts_unfiltered() {
        let s = session();
        assert_eq!(s.visible_count(), 3);
        assert_eq!(s.snapshot().metrics.record_count, 3);
        assert_eq!(s.snapshot().metrics.max_salary, 1000.0);
        let years = &s.filter_options()[0];
        assert_eq!(years.0.column, columns::YEAR);
        assert_eq!(years.1.len(), 2);
    }

    #[test]
    fn selection_change_recomputes_snapshot() {
        let mut s = session();
        s.handle(SessionEvent::SelectionChanged {
            column: columns::YEAR.into(),
            values: [CellValue::Integer(2024)].into_iter().collect(),
        });
        let snap = s.snapshot();
        assert_eq!(snap.metrics.record_count, 1);
        assert_eq!(snap.metrics.mean_salary, 750.0);
        assert_eq!(snap.metrics.top_title, "Cientista de Dados");
        assert_eq!(
            snap.remote_counts.as_ref().unwrap()[&CellValue::from("remoto")],
            1
        );
        assert_eq!(snap.focus_by_country[&CellValue::from("BRA")], 750.0);
    }

    #[test]
    fn no_match_gives_empty_snapshot() {
        let mut s = session();
        s.handle(SessionEvent::ValueToggled {
            column: columns::YEAR.into(),
            value: CellValue::Integer(1999),
        });
        let snap = s.snapshot();
        assert!(snap.is_empty());
        assert_eq!(snap.metrics.mean_salary, 0.0);
        assert_eq!(snap.metrics.top_title, "N/A");
        assert!(snap.top_titles.is_empty());
        assert!(snap.focus_by_country.is_empty());

        s.handle(SessionEvent::SelectionCleared);
        assert_eq!(s.visible_count(), 3);
    }
}
