/// Data layer: core types, loading, preparation, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet  (local path or URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse source → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ prepare  │  usd × rate, translate(cargo) → SalaryDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  apply FilterSelection → filtered records
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  metrics, top-N, histogram, counts, group means
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod prepare;
pub mod translate;
