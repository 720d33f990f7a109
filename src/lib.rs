//! Salary dashboard: load the public data-industry salary table, convert
//! salaries with a live exchange rate, translate job titles, and explore the
//! result through filters, summary metrics and charts.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod rate;
pub mod session;
pub mod ui;

pub use config::DashboardConfig;
pub use error::DataError;
pub use session::{DashboardSession, DashboardSnapshot, SessionEvent};
