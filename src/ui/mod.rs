//! egui rendering of a [`crate::session::DashboardSession`].

pub mod charts;
pub mod format;
pub mod panels;
pub mod table;
