//! Report output for finished runs

pub mod csv;

pub use csv::{default_report_path, write_report};
