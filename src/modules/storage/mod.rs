//! Storage module for report persistence
//!
//! Reports live in a single append-only CSV file.

mod csv_store;

pub use csv_store::CsvReportStore;
