pub mod report_handler;

pub use report_handler::{geocode_location, submit_report};
