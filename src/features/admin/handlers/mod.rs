pub mod admin_handlers;

pub use admin_handlers::{clear_reports, get_map_points, list_reports};
