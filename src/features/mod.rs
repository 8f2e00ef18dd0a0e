pub mod admin;
pub mod reports;
