//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for storage backends.

pub mod storage;
