use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::MapPoint;

/// One marker on the issue hotspot map
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct MapPointDto {
    pub lat: f64,
    pub lon: f64,
}

impl From<MapPoint> for MapPointDto {
    fn from(p: MapPoint) -> Self {
        Self {
            lat: p.latitude,
            lon: p.longitude,
        }
    }
}

/// Result of wiping the report file
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClearReportsResponseDto {
    /// False when there was no report file to delete
    pub cleared: bool,
}
