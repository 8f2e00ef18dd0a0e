use serde::{Deserialize, Serialize};

/// First forward-geocoding match for a free-text place name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedLocation {
    /// Normalized address as returned by the geocoder
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}
