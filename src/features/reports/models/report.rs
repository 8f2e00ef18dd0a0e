use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Report status as stored in the `Status` column
///
/// Reports are created as `Pending`; nothing transitions them afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReportStatus {
    #[default]
    Pending,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "Pending"),
        }
    }
}

/// One row of the report file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "Date", with = "report_date")]
    pub date_time: NaiveDateTime,
    #[serde(rename = "Issue")]
    pub issue_text: String,
    #[serde(rename = "Location")]
    pub location_text: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Status")]
    pub status: ReportStatus,
}

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub issue_text: String,
    pub location_text: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Report {
    /// Build a pending report stamped with the current local time
    pub fn new(data: CreateReport) -> Self {
        // The file keeps minute precision
        let now = chrono::Local::now().naive_local();
        let date_time = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);

        Self {
            date_time,
            issue_text: data.issue_text,
            location_text: data.location_text,
            latitude: data.latitude,
            longitude: data.longitude,
            status: ReportStatus::Pending,
        }
    }
}

/// Coordinates of a report for the map overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Report> for MapPoint {
    fn from(r: &Report) -> Self {
        Self {
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

/// `Date` column codec, minute precision
mod report_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::shared::constants::REPORT_DATE_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(REPORT_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), REPORT_DATE_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}
