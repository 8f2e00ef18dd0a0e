use std::sync::Arc;

use crate::core::error::Result;
use crate::features::reports::models::{MapPoint, Report};
use crate::modules::storage::CsvReportStore;

/// Service for the administrator dashboard
pub struct AdminService {
    store: Arc<CsvReportStore>,
}

impl AdminService {
    pub fn new(store: Arc<CsvReportStore>) -> Self {
        Self { store }
    }

    /// All reports in submission order
    pub async fn list_reports(&self) -> Result<Vec<Report>> {
        self.store.list_all().await
    }

    /// Coordinates of every report
    pub async fn map_points(&self) -> Result<Vec<MapPoint>> {
        let reports = self.store.list_all().await?;
        Ok(reports.iter().map(MapPoint::from).collect())
    }

    /// Delete every report. No undo.
    pub async fn clear_reports(&self) -> Result<bool> {
        let cleared = self.store.clear().await?;
        tracing::warn!(cleared, "Admin cleared all reports");
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::CreateReport;
    use crate::shared::test_helpers::temp_store;

    async fn seed(store: &CsvReportStore, issue: &str, latitude: f64, longitude: f64) {
        store
            .append(&Report::new(CreateReport {
                issue_text: issue.to_string(),
                location_text: "Patna".to_string(),
                latitude,
                longitude,
            }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_map_points_follow_reports() {
        let (_dir, store) = temp_store();
        seed(&store, "Pothole", 25.61, 85.12).await;
        seed(&store, "Garbage dump", 25.59, 85.16).await;
        let service = AdminService::new(store);

        let points = service.map_points().await.unwrap();
        assert_eq!(
            points,
            vec![
                MapPoint {
                    latitude: 25.61,
                    longitude: 85.12
                },
                MapPoint {
                    latitude: 25.59,
                    longitude: 85.16
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_clear_then_list_is_empty() {
        let (_dir, store) = temp_store();
        seed(&store, "Pothole", 25.61, 85.12).await;
        let service = AdminService::new(store);

        assert_eq!(service.list_reports().await.unwrap().len(), 1);
        assert!(service.clear_reports().await.unwrap());
        assert!(service.list_reports().await.unwrap().is_empty());
        assert!(service.map_points().await.unwrap().is_empty());
        assert!(!service.clear_reports().await.unwrap());
    }
}
