//! Append-only CSV report file
//!
//! Layout: header `Date,Issue,Location,Latitude,Longitude,Status`, written
//! when the file is created, followed by one row per accepted report.
//! Rows are never rewritten; the only destructive operation removes the
//! whole file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::reports::models::Report;

/// CSV-backed report store
///
/// All file access goes through one async mutex, so writers in this process
/// never interleave rows. Separate processes sharing the file get no guard.
pub struct CsvReportStore {
    path: Arc<PathBuf>,
    lock: Mutex<()>,
}

impl CsvReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one report, creating the file with its header if absent
    pub async fn append(&self, report: &Report) -> Result<()> {
        let _guard = self.lock.lock().await;
        let path = Arc::clone(&self.path);
        let report = report.clone();

        run_blocking(move || append_row(&path, &report)).await?;

        info!(file = %self.path.display(), "Report appended");
        Ok(())
    }

    /// Read every report in file order; an absent file is an empty collection
    pub async fn list_all(&self) -> Result<Vec<Report>> {
        let _guard = self.lock.lock().await;
        let path = Arc::clone(&self.path);

        let reports = run_blocking(move || read_rows(&path)).await?;

        debug!(
            file = %self.path.display(),
            count = reports.len(),
            "Reports loaded"
        );
        Ok(reports)
    }

    /// Remove the whole file. Returns whether there was anything to remove.
    pub async fn clear(&self) -> Result<bool> {
        let _guard = self.lock.lock().await;

        match tokio::fs::remove_file(self.path.as_path()).await {
            Ok(()) => {
                info!(file = %self.path.display(), "Report file cleared");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Storage task failed: {}", e)))?
}

fn append_row(path: &Path, report: &Report) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let needs_header = match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => return Err(e.into()),
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);

    writer.serialize(report)?;
    writer.flush()?;
    Ok(())
}

fn read_rows(path: &Path) -> Result<Vec<Report>> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    reader
        .deserialize::<Report>()
        .map(|row| row.map_err(AppError::from))
        .collect()
}
