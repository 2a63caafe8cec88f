//! CSV export of aggregate tables and raw datasets

use crate::analytics::{Summaries, TimeSeries};
use crate::dataset::Dataset;
use crate::error::DashboardResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const REVENUE_SUMMARY_FILE: &str = "revenue_summary.csv";
pub const ACTIVITY_SUMMARY_FILE: &str = "activity_summary.csv";
pub const SOCIAL_SUMMARY_FILE: &str = "social_summary.csv";
pub const KPI_SUMMARY_FILE: &str = "partner_complete_kpi_summary.csv";
pub const REVENUE_SERIES_FILE: &str = "revenue_time_series.csv";
pub const ACTIVITY_SERIES_FILE: &str = "activity_time_series.csv";
pub const SOCIAL_SERIES_FILE: &str = "social_time_series.csv";

pub const PARTNERS_FILE: &str = "partners.csv";
pub const SALES_FILE: &str = "sales.csv";
pub const ACTIVITY_FILE: &str = "activity.csv";
pub const SOCIAL_FILE: &str = "social.csv";

/// Serialize rows with a header line to any writer
///
/// An empty slice still produces a valid, empty file.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> DashboardResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string<T: Serialize>(rows: &[T]) -> DashboardResult<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn write_csv_file<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> DashboardResult<PathBuf> {
    let path = path.as_ref();
    write_csv(File::create(path)?, rows)?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path.to_path_buf())
}

pub fn read_csv<T: DeserializeOwned>(path: impl AsRef<Path>) -> DashboardResult<Vec<T>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Write the seven summary tables into `dir`, creating it when needed.
/// Returns the written paths in a fixed order.
pub fn export_summaries(
    dir: impl AsRef<Path>,
    summaries: &Summaries,
    series: &TimeSeries,
) -> DashboardResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let written = vec![
        write_csv_file(dir.join(REVENUE_SUMMARY_FILE), &summaries.revenue)?,
        write_csv_file(dir.join(ACTIVITY_SUMMARY_FILE), &summaries.activity)?,
        write_csv_file(dir.join(SOCIAL_SUMMARY_FILE), &summaries.social)?,
        write_csv_file(dir.join(KPI_SUMMARY_FILE), &summaries.kpi)?,
        write_csv_file(dir.join(REVENUE_SERIES_FILE), &series.revenue)?,
        write_csv_file(dir.join(ACTIVITY_SERIES_FILE), &series.activity)?,
        write_csv_file(dir.join(SOCIAL_SERIES_FILE), &series.social)?,
    ];
    info!("Exported {} summary tables to {}", written.len(), dir.display());
    Ok(written)
}

/// Write the partner table (in upload format) and the three fact tables
pub fn export_dataset(dir: impl AsRef<Path>, dataset: &Dataset) -> DashboardResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let written = vec![
        write_csv_file(dir.join(PARTNERS_FILE), &dataset.partners)?,
        write_csv_file(dir.join(SALES_FILE), &dataset.sales)?,
        write_csv_file(dir.join(ACTIVITY_FILE), &dataset.activity)?,
        write_csv_file(dir.join(SOCIAL_FILE), &dataset.social)?,
    ];
    info!("Exported raw dataset ({} partners) to {}", dataset.partners.len(), dir.display());
    Ok(written)
}
