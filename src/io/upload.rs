//! Partner table upload
//!
//! Parses a partner CSV into typed [`Partner`] rows and checks that the result
//! is a single-rooted tree. The first problem found rejects the whole file;
//! the diagnostic names the 1-based data row (0 for header problems).

use crate::error::{DashboardError, DashboardResult};
use crate::hierarchy::validate_tree;
use crate::model::{
    Level, Partner, PartnerId, Status, ADVOCACY_MAX, ADVOCACY_MIN, ENGAGEMENT_MAX, ENGAGEMENT_MIN,
    SENTIMENT_MAX, SENTIMENT_MIN,
};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns every uploaded partner file must carry, in export order
pub const PARTNER_COLUMNS: [&str; 12] = [
    "partner_id",
    "name",
    "level",
    "parent_id",
    "join_date",
    "status",
    "posts",
    "shares",
    "sentiment",
    "advocacy_score",
    "engagement",
    "total_revenue",
];

/// Read and validate a partner table from any reader
pub fn read_partners<R: Read>(reader: R) -> DashboardResult<Vec<Partner>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers().map_err(|e| reject(0, e.to_string()))?.clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut partners = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| reject(row, e.to_string()))?;
        partners.push(columns.parse_row(row, &record)?);
    }
    debug!("Parsed {} partner rows", partners.len());

    if let Err(e) = validate_tree(&partners) {
        warn!("Uploaded partner table rejected: {}", e);
        return Err(e.into());
    }

    info!("Accepted partner upload with {} partners", partners.len());
    Ok(partners)
}

pub fn read_partners_file(path: impl AsRef<Path>) -> DashboardResult<Vec<Partner>> {
    let path = path.as_ref();
    debug!("Reading partner table from {}", path.display());
    read_partners(File::open(path)?)
}

fn reject(row: usize, message: impl Into<String>) -> DashboardError {
    DashboardError::Upload { row, message: message.into() }
}

/// Header name to field position
struct ColumnMap {
    index: [usize; PARTNER_COLUMNS.len()],
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> DashboardResult<Self> {
        let mut index = [0usize; PARTNER_COLUMNS.len()];
        for (slot, column) in index.iter_mut().zip(PARTNER_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(column))
                .ok_or_else(|| reject(0, format!("missing column '{}'", column)))?;
        }
        Ok(ColumnMap { index })
    }

    fn field<'r>(&self, record: &'r StringRecord, column: usize) -> &'r str {
        record.get(self.index[column]).unwrap_or("")
    }

    fn parse_row(&self, row: usize, record: &StringRecord) -> DashboardResult<Partner> {
        let cell = |c: usize| Cell { row, column: PARTNER_COLUMNS[c], raw: self.field(record, c) };

        let partner_id = cell(0).integer()?;
        if partner_id == 0 {
            return Err(cell(0).out_of_range(">= 1"));
        }
        let parent_id = cell(3).optional_integer()?;
        if parent_id == Some(0) {
            return Err(cell(3).out_of_range(">= 1"));
        }

        let name = cell(1).raw.to_string();
        if name.is_empty() {
            return Err(reject(row, "empty name"));
        }

        let sentiment = cell(8).float()?;
        if !(SENTIMENT_MIN..=SENTIMENT_MAX).contains(&sentiment) {
            return Err(cell(8).out_of_range("[-1, 1]"));
        }
        let advocacy_score = cell(9).count()?;
        if !(ADVOCACY_MIN..=ADVOCACY_MAX).contains(&advocacy_score) {
            return Err(cell(9).out_of_range("[1, 100]"));
        }
        let engagement = cell(10).count()?;
        if !(ENGAGEMENT_MIN..=ENGAGEMENT_MAX).contains(&engagement) {
            return Err(cell(10).out_of_range("[1, 100]"));
        }
        let total_revenue = cell(11).float()?;
        if total_revenue < 0.0 {
            return Err(cell(11).out_of_range(">= 0"));
        }

        Ok(Partner {
            partner_id: PartnerId(partner_id),
            name,
            level: cell(2).parse::<Level>()?,
            parent_id: parent_id.map(PartnerId),
            join_date: cell(4).date()?,
            status: cell(5).parse::<Status>()?,
            posts: cell(6).count()?,
            shares: cell(7).count()?,
            sentiment,
            advocacy_score,
            engagement,
            total_revenue,
        })
    }
}

/// One raw field with enough context to report a rejection
struct Cell<'r> {
    row: usize,
    column: &'static str,
    raw: &'r str,
}

impl Cell<'_> {
    fn invalid(&self, what: &str) -> DashboardError {
        reject(self.row, format!("{} '{}' is not {}", self.column, self.raw, what))
    }

    fn out_of_range(&self, range: &str) -> DashboardError {
        reject(self.row, format!("{} {} is outside {}", self.column, self.raw, range))
    }

    /// Non-negative integer; integral floats such as `7.0` are accepted
    fn integer(&self) -> DashboardResult<u64> {
        if let Ok(v) = self.raw.parse::<u64>() {
            return Ok(v);
        }
        match self.raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(v as u64),
            _ => Err(self.invalid("a non-negative integer")),
        }
    }

    fn count(&self) -> DashboardResult<u32> {
        u32::try_from(self.integer()?).map_err(|_| self.out_of_range("the u32 range"))
    }

    /// Empty and `nan` mean "no value"
    fn optional_integer(&self) -> DashboardResult<Option<u64>> {
        if self.raw.is_empty() || self.raw.eq_ignore_ascii_case("nan") || self.raw.eq_ignore_ascii_case("none") {
            Ok(None)
        } else {
            self.integer().map(Some)
        }
    }

    fn float(&self) -> DashboardResult<f64> {
        match self.raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.invalid("a finite number")),
        }
    }

    /// `YYYY-MM-DD`, optionally followed by a time of day
    fn date(&self) -> DashboardResult<NaiveDate> {
        NaiveDate::parse_from_str(self.raw, "%Y-%m-%d")
            .or_else(|_| NaiveDateTime::parse_from_str(self.raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
            .map_err(|_| self.invalid("a date (YYYY-MM-DD)"))
    }

    fn parse<T>(&self) -> DashboardResult<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.raw
            .parse::<T>()
            .map_err(|e| reject(self.row, format!("{}: {}", self.column, e)))
    }
}
