//! CSV input and output
//!
//! - `upload`: partner table import with row-level diagnostics
//! - `export`: summary and raw dataset export

pub mod export;
pub mod upload;

pub use export::{
    export_dataset, export_summaries, read_csv, to_csv_string, write_csv, write_csv_file,
    ACTIVITY_FILE, ACTIVITY_SERIES_FILE, ACTIVITY_SUMMARY_FILE, KPI_SUMMARY_FILE, PARTNERS_FILE,
    REVENUE_SERIES_FILE, REVENUE_SUMMARY_FILE, SALES_FILE, SOCIAL_FILE, SOCIAL_SERIES_FILE,
    SOCIAL_SUMMARY_FILE,
};
pub use upload::{read_partners, read_partners_file, PARTNER_COLUMNS};
