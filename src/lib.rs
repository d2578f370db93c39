// src/lib.rs

//! Downloader for the CFTC Commitments of Traders reports.
//!
//! Resolves (report type, year) pairs to archive URLs on the CFTC history
//! server, caches the zips locally, extracts the embedded data file and
//! loads it as an in-memory [`Table`]. Also scrapes the explanatory-notes
//! page for the report glossary.

pub mod download;
pub mod error;
pub mod fetch;
pub mod notes;
pub mod process;

pub use download::{
    download_bundle, download_year, download_year_range, DownloadOptions,
};
pub use error::{Error, Result};
pub use fetch::urls::{report_types, ReportSpec};
pub use fetch::{Fetcher, HttpFetcher};
pub use notes::explanatory_notes;
pub use process::Table;
