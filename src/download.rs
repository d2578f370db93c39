// src/download.rs

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use tracing::info;

use crate::error::{Error, Result};
use crate::fetch::{urls, zips, Fetcher, HttpFetcher};
use crate::process::{self, Table};

/// Knobs shared by every download operation.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Persist fetched archives under `dest_dir` for later reuse.
    pub store_zip: bool,
    /// Directory holding cached archives; created on demand.
    pub dest_dir: PathBuf,
    /// Per-request network timeout.
    pub timeout: Duration,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            store_zip: true,
            dest_dir: PathBuf::from("./dataset"),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Download one year of one report type and load it as a table.
pub fn download_year(report_type: &str, year: i32, opts: &DownloadOptions) -> Result<Table> {
    let fetcher = HttpFetcher::new(opts.timeout)?;
    download_year_with(&fetcher, report_type, year, Local::now().year(), opts)
}

/// Same as [`download_year`], with the transport and the calendar year
/// supplied by the caller.
pub fn download_year_with(
    fetcher: &dyn Fetcher,
    report_type: &str,
    year: i32,
    current_year: i32,
    opts: &DownloadOptions,
) -> Result<Table> {
    let (zip_name, url) = urls::year_resource(report_type, year)?;
    let local_path = opts.dest_dir.join(&zip_name);

    let start = Instant::now();
    let bytes = zips::obtain_year_zip(
        fetcher,
        &url,
        &local_path,
        year,
        current_year,
        opts.store_zip,
    )?;
    let table = process::read_table_from_zip(&bytes)?;
    info!(name = %zip_name, rows = table.len(), elapsed = ?start.elapsed(), "loaded year archive");
    Ok(table)
}

/// Download the multi-year historical bundle for a report type, where one
/// is published.
pub fn download_bundle(report_type: &str, opts: &DownloadOptions) -> Result<Table> {
    let fetcher = HttpFetcher::new(opts.timeout)?;
    download_bundle_with(&fetcher, report_type, opts)
}

/// Same as [`download_bundle`], with the transport supplied by the caller.
pub fn download_bundle_with(
    fetcher: &dyn Fetcher,
    report_type: &str,
    opts: &DownloadOptions,
) -> Result<Table> {
    let (zip_name, url) = urls::bundle_resource(report_type)?;
    let local_path = opts.dest_dir.join(&zip_name);

    let start = Instant::now();
    let bytes = zips::obtain_bundle_zip(fetcher, &url, &local_path, opts.store_zip)?;
    let table = process::read_table_from_zip(&bytes)?;
    info!(name = %zip_name, rows = table.len(), elapsed = ?start.elapsed(), "loaded bundle archive");
    Ok(table)
}

/// Download an inclusive year range and concatenate the per-year tables,
/// years ascending.
pub fn download_year_range(
    report_type: &str,
    start_year: i32,
    end_year: i32,
    opts: &DownloadOptions,
) -> Result<Table> {
    let fetcher = HttpFetcher::new(opts.timeout)?;
    download_year_range_with(
        &fetcher,
        report_type,
        start_year,
        end_year,
        Local::now().year(),
        opts,
    )
}

/// Same as [`download_year_range`], with the transport and the calendar
/// year supplied by the caller.
///
/// Years run strictly sequentially; the first failing year aborts the
/// whole range and nothing partial is returned.
pub fn download_year_range_with(
    fetcher: &dyn Fetcher,
    report_type: &str,
    start_year: i32,
    end_year: i32,
    current_year: i32,
    opts: &DownloadOptions,
) -> Result<Table> {
    if start_year > end_year {
        return Err(Error::InvalidYearRange {
            start: start_year,
            end: end_year,
        });
    }

    let mut combined = Table::default();
    for year in start_year..=end_year {
        let table = download_year_with(fetcher, report_type, year, current_year, opts)?;
        combined.append(table);
    }
    Ok(combined)
}
