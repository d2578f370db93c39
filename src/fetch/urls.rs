// src/fetch/urls.rs

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use url::Url;

use crate::error::{Error, Result};

/// Root of the CFTC historical-archive file tree.
pub const DEA_HISTORY_BASE: &str = "https://www.cftc.gov/files/dea/history/";

/// How archive filenames are derived for one report type.
///
/// The CFTC has shipped several naming schemes over the years. Two cover
/// everything needed here: `<prefix><year>.zip` for per-year archives, and
/// a fixed filename for the multi-year bundles linked on the Historical
/// Compressed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSpec {
    /// Year-based zip prefix, e.g. "fut_fin_txt_" -> fut_fin_txt_2026.zip.
    pub year_zip_prefix: &'static str,
    /// Bundle zip filename for the older "2006-2016 (Text)" packages.
    pub bundle_zip_filename: Option<&'static str>,
}

static REPORT_SPECS: Lazy<BTreeMap<&'static str, ReportSpec>> = Lazy::new(|| {
    BTreeMap::from([
        // Traders in Financial Futures (TFF)
        (
            "traders_in_financial_futures_fut",
            ReportSpec {
                year_zip_prefix: "fut_fin_txt_",
                bundle_zip_filename: Some("fin_fut_txt_2006_2016.zip"),
            },
        ),
        (
            "traders_in_financial_futures_futopt",
            ReportSpec {
                year_zip_prefix: "com_fin_txt_",
                bundle_zip_filename: Some("fin_com_txt_2006_2016.zip"),
            },
        ),
        // Disaggregated
        (
            "disaggregated_fut",
            ReportSpec {
                year_zip_prefix: "fut_disagg_txt_",
                bundle_zip_filename: Some("fut_disagg_txt_hist_2006_2016.zip"),
            },
        ),
        (
            "disaggregated_futopt",
            ReportSpec {
                year_zip_prefix: "com_disagg_txt_",
                bundle_zip_filename: Some("com_disagg_txt_hist_2006_2016.zip"),
            },
        ),
        // Legacy naming predates the per-report prefixes but still resolves by year
        (
            "legacy_fut",
            ReportSpec {
                year_zip_prefix: "deacot",
                bundle_zip_filename: Some("deacot1986_2016.zip"),
            },
        ),
        (
            "legacy_futopt",
            ReportSpec {
                year_zip_prefix: "deahistfo",
                bundle_zip_filename: Some("deahistfo_1995_2016.zip"),
            },
        ),
        // Supplemental (CIT)
        (
            "supplemental_futopt",
            ReportSpec {
                year_zip_prefix: "dea_cit_txt_",
                bundle_zip_filename: Some("dea_cit_txt_2006_2016.zip"),
            },
        ),
    ])
});

/// All registered report-type keys, sorted.
pub fn report_types() -> Vec<&'static str> {
    REPORT_SPECS.keys().copied().collect()
}

/// Look up the naming spec for `report_type`.
pub fn report_spec(report_type: &str) -> Result<&'static ReportSpec> {
    REPORT_SPECS
        .get(report_type)
        .ok_or_else(|| Error::UnknownReportType {
            given: report_type.to_string(),
            valid: report_types(),
        })
}

/// Archive filename and URL for one year of `report_type`.
///
/// The year is not range-checked; the remote server is the authority on
/// which years exist.
pub fn year_resource(report_type: &str, year: i32) -> Result<(String, Url)> {
    let spec = report_spec(report_type)?;
    let zip_name = format!("{}{}.zip", spec.year_zip_prefix, year);
    let url = Url::parse(DEA_HISTORY_BASE)?.join(&zip_name)?;
    Ok((zip_name, url))
}

/// Archive filename and URL for the historical bundle of `report_type`.
pub fn bundle_resource(report_type: &str) -> Result<(String, Url)> {
    let spec = report_spec(report_type)?;
    let zip_name = bundle_zip_name(report_type, spec)?;
    let url = Url::parse(DEA_HISTORY_BASE)?.join(zip_name)?;
    Ok((zip_name.to_string(), url))
}

fn bundle_zip_name(report_type: &str, spec: &ReportSpec) -> Result<&'static str> {
    spec.bundle_zip_filename
        .ok_or_else(|| Error::MissingBundle(report_type.to_string()))
}
