// src/process/unzip.rs

use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// How many entry names to keep in the no-data-file error payload.
const ERROR_NAME_CAP: usize = 20;

/// Pick the primary data entry from `(name, uncompressed size)` pairs.
///
/// Yearly archives carry exactly one large data file, sometimes alongside
/// small readme/notes files. Extensions and naming are inconsistent across
/// years and report types, so size is the discriminator: the largest
/// .txt/.csv wins. Equal sizes fall back to lexical name order so the
/// choice stays stable.
pub fn pick_data_entry(entries: &[(String, u64)]) -> Result<String> {
    let mut candidates: Vec<&(String, u64)> = entries
        .iter()
        .filter(|(name, _)| {
            let lower = name.to_lowercase();
            lower.ends_with(".txt") || lower.ends_with(".csv")
        })
        .collect();

    if candidates.is_empty() {
        return Err(Error::NoDataFile {
            entries: entries
                .iter()
                .take(ERROR_NAME_CAP)
                .map(|(name, _)| name.clone())
                .collect(),
        });
    }

    candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(candidates[0].0.clone())
}

/// List the archive's file entries and select the primary data entry name.
pub fn select_data_entry(zip_bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))?;
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_file() {
            entries.push((entry.name().to_string(), entry.size()));
        }
    }

    let picked = pick_data_entry(&entries)?;
    debug!(entry = %picked, candidates = entries.len(), "selected data entry");
    Ok(picked)
}

/// Read one named entry fully into memory.
pub fn extract_entry(zip_bytes: &[u8], name: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))?;
    let mut entry = archive.by_name(name)?;
    let mut buf = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut buf)?;
    Ok(buf)
}
