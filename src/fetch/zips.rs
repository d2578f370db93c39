// src/fetch/zips.rs

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use url::Url;

use super::Fetcher;
use crate::error::Result;

/// Obtain one year's archive, reusing a cached copy when it cannot have
/// changed.
///
/// Past-year archives are immutable once published, so an existing local
/// file short-circuits the network entirely. The current year's archive
/// grows with every report week and is always re-fetched.
pub fn obtain_year_zip(
    fetcher: &dyn Fetcher,
    url: &Url,
    local_path: &Path,
    year: i32,
    current_year: i32,
    store_zip: bool,
) -> Result<Vec<u8>> {
    if local_path.exists() && year != current_year {
        debug!(path = %local_path.display(), "reusing cached archive");
        return Ok(fs::read(local_path)?);
    }
    download(fetcher, url, local_path, store_zip)
}

/// Obtain a multi-year bundle archive. Bundles never change after
/// publication, so any local copy is reused regardless of age.
pub fn obtain_bundle_zip(
    fetcher: &dyn Fetcher,
    url: &Url,
    local_path: &Path,
    store_zip: bool,
) -> Result<Vec<u8>> {
    if local_path.exists() {
        debug!(path = %local_path.display(), "reusing cached archive");
        return Ok(fs::read(local_path)?);
    }
    download(fetcher, url, local_path, store_zip)
}

fn download(
    fetcher: &dyn Fetcher,
    url: &Url,
    local_path: &Path,
    store_zip: bool,
) -> Result<Vec<u8>> {
    info!(%url, "downloading archive");
    let bytes = fetcher.fetch_bytes(url)?;
    if store_zip {
        if let Some(parent) = local_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(local_path, &bytes)?;
        debug!(path = %local_path.display(), size = bytes.len(), "stored archive");
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    struct StubFetcher {
        payload: Vec<u8>,
        calls: RefCell<usize>,
    }

    impl StubFetcher {
        fn new(payload: &[u8]) -> Self {
            Self {
                payload: payload.to_vec(),
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl Fetcher for StubFetcher {
        fn fetch_bytes(&self, _url: &Url) -> Result<Vec<u8>> {
            *self.calls.borrow_mut() += 1;
            Ok(self.payload.clone())
        }
    }

    fn test_url() -> Url {
        Url::parse("https://www.cftc.gov/files/dea/history/deacot2020.zip").unwrap()
    }

    #[test]
    fn past_year_with_local_copy_skips_network() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deacot2020.zip");
        fs::write(&path, b"cached bytes").unwrap();

        let fetcher = StubFetcher::new(b"fresh bytes");
        let bytes = obtain_year_zip(&fetcher, &test_url(), &path, 2020, 2026, true).unwrap();

        assert_eq!(bytes, b"cached bytes");
        assert_eq!(fetcher.calls(), 0);
    }

    #[test]
    fn current_year_refetches_despite_local_copy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deacot2026.zip");
        fs::write(&path, b"stale bytes").unwrap();

        let fetcher = StubFetcher::new(b"fresh bytes");
        let bytes = obtain_year_zip(&fetcher, &test_url(), &path, 2026, 2026, true).unwrap();

        assert_eq!(bytes, b"fresh bytes");
        assert_eq!(fetcher.calls(), 1);
        // local copy overwritten with the fresh fetch
        assert_eq!(fs::read(&path).unwrap(), b"fresh bytes");
    }

    #[test]
    fn missing_file_fetches_and_stores() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dir/deacot2020.zip");

        let fetcher = StubFetcher::new(b"fresh bytes");
        let bytes = obtain_year_zip(&fetcher, &test_url(), &path, 2020, 2026, true).unwrap();

        assert_eq!(bytes, b"fresh bytes");
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(fs::read(&path).unwrap(), b"fresh bytes");
    }

    #[test]
    fn store_zip_false_leaves_no_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deacot2020.zip");

        let fetcher = StubFetcher::new(b"fresh bytes");
        let bytes = obtain_year_zip(&fetcher, &test_url(), &path, 2020, 2026, false).unwrap();

        assert_eq!(bytes, b"fresh bytes");
        assert!(!path.exists());
    }

    #[test]
    fn bundle_reuses_local_copy_regardless_of_age() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deacot1986_2016.zip");
        fs::write(&path, b"cached bundle").unwrap();

        let fetcher = StubFetcher::new(b"fresh bundle");
        let bytes = obtain_bundle_zip(&fetcher, &test_url(), &path, true).unwrap();

        assert_eq!(bytes, b"cached bundle");
        assert_eq!(fetcher.calls(), 0);
    }

    #[test]
    fn bundle_fetches_when_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deacot1986_2016.zip");

        let fetcher = StubFetcher::new(b"fresh bundle");
        let bytes = obtain_bundle_zip(&fetcher, &test_url(), &path, true).unwrap();

        assert_eq!(bytes, b"fresh bundle");
        assert_eq!(fetcher.calls(), 1);
        assert!(path.exists());
    }
}
