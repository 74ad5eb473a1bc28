//! Fetch-if-missing URL cache.
//!
//! Cache key is the local filename; a cache hit is simply "the file exists".
//! No freshness check, no eviction. Writes are atomic (tmp file + rename) so
//! a failed download never leaves a half-written cache entry behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("source unavailable: {url}: {reason}")]
    SourceUnavailable { url: String, reason: String },

    #[error("cache write failed: {path}: {reason}")]
    CacheWrite { path: PathBuf, reason: String },
}

/// Blocking HTTP client with a bounded request timeout.
pub fn http_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("failed to build HTTP client")
}

/// Return `path`, downloading it from `url` first if it does not exist.
pub fn fetch_cached(
    client: &reqwest::blocking::Client,
    url: &str,
    path: &Path,
) -> Result<PathBuf, FetchError> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    eprintln!("fetching {url} -> {}", path.display());

    let unavailable = |reason: String| FetchError::SourceUnavailable {
        url: url.to_string(),
        reason,
    };
    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| unavailable(e.to_string()))?;
    let body = response.text().map_err(|e| unavailable(e.to_string()))?;

    let write_err = |reason: String| FetchError::CacheWrite {
        path: path.to_path_buf(),
        reason,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, body).map_err(|e| write_err(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        write_err(e.to_string())
    })?;

    Ok(path.to_path_buf())
}
