//! Optional on-disk cache for raw chart responses.
//!
//! Entries are gzip-compressed JSON keyed by symbol, range, interval and the
//! day the cache manager was created, so a new day always fetches fresh
//! prices. Files are written to a temp file first and renamed into place.

use crate::config;
use crate::error::Result;
use crate::models::{Interval, Period};
use chrono::{NaiveDate, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Stores provider responses under a cache directory.
pub struct CacheManager {
    /// Directory where cached files are stored.
    pub cache_dir: PathBuf,
    /// If true, never go to the network (use cached files only).
    pub offline: bool,
    day: NaiveDate,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            day: Utc::now().date_naive(),
        })
    }

    /// Pin the cache to a specific day instead of today.
    pub fn with_day(mut self, day: NaiveDate) -> Self {
        self.day = day;
        self
    }

    /// Local path of the entry for one chart request.
    pub fn entry_path(&self, symbol: &str, period: Period, interval: Interval) -> PathBuf {
        self.cache_dir.join(format!(
            "{}_{}_{}_{}.json.gz",
            encode_symbol(symbol),
            period.code(),
            interval.code(),
            self.day.format("%Y-%m-%d")
        ))
    }

    /// Load a cached response.
    ///
    /// A corrupt entry is deleted and reported as absent so it is fetched
    /// again.
    pub fn load(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Option<serde_json::Value>> {
        let path = self.entry_path(symbol, period, interval);
        if !path.exists() {
            return Ok(None);
        }

        let parse_result = (|| -> Result<serde_json::Value> {
            let file = fs::File::open(&path)?;
            let mut decoder = BufReader::new(GzDecoder::new(BufReader::new(file)));
            let mut contents = String::new();
            decoder.read_to_string(&mut contents)?;
            Ok(serde_json::from_str(&contents)?)
        })();

        match parse_result {
            Ok(value) => {
                tracing::debug!(path = %path.display(), "chart cache hit");
                Ok(Some(value))
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt cache file, removing");
                let _ = fs::remove_file(&path);
                Ok(None)
            }
        }
    }

    /// Store a response, replacing any existing entry.
    pub fn store(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
        value: &serde_json::Value,
    ) -> Result<PathBuf> {
        let path = self.entry_path(symbol, period, interval);
        let tmp = NamedTempFile::new_in(&self.cache_dir)?;
        let mut encoder = GzEncoder::new(tmp, Compression::default());
        encoder.write_all(serde_json::to_string(value)?.as_bytes())?;
        let tmp = encoder.finish()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(path)
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}

/// Make a ticker safe for use in a file name (`^GSPC` -> `%5EGSPC`).
fn encode_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_string()
            } else {
                format!("%{:02X}", c as u32)
            }
        })
        .collect()
}
