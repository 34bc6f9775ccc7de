use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde::Deserialize;
use thiserror::Error;

use super::model::{Listing, ListingTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load failures. Row-level problems (unparsable price, missing
/// coordinates) are not errors: those rows are dropped during cleaning.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("no usable rows after cleaning")]
    Empty,
}

// ---------------------------------------------------------------------------
// Raw CSV row
// ---------------------------------------------------------------------------

/// One row as it appears in the source file, before cleaning.  Column labels
/// follow the raw export (`lat`, `long`, `room type`); everything is optional
/// because any cell may be blank.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "NAME", default)]
    name: Option<String>,
    #[serde(rename = "neighbourhood group", default)]
    neighbourhood_group: Option<String>,
    #[serde(rename = "room type", default)]
    room_type: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    long: Option<String>,
    #[serde(rename = "review rate number", default)]
    review_rate_number: Option<String>,
}

/// Columns a file must carry to be loadable at all.
const REQUIRED_COLUMNS: [&str; 5] = ["lat", "long", "room type", "price", "neighbourhood group"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a listings CSV.
///
/// Cleaning mirrors the upstream dataset conventions:
/// * `lat` / `long` / `room type` are renamed to `latitude` / `longitude` /
///   `room_type` on the [`Listing`] struct,
/// * `price` strings like `"$1,234"` are stripped of `$` and `,` and parsed,
/// * rows missing latitude, longitude, price, region, or room type are
///   dropped.
pub fn load_csv(path: &Path) -> Result<ListingTable, DataLoadError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DataLoadError::MissingColumn(col));
        }
    }

    let mut listings = Vec::new();
    let mut dropped = 0usize;

    for result in reader.deserialize::<RawRecord>() {
        let raw = result?;
        match clean_record(raw) {
            Some(listing) => listings.push(listing),
            None => dropped += 1,
        }
    }

    if listings.is_empty() {
        return Err(DataLoadError::Empty);
    }

    log::debug!("dropped {dropped} rows with missing or unparsable required fields");
    log::info!(
        "loaded {} listings from {}",
        listings.len(),
        path.display()
    );

    Ok(ListingTable::from_listings(listings))
}

/// Turn a raw row into a cleaned [`Listing`], or `None` if any required
/// field is missing or unparsable.
fn clean_record(raw: RawRecord) -> Option<Listing> {
    let region = non_blank(raw.neighbourhood_group)?;
    let room_type = non_blank(raw.room_type)?;
    let price = parse_price(raw.price.as_deref().unwrap_or(""))?;
    let latitude = parse_coordinate(raw.lat.as_deref())?;
    let longitude = parse_coordinate(raw.long.as_deref())?;

    Some(Listing {
        name: raw.name.unwrap_or_default().trim().to_string(),
        region,
        room_type,
        price,
        latitude,
        longitude,
        review_rate: raw
            .review_rate_number
            .and_then(|s| s.trim().parse::<f64>().ok()),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    let s = value?.trim().to_string();
    if s.is_empty() { None } else { Some(s) }
}

/// Parse a currency-formatted price: strip a leading `$` and any thousands
/// separators, then parse as `f64`.  Anything unparsable or negative yields
/// `None` (the row is dropped by the caller).
pub fn parse_price(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let value = stripped.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

// ---------------------------------------------------------------------------
// LoaderCache – memoized load keyed by path + modification time
// ---------------------------------------------------------------------------

struct CacheEntry {
    modified: Option<SystemTime>,
    table: Arc<ListingTable>,
}

/// Memoizes [`load_csv`] per file so repeated opens of the same dataset
/// never re-read it.  A changed modification time invalidates the entry;
/// the cached table itself is immutable and shared via `Arc`.
#[derive(Default)]
pub struct LoaderCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl LoaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, reusing the cached table when the file is unchanged.
    pub fn load(&mut self, path: &Path) -> Result<Arc<ListingTable>, DataLoadError> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let modified = std::fs::metadata(&key).and_then(|m| m.modified()).ok();

        if let Some(entry) = self.entries.get(&key) {
            if entry.modified == modified && modified.is_some() {
                log::debug!("cache hit for {}", key.display());
                return Ok(Arc::clone(&entry.table));
            }
        }

        let table = Arc::new(load_csv(&key)?);
        self.entries.insert(
            key,
            CacheEntry {
                modified,
                table: Arc::clone(&table),
            },
        );
        Ok(table)
    }

    /// Forget a cached file so the next [`LoaderCache::load`] re-reads it.
    pub fn invalidate(&mut self, path: &Path) {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.entries.remove(&key);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;

    const HEADER: &str = "NAME,neighbourhood group,lat,long,room type,price,review rate number";

    fn write_csv(dir: &TempDir, name: &str, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    #[test]
    fn parses_currency_prices() {
        assert_eq!(parse_price("$1,234"), Some(1234.0));
        assert_eq!(parse_price("$950"), Some(950.0));
        assert_eq!(parse_price("120"), Some(120.0));
        assert_eq!(parse_price(" $2,500 "), Some(2500.0));
        assert_eq!(parse_price("N/A"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("$"), None);
        assert_eq!(parse_price("-50"), None);
    }

    #[test]
    fn cleaning_drops_incomplete_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "listings.csv",
            &[
                "Cozy loft,Brooklyn,40.68,-73.95,Private room,$120,4.5",
                "No price,Manhattan,40.75,-73.98,Entire home/apt,N/A,4.0",
                "No coords,Queens,,,Shared room,$60,3.5",
                "No region,,40.70,-73.90,Private room,$80,4.2",
                "Midtown suite,Manhattan,40.76,-73.99,\"Entire home/apt\",\"$1,300\",4.8",
            ],
        );

        let table = load_csv(&path).unwrap();
        assert_eq!(table.len(), 2);
        for l in &table.listings {
            assert!(l.latitude.is_finite());
            assert!(l.longitude.is_finite());
            assert!(l.price >= 0.0);
            assert!(!l.region.is_empty());
            assert!(!l.room_type.is_empty());
        }
        assert_eq!(table.listings[1].price, 1300.0);
        assert_eq!(table.max_price, 1300.0);
        assert_eq!(
            table.regions.iter().cloned().collect::<Vec<_>>(),
            vec!["Brooklyn", "Manhattan"]
        );
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "NAME,neighbourhood group,lat,long,room type").unwrap();
        writeln!(file, "x,Brooklyn,40.7,-73.9,Private room").unwrap();

        match load_csv(&path) {
            Err(DataLoadError::MissingColumn(col)) => assert_eq!(col, "price"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = load_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Csv(_)));
    }

    #[test]
    fn all_rows_dirty_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "dirty.csv", &["x,Bronx,40.8,-73.9,Private room,N/A,"]);
        assert!(matches!(load_csv(&path), Err(DataLoadError::Empty)));
    }

    #[test]
    fn load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "listings.csv",
            &["A,Brooklyn,40.68,-73.95,Private room,$100,4.0"],
        );
        let first = load_csv(&path).unwrap();
        let second = load_csv(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn cache_returns_shared_table_without_rereading() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "listings.csv",
            &["A,Brooklyn,40.68,-73.95,Private room,$100,4.0"],
        );

        let mut cache = LoaderCache::new();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        cache.invalidate(&path);
        let third = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(*first, *third);
    }
}
