use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Listing – one cleaned row of the dataset
// ---------------------------------------------------------------------------

/// A single listing (one surviving row of the source CSV).
///
/// The loader guarantees: `latitude`/`longitude` are finite, `price >= 0`,
/// and `region`/`room_type` are non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Display name (source column `NAME`, may be empty).
    pub name: String,
    /// Neighbourhood group, e.g. "Brooklyn".
    pub region: String,
    /// Room type, e.g. "Private room".
    pub room_type: String,
    /// Nightly price in dollars, parsed from `$1,234`-style strings.
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Review rate (source column `review rate number`), display only.
    pub review_rate: Option<f64>,
}

// ---------------------------------------------------------------------------
// ListingTable – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset with pre-computed category indexes.
///
/// Immutable after construction; shared across the app behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingTable {
    /// All listings, in source-file order.
    pub listings: Vec<Listing>,
    /// Sorted set of distinct region values (filter options).
    pub regions: BTreeSet<String>,
    /// Sorted set of distinct room-type values (filter options).
    pub room_types: BTreeSet<String>,
    /// Maximum price in the table, 0 when the table is empty.
    pub max_price: f64,
}

impl ListingTable {
    /// Build category indexes from the cleaned listings.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let mut regions = BTreeSet::new();
        let mut room_types = BTreeSet::new();
        let mut max_price: f64 = 0.0;

        for l in &listings {
            regions.insert(l.region.clone());
            room_types.insert(l.room_type.clone());
            max_price = max_price.max(l.price);
        }

        ListingTable {
            listings,
            regions,
            room_types,
            max_price,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
