/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  Airbnb listings .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read + clean rows → ListingTable (memoized per file)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ListingTable  │  Vec<Listing>, category indexes, max price
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region/room-type/price predicates → indices + aggregates
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
