use std::path::Path;
use std::sync::Arc;

use crate::color::RegionColors;
use crate::data::filter::{Aggregates, FilterState, filtered_indices};
use crate::data::loader::LoaderCache;
use crate::data::model::ListingTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loader service with its per-file memoization.
    pub loader: LoaderCache,

    /// Cleaned dataset (None until the user opens a file).  Immutable and
    /// shared with the loader cache.
    pub table: Option<Arc<ListingTable>>,

    /// Current filter selections.
    pub filters: FilterState,

    /// Indices of listings passing the current filters (cached per
    /// interaction).
    pub visible_indices: Vec<usize>,

    /// Summary statistics over `visible_indices`.
    pub aggregates: Aggregates,

    /// Region → colour mapping for the map layer.
    pub region_colors: Option<RegionColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the detail table panel is expanded.
    pub show_table: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            loader: LoaderCache::new(),
            table: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            aggregates: Aggregates::default(),
            region_colors: None,
            status_message: None,
            show_table: false,
        }
    }
}

impl AppState {
    /// Open a dataset through the loader cache and reset filters to
    /// all-inclusive defaults.
    pub fn open_file(&mut self, path: &Path) {
        match self.loader.load(path) {
            Ok(table) => {
                log::info!(
                    "{} listings across {} regions, {} room types",
                    table.len(),
                    table.regions.len(),
                    table.room_types.len()
                );
                self.set_table(table);
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a cleaned table, initialise filters and colours.
    pub fn set_table(&mut self, table: Arc<ListingTable>) {
        self.filters = FilterState::all_of(&table);
        self.region_colors = Some(RegionColors::new(&table.regions));
        self.status_message = None;
        self.table = Some(table);
        self.refilter();
    }

    /// Recompute the filtered view and its aggregates after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = filtered_indices(table, &self.filters);
            self.aggregates = Aggregates::compute(table, &self.visible_indices);
        } else {
            self.visible_indices.clear();
        }
    }

    /// Toggle a single region in the filter.
    pub fn toggle_region(&mut self, region: &str) {
        if !self.filters.regions.remove(region) {
            self.filters.regions.insert(region.to_string());
        }
        self.refilter();
    }

    /// Toggle a single room type in the filter.
    pub fn toggle_room_type(&mut self, room_type: &str) {
        if !self.filters.room_types.remove(room_type) {
            self.filters.room_types.insert(room_type.to_string());
        }
        self.refilter();
    }

    /// Select all regions.
    pub fn select_all_regions(&mut self) {
        if let Some(table) = &self.table {
            self.filters.regions = table.regions.clone();
            self.refilter();
        }
    }

    /// Deselect all regions.
    pub fn select_no_regions(&mut self) {
        self.filters.regions.clear();
        self.refilter();
    }

    /// Select all room types.
    pub fn select_all_room_types(&mut self) {
        if let Some(table) = &self.table {
            self.filters.room_types = table.room_types.clone();
            self.refilter();
        }
    }

    /// Deselect all room types.
    pub fn select_no_room_types(&mut self) {
        self.filters.room_types.clear();
        self.refilter();
    }

    /// Set the price interval, clamped to `[0, max_price]` with min ≤ max.
    pub fn set_price_range(&mut self, min: f64, max: f64) {
        let ceiling = self.table.as_ref().map(|t| t.max_price).unwrap_or(0.0);
        let min = min.clamp(0.0, ceiling);
        let max = max.clamp(min, ceiling);
        if (min, max) != (self.filters.price_min, self.filters.price_max) {
            self.filters.price_min = min;
            self.filters.price_max = max;
            self.refilter();
        }
    }
}
