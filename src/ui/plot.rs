use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::data::filter::Aggregates;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Listing map (central panel)
// ---------------------------------------------------------------------------

/// Render the geographic scatter of the filtered listings, one point layer
/// per region.
pub fn listing_map(ui: &mut Ui, state: &AppState) {
    let table = match &state.table {
        Some(t) => t,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a listings CSV to explore  (File → Open…)");
            });
            return;
        }
    };

    if state.visible_indices.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No listings match the current filters.");
        });
        return;
    }

    // Group points by region so each region gets one coloured layer.
    let mut by_region: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for &idx in &state.visible_indices {
        let l = &table.listings[idx];
        by_region
            .entry(l.region.as_str())
            .or_default()
            .push([l.longitude, l.latitude]);
    }

    Plot::new("listing_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (region, coords) in by_region {
                let color = state
                    .region_colors
                    .as_ref()
                    .map(|cm| cm.color_for(region))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let points: PlotPoints = coords.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(region)
                        .color(color)
                        .radius(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Room-type bar chart (stats panel)
// ---------------------------------------------------------------------------

/// Render a bar chart of room-type frequencies, descending by count.
pub fn room_type_bars(ui: &mut Ui, aggregates: &Aggregates) {
    let bars: Vec<Bar> = aggregates
        .room_type_counts
        .iter()
        .enumerate()
        .map(|(i, (name, count))| {
            Bar::new(i as f64, *count as f64)
                .name(name)
                .width(0.6)
        })
        .collect();

    let labels: Vec<String> = aggregates
        .room_type_counts
        .iter()
        .map(|(name, _)| name.clone())
        .collect();

    Plot::new("room_type_bars")
        .height(160.0)
        .show_axes([false, true])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round() as usize;
            if (mark.value - i as f64).abs() < 1e-6 {
                labels.get(i).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
