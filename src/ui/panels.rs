use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let table = match &state.table {
        Some(t) => t,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the option lists so we can mutate state inside the loop.
    let regions: Vec<String> = table.regions.iter().cloned().collect();
    let room_types: Vec<String> = table.room_types.iter().cloned().collect();
    let max_price = table.max_price;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Region checkboxes ----
            let header = format!(
                "Region  ({}/{})",
                state.filters.regions.len(),
                regions.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("region_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_regions();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_regions();
                        }
                    });
                    for region in &regions {
                        let mut checked = state.filters.regions.contains(region);
                        let mut text = RichText::new(region);
                        if let Some(colors) = &state.region_colors {
                            text = text.color(colors.color_for(region));
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_region(region);
                        }
                    }
                });

            // ---- Room-type checkboxes ----
            let header = format!(
                "Room type  ({}/{})",
                state.filters.room_types.len(),
                room_types.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("room_type_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_room_types();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_room_types();
                        }
                    });
                    for room_type in &room_types {
                        let mut checked = state.filters.room_types.contains(room_type);
                        if ui.checkbox(&mut checked, room_type).changed() {
                            state.toggle_room_type(room_type);
                        }
                    }
                });

            ui.separator();

            // ---- Price range ----
            ui.strong("Price range ($)");
            let mut min = state.filters.price_min;
            let mut max = state.filters.price_max;
            let changed = ui
                .add(egui::Slider::new(&mut min, 0.0..=max_price).text("min"))
                .changed()
                | ui.add(egui::Slider::new(&mut max, 0.0..=max_price).text("max"))
                    .changed();
            if changed {
                state.set_price_range(min, max);
            }
        });
}

// ---------------------------------------------------------------------------
// Right side panel – summary statistics
// ---------------------------------------------------------------------------

/// Render the metrics and room-type distribution panel.
pub fn stats_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Summary");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let agg = &state.aggregates;
    ui.label("Total listings");
    ui.strong(format!("{}", agg.count));
    ui.add_space(4.0);
    ui.label("Average price");
    ui.strong(format!("${:.0}", agg.mean_price));
    ui.add_space(8.0);

    if !agg.room_type_counts.is_empty() {
        ui.label("Room-type distribution:");
        crate::ui::plot::room_type_bars(ui, agg);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} listings loaded, {} match",
                table.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        ui.checkbox(&mut state.show_table, "Detail table");

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – detail table (first 100 matching rows)
// ---------------------------------------------------------------------------

const DETAIL_ROW_LIMIT: usize = 100;

/// Render the tabular preview of the filtered listings.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::remainder().at_least(160.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(70.0))
        .header(20.0, |mut header| {
            for title in ["Name", "Region", "Room type", "Price", "Review rate"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for &idx in state.visible_indices.iter().take(DETAIL_ROW_LIMIT) {
                let l = &table.listings[idx];
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&l.name);
                    });
                    row.col(|ui| {
                        ui.label(&l.region);
                    });
                    row.col(|ui| {
                        ui.label(&l.room_type);
                    });
                    row.col(|ui| {
                        ui.label(format!("${:.0}", l.price));
                    });
                    row.col(|ui| {
                        ui.label(
                            l.review_rate
                                .map(|r| format!("{r:.1}"))
                                .unwrap_or_else(|| "–".to_string()),
                        );
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open listings dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
