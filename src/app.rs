use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ListingLensApp {
    pub state: AppState,
}

impl Default for ListingLensApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for ListingLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: summary statistics ----
        egui::SidePanel::right("stats_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::stats_panel(ui, &self.state);
            });

        // ---- Bottom panel: detail table ----
        if self.state.show_table {
            egui::TopBottomPanel::bottom("detail_table")
                .default_height(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::detail_table(ui, &self.state);
                });
        }

        // ---- Central panel: map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::listing_map(ui, &self.state);
        });
    }
}
