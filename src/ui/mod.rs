/// UI layer: egui panels and plots over [`crate::state::AppState`].

pub mod panels;
pub mod plot;
