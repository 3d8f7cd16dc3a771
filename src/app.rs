use eframe::egui;

use crate::data::loader::DatasetDir;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyDashApp {
    pub state: AppState,
}

impl RustyDashApp {
    pub fn new(source: DatasetDir) -> Self {
        Self {
            state: AppState::new(source),
        }
    }
}

impl eframe::App for RustyDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors and report ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: summary statistics ----
        egui::TopBottomPanel::bottom("statistics_panel")
            .resizable(true)
            .default_height(230.0)
            .show(ctx, |ui| {
                table::summary_table(ui, &self.state.session.view.statistics);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::figure_plot(ui, &self.state.session);
        });
    }
}
