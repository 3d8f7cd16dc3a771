use eframe::egui::{Align, Layout, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::stats::{format_value, SummaryTable};

// ---------------------------------------------------------------------------
// Summary statistics table (bottom panel)
// ---------------------------------------------------------------------------

pub fn summary_table(ui: &mut Ui, table: &SummaryTable) {
    ui.strong("Summary Statistics");
    ui.separator();

    if table.is_empty() {
        ui.label("Select a file to compute statistics.");
        return;
    }

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::right_to_left(Align::Center))
            .column(Column::auto().at_least(60.0))
            .columns(Column::auto().at_least(100.0), table.columns.len())
            .header(20.0, |mut header| {
                for name in table.header() {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for row in &table.rows {
                    body.row(18.0, |mut cells| {
                        cells.col(|ui: &mut Ui| {
                            ui.label(row.statistic);
                        });
                        for value in &row.values {
                            cells.col(|ui: &mut Ui| {
                                ui.monospace(format_value(*value));
                            });
                        }
                    });
                }
            });
    });
}
