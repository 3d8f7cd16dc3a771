use std::path::PathBuf;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::ChartKind;
use crate::controller::Event;
use crate::report::{decode_export_link, REPORT_FILE_NAME};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selectors and report actions
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Explore");
    ui.separator();

    let mut event: Option<Event> = None;
    let selection = &state.session.selection;
    let view = &state.session.view;

    // ---- File ----
    ui.strong("Select File");
    ui.horizontal(|ui: &mut Ui| {
        let files: Vec<(String, String)> =
            view.files.iter().map(|f| (f.clone(), f.clone())).collect();
        let (choice, opened) = selector(ui, "file", selection.file.as_ref(), &files);
        if let Some(file) = choice {
            event = Some(Event::SelectFile(file));
        } else if opened {
            event = Some(Event::RefreshFiles);
        }
        if ui
            .small_button("🔄")
            .on_hover_text("Re-read the data directory")
            .clicked()
        {
            event = Some(Event::RefreshFiles);
        }
    });
    ui.add_space(6.0);

    // ---- Graph type ----
    ui.strong("Select Graph Type");
    let kinds: Vec<(ChartKind, String)> = view
        .chart_kinds
        .iter()
        .map(|o| (o.kind, o.label.to_string()))
        .collect();
    if let (Some(kind), _) = selector(ui, "graph", selection.kind.as_ref(), &kinds) {
        event = Some(Event::SelectKind(kind));
    }
    ui.add_space(6.0);

    // ---- Axes ----
    if view.axis.x_visible {
        ui.strong("Select X Axis");
        let xs = column_options(&view.axis.x_options);
        if let (Some(x), _) = selector(ui, "x_axis", selection.x.as_ref(), &xs) {
            event = Some(Event::SelectX(x));
        }
        ui.add_space(6.0);
    }

    ui.strong("Select Y Axis");
    let ys = column_options(&view.axis.y_options);
    if let (Some(y), _) = selector(ui, "y_axis", selection.y.as_ref(), &ys) {
        event = Some(Event::SelectY(y));
    }

    ui.separator();

    // ---- Report ----
    ui.strong("Report");
    let mut message = None;
    match &view.export_link {
        Some(link) => {
            ui.hyperlink_to("Download Data", link)
                .on_hover_text("Open the report (statistics and chart) as HTML");
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Copy link").clicked() {
                    ui.ctx().copy_text(link.clone());
                    message = Some("Link copied".to_string());
                }
                if ui.button("Save report…").clicked() {
                    message = match save_report(link) {
                        Ok(Some(path)) => Some(format!("Saved {}", path.display())),
                        Ok(None) => None,
                        Err(e) => {
                            log::error!("Failed to save report: {e:#}");
                            Some(format!("Error: {e:#}"))
                        }
                    };
                }
            });
        }
        None => {
            ui.label("Select a file to enable the report.");
        }
    }

    if !view.statistics.is_empty() && ui.button("Copy statistics (JSON)").clicked() {
        match view.statistics.to_records_json() {
            Ok(json) => {
                ui.ctx().copy_text(json);
                message = Some("Statistics copied".to_string());
            }
            Err(e) => log::error!("Failed to serialize statistics: {e}"),
        }
    }

    if let Some(msg) = message {
        state.report_message = Some(msg);
    }
    if let Some(msg) = &state.report_message {
        ui.label(msg);
    }

    if let Some(event) = event {
        state.dispatch(event);
    }
}

fn column_options(columns: &[String]) -> Vec<(String, String)> {
    columns.iter().map(|c| (c.clone(), c.clone())).collect()
}

/// A combo box over `(value, label)` options with an empty entry.
///
/// Returns the new choice when it differs from `current`, and whether the
/// combo box was clicked open this frame.
fn selector<T: Clone + PartialEq>(
    ui: &mut Ui,
    id: &str,
    current: Option<&T>,
    options: &[(T, String)],
) -> (Option<Option<T>>, bool) {
    let selected_text = current
        .and_then(|c| options.iter().find(|(value, _)| value == c))
        .map_or("Select…", |(_, label)| label.as_str());

    let mut choice = None;
    let response = egui::ComboBox::from_id_salt(id)
        .width(200.0)
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "—").clicked() && current.is_some() {
                choice = Some(None);
            }
            for (value, label) in options {
                let is_current = current == Some(value);
                if ui.selectable_label(is_current, label).clicked() && !is_current {
                    choice = Some(Some(value.clone()));
                }
            }
        });
    (choice, response.response.clicked())
}

/// Ask for a destination and write the report document there.
fn save_report(link: &str) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save report")
        .set_file_name(REPORT_FILE_NAME)
        .add_filter("HTML", &["html"])
        .save_file()
    else {
        return Ok(None);
    };

    let html = decode_export_link(link).context("decoding report")?;
    std::fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Saved report to {}", path.display());
    Ok(Some(path))
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let mut refresh = false;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Refresh file list").clicked() {
                refresh = true;
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        ui.label(format!(
            "{} CSV files in {}",
            state.session.view.files.len(),
            state.data_dir().display()
        ));

        if let Some(msg) = &state.session.view.status {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    if refresh {
        state.dispatch(Event::RefreshFiles);
    }
}
