//! Selection → visualization pipeline.
//!
//! Every user input becomes an [`Event`]. [`Controller::handle`] derives a new
//! [`Session`] from the previous one, recomputing only what lies downstream of
//! the changed input:
//!
//! ```text
//!   file ──► chart kinds ──► axis options ──► chart ──┐
//!     │                                               ├──► export link
//!     └────────────────────────────► statistics ──────┘
//! ```
//!
//! The dataset is re-read from storage once per evaluation; values derived
//! in an earlier evaluation are never reused as inputs, except the shown
//! statistics table that the export link is built from.

use crate::chart::{
    available_chart_kinds, axis_options, build_chart, AxisOptions, ChartKind, Figure, KindOption,
};
use crate::data::loader::DatasetDir;
use crate::data::model::Dataset;
use crate::report::{build_export_link, PlottersRasterizer, Rasterize};
use crate::stats::{summarize_selected, SummaryTable};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The user's current choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub file: Option<String>,
    pub kind: Option<ChartKind>,
    pub x: Option<String>,
    pub y: Option<String>,
}

/// A single input change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectFile(Option<String>),
    SelectKind(Option<ChartKind>),
    SelectX(Option<String>),
    SelectY(Option<String>),
    /// Re-read the directory listing.
    RefreshFiles,
}

/// How far upstream an event reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Axes,
    Kind,
    File,
}

impl Selection {
    /// The selection after `event`. Changing the file drops the axis
    /// columns, which belonged to the previous dataset.
    pub fn apply(&self, event: &Event) -> Selection {
        let mut next = self.clone();
        match event {
            Event::SelectFile(file) => {
                next.file = file.clone();
                next.x = None;
                next.y = None;
            }
            Event::SelectKind(kind) => next.kind = *kind,
            Event::SelectX(x) => next.x = x.clone(),
            Event::SelectY(y) => next.y = y.clone(),
            Event::RefreshFiles => {}
        }
        next
    }

    /// Drop choices that are no longer offered.
    fn sanitized(mut self, kinds: &[KindOption], axis: &AxisOptions) -> Selection {
        if !self.kind.is_some_and(|k| kinds.iter().any(|o| o.kind == k)) {
            self.kind = None;
        }
        if !self.x.as_ref().is_some_and(|x| axis.x_options.contains(x)) {
            self.x = None;
        }
        if !self.y.as_ref().is_some_and(|y| axis.y_options.contains(y)) {
            self.y = None;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Everything the UI displays.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub files: Vec<String>,
    pub chart_kinds: Vec<KindOption>,
    pub axis: AxisOptions,
    pub figure: Option<Figure>,
    pub statistics: SummaryTable,
    /// `data:text/html;base64,...` link of the report, once there is one.
    pub export_link: Option<String>,
    /// Last failure, shown to the user.
    pub status: Option<String>,
}

/// Selection plus what is displayed for it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub selection: Selection,
    pub view: View,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct Controller<R = PlottersRasterizer> {
    source: DatasetDir,
    rasterizer: R,
}

impl Controller {
    pub fn new(source: DatasetDir) -> Self {
        Self::with_rasterizer(source, PlottersRasterizer::default())
    }
}

impl<R: Rasterize> Controller<R> {
    pub fn with_rasterizer(source: DatasetDir, rasterizer: R) -> Self {
        Self { source, rasterizer }
    }

    pub fn source(&self) -> &DatasetDir {
        &self.source
    }

    /// Initial session: file list only, nothing selected.
    pub fn start(&self) -> Session {
        let mut session = Session::default();
        session.view.files = self.list_files(&mut session.view.status);
        session
    }

    /// Apply one input change to `session`.
    pub fn handle(&self, session: &Session, event: Event) -> Session {
        let mut view = session.view.clone();
        view.status = None;
        let mut selection = session.selection.apply(&event);

        let stage = match &event {
            Event::RefreshFiles => {
                view.files = self.list_files(&mut view.status);
                return Session { selection, view };
            }
            Event::SelectFile(_) => Stage::File,
            Event::SelectKind(_) => Stage::Kind,
            Event::SelectX(_) | Event::SelectY(_) => Stage::Axes,
        };

        let dataset = self.load(&selection, &mut view.status);
        let dataset = dataset.as_ref();

        if stage >= Stage::File {
            view.chart_kinds = available_chart_kinds(selection.file.is_some());
        }
        if stage >= Stage::Kind {
            view.axis = axis_options(dataset, selection.kind);
        }
        selection = selection.sanitized(&view.chart_kinds, &view.axis);

        view.figure = build_chart(
            dataset,
            selection.kind,
            selection.x.as_deref(),
            selection.y.as_deref(),
        );

        if stage >= Stage::File {
            summarize_selected(dataset).apply_to(&mut view.statistics);
        }

        // A file that fails to load keeps the previous report.
        let load_failed = selection.file.is_some() && dataset.is_none();
        if !load_failed {
            let link = build_export_link(&view.statistics, view.figure.as_ref(), &self.rasterizer);
            if let Some(link) = link.into_option() {
                view.export_link = Some(link);
            }
        }

        Session { selection, view }
    }

    fn list_files(&self, status: &mut Option<String>) -> Vec<String> {
        match self.source.list() {
            Ok(files) => files,
            Err(e) => {
                log::error!("Cannot list datasets in {}: {e}", self.source.root().display());
                *status = Some(e.to_string());
                Vec::new()
            }
        }
    }

    fn load(&self, selection: &Selection, status: &mut Option<String>) -> Option<Dataset> {
        let name = selection.file.as_deref()?;
        match self.source.load(name) {
            Ok(ds) => Some(ds),
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                *status = Some(e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::chart::{ChartSpec, Series};
    use crate::error::{DashError, Result};
    use crate::report::decode_export_link;

    struct BrokenRasterizer;

    impl Rasterize for BrokenRasterizer {
        fn rasterize(&self, _figure: &Figure) -> Result<Vec<u8>> {
            Err(DashError::Render("no backend".to_string()))
        }
    }

    fn data_dir() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "sales.csv", "month,revenue\n1,100\n2,150\n3,120\n4,180\n");
        write(tmp.path(), "people.csv", "name,age,height\nann,31,1.70\nbob,45,1.82\n");
        tmp
    }

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn run(controller: &Controller<impl Rasterize>, events: Vec<Event>) -> Session {
        events
            .into_iter()
            .fold(controller.start(), |session, event| controller.handle(&session, event))
    }

    fn select_file(name: &str) -> Event {
        Event::SelectFile(Some(name.to_string()))
    }

    fn select_x(name: &str) -> Event {
        Event::SelectX(Some(name.to_string()))
    }

    fn select_y(name: &str) -> Event {
        Event::SelectY(Some(name.to_string()))
    }

    fn export_html(session: &Session) -> String {
        let link = session.view.export_link.as_deref().unwrap();
        String::from_utf8(decode_export_link(link).unwrap()).unwrap()
    }

    #[test]
    fn start_lists_files() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = controller.start();
        assert_eq!(session.view.files, vec!["people.csv", "sales.csv"]);
        assert_eq!(session.selection, Selection::default());
    }

    #[test]
    fn sales_line_chart_scenario() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));

        let session = run(
            &controller,
            vec![select_file("sales.csv"), Event::SelectKind(Some(ChartKind::Line))],
        );
        assert_eq!(session.view.chart_kinds.len(), 3);
        assert_eq!(session.view.axis.x_options, vec!["month", "revenue"]);
        assert_eq!(session.view.axis.y_options, vec!["month", "revenue"]);
        assert!(session.view.axis.x_visible);
        assert!(session.view.figure.is_none());

        let session = controller.handle(&session, select_x("month"));
        let session = controller.handle(&session, select_y("revenue"));
        let figure = session.view.figure.as_ref().unwrap();
        assert_eq!(
            figure.spec,
            ChartSpec::Line {
                x: Some("month".to_string()),
                y: "revenue".to_string()
            }
        );

        let stats = &session.view.statistics;
        assert_eq!(stats.columns, vec!["month", "revenue"]);
        let names: Vec<_> = stats.rows.iter().map(|r| r.statistic).collect();
        assert_eq!(names, ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]);

        let link = session.view.export_link.as_deref().unwrap();
        assert!(link.starts_with("data:text/html;base64,"));
        let html = export_html(&session);
        assert!(html.contains("<table"));
        assert!(html.contains("<img src=\"data:image/png;base64,"));
        assert!(session.view.status.is_none());
    }

    #[test]
    fn nothing_selected_shows_nothing() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(
            &controller,
            vec![Event::SelectKind(Some(ChartKind::Line)), select_y("revenue")],
        );
        assert!(session.view.chart_kinds.is_empty());
        assert_eq!(session.view.axis, AxisOptions::default());
        assert!(session.view.figure.is_none());
        assert!(session.view.statistics.is_empty());
        assert!(session.view.export_link.is_none());
        assert_eq!(session.selection, Selection::default());
    }

    #[test]
    fn box_with_only_y() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(
            &controller,
            vec![
                select_file("sales.csv"),
                Event::SelectKind(Some(ChartKind::Box)),
                select_y("revenue"),
            ],
        );
        assert!(!session.view.axis.x_visible);
        assert!(session.view.axis.x_options.is_empty());
        let figure = session.view.figure.as_ref().unwrap();
        assert_eq!(figure.spec, ChartSpec::Box { y: "revenue".to_string() });
        assert_eq!(
            figure.series,
            Series::Distribution(vec![100.0, 120.0, 150.0, 180.0])
        );
        assert!(export_html(&session).contains("<img src=\"data:image/png;base64,"));
    }

    #[test]
    fn switching_to_box_discards_x() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(
            &controller,
            vec![
                select_file("sales.csv"),
                Event::SelectKind(Some(ChartKind::Scatter)),
                select_x("month"),
                select_y("revenue"),
                Event::SelectKind(Some(ChartKind::Box)),
            ],
        );
        assert_eq!(session.selection.x, None);
        assert_eq!(session.selection.y.as_deref(), Some("revenue"));
        assert_eq!(session.view.figure.unwrap().spec.kind(), ChartKind::Box);
    }

    #[test]
    fn deselecting_kind_clears_axes() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(
            &controller,
            vec![
                select_file("sales.csv"),
                Event::SelectKind(Some(ChartKind::Line)),
                select_x("month"),
                select_y("revenue"),
                Event::SelectKind(None),
            ],
        );
        assert_eq!(session.selection.kind, None);
        assert_eq!(session.selection.x, None);
        assert_eq!(session.selection.y, None);
        assert_eq!(session.view.axis, AxisOptions::default());
        assert!(session.view.figure.is_none());
        let html = export_html(&session);
        assert!(html.contains("<table"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn line_without_x_is_still_built() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(
            &controller,
            vec![
                select_file("sales.csv"),
                Event::SelectKind(Some(ChartKind::Line)),
                select_y("revenue"),
            ],
        );
        let figure = session.view.figure.unwrap();
        assert_eq!(figure.spec.x(), None);
        assert_eq!(figure.points()[0], [0.0, 100.0]);
    }

    #[test]
    fn changing_file_discards_stale_axes() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(
            &controller,
            vec![
                select_file("sales.csv"),
                Event::SelectKind(Some(ChartKind::Line)),
                select_x("month"),
                select_y("revenue"),
                select_file("people.csv"),
            ],
        );
        assert_eq!(session.selection.kind, Some(ChartKind::Line));
        assert_eq!(session.selection.x, None);
        assert_eq!(session.selection.y, None);
        assert_eq!(session.view.axis.y_options, vec!["age", "height"]);
        assert!(session.view.figure.is_none());
        assert_eq!(session.view.statistics.columns, vec!["age", "height"]);
    }

    #[test]
    fn options_not_offered_are_ignored() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(
            &controller,
            vec![
                select_file("people.csv"),
                Event::SelectKind(Some(ChartKind::Line)),
                select_y("name"),
            ],
        );
        assert_eq!(session.selection.y, None);
        assert!(session.view.figure.is_none());
    }

    #[test]
    fn deselecting_file_keeps_statistics() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(
            &controller,
            vec![
                select_file("sales.csv"),
                Event::SelectKind(Some(ChartKind::Line)),
                select_y("revenue"),
                Event::SelectFile(None),
            ],
        );
        assert!(session.view.chart_kinds.is_empty());
        assert_eq!(session.selection, Selection::default());
        assert!(session.view.figure.is_none());
        assert_eq!(session.view.statistics.columns, vec!["month", "revenue"]);
        assert!(!export_html(&session).contains("<img"));
    }

    #[test]
    fn vanished_file_degrades_to_empty_widgets() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(&controller, vec![select_file("sales.csv")]);
        let shown = session.view.statistics.clone();

        std::fs::remove_file(tmp.path().join("sales.csv")).unwrap();
        let session = controller.handle(&session, Event::SelectKind(Some(ChartKind::Line)));
        assert!(session.view.axis.y_options.is_empty());
        assert!(session.view.figure.is_none());
        assert_eq!(session.view.statistics, shown);
        assert!(session.view.status.as_deref().unwrap().contains("not found"));

        let session = controller.handle(&session, Event::RefreshFiles);
        assert_eq!(session.view.files, vec!["people.csv"]);
        assert!(session.view.status.is_none());
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let tmp = data_dir();
        write(tmp.path(), "bad.csv", "a,b\n1,2,3\n");
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(&controller, vec![select_file("bad.csv")]);
        assert_eq!(session.view.chart_kinds.len(), 3);
        assert!(session.view.statistics.is_empty());
        assert!(session.view.export_link.is_none());
        assert!(session.view.status.as_deref().unwrap().contains("bad.csv"));
    }

    #[test]
    fn failed_load_keeps_previous_report() {
        let tmp = data_dir();
        write(tmp.path(), "bad.csv", "a,b\n1,2,3\n");
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let session = run(&controller, vec![select_file("sales.csv")]);
        let previous = session.view.export_link.clone();
        assert!(previous.is_some());

        let session = controller.handle(&session, select_file("bad.csv"));
        assert_eq!(session.view.export_link, previous);
        assert!(session.view.status.as_deref().unwrap().contains("bad.csv"));
    }

    #[test]
    fn render_failure_exports_table_only() {
        let tmp = data_dir();
        let controller =
            Controller::with_rasterizer(DatasetDir::new(tmp.path()), BrokenRasterizer);
        let session = run(
            &controller,
            vec![
                select_file("sales.csv"),
                Event::SelectKind(Some(ChartKind::Box)),
                select_y("revenue"),
            ],
        );
        assert!(session.view.figure.is_some());
        let html = export_html(&session);
        assert!(html.contains("<td>mean</td>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn unreadable_directory_lists_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let controller = Controller::new(DatasetDir::new(tmp.path().join("missing")));
        let session = controller.start();
        assert!(session.view.files.is_empty());
        assert!(session.view.status.is_some());
    }

    #[test]
    fn handle_does_not_touch_previous_session() {
        let tmp = data_dir();
        let controller = Controller::new(DatasetDir::new(tmp.path()));
        let before = controller.start();
        let after = controller.handle(&before, select_file("sales.csv"));
        assert_eq!(before.selection.file, None);
        assert_eq!(after.selection.file.as_deref(), Some("sales.csv"));
    }
}
