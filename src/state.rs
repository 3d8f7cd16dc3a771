use crate::controller::{Controller, Event, Session};
use crate::data::loader::DatasetDir;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    controller: Controller,

    /// Current selection and everything derived from it.
    pub session: Session,

    /// Message from the last report action (copy/save).
    pub report_message: Option<String>,
}

impl AppState {
    pub fn new(source: DatasetDir) -> Self {
        let controller = Controller::new(source);
        let session = controller.start();
        Self {
            controller,
            session,
            report_message: None,
        }
    }

    /// Run one input change through the pipeline and show the result.
    pub fn dispatch(&mut self, event: Event) {
        log::debug!("Input changed: {event:?}");
        self.session = self.controller.handle(&self.session, event);
        self.report_message = None;
    }

    /// Directory the datasets come from.
    pub fn data_dir(&self) -> &std::path::Path {
        self.controller.source().root()
    }
}
