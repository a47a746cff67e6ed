//! Shared handler state, injected into the depot once at start up.

use std::sync::Arc;

use viscend_app::{context::AppContext, domain::submissions::SubmissionService};

#[derive(Clone, Debug)]
pub(crate) struct State {
    app: AppContext,
}

impl State {
    pub(crate) fn shared(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }

    /// The contract workflow every handler drives.
    pub(crate) fn submissions(&self) -> &dyn SubmissionService {
        self.app.submissions.as_ref()
    }
}
