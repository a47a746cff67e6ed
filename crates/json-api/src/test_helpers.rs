//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use viscend_app::{context::AppContext, domain::submissions::MockSubmissionService};

use crate::state::State;

pub(crate) fn state_with_submissions(submissions: MockSubmissionService) -> Arc<State> {
    State::shared(AppContext {
        submissions: Arc::new(submissions),
    })
}

pub(crate) fn contracts_service(submissions: MockSubmissionService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_submissions(submissions)))
            .push(route),
    )
}
