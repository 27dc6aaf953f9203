//! State

use std::{sync::Arc, time::Duration};

use subs_app::context::AppContext;

#[derive(Clone, Debug)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Deadline for reading a request body.
    pub(crate) read_timeout: Duration,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, read_timeout: Duration) -> Self {
        Self { app, read_timeout }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, read_timeout: Duration) -> Arc<Self> {
        Arc::new(Self::new(app, read_timeout))
    }
}
