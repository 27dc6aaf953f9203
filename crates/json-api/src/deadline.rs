//! Per-request handling deadline.

use std::time::Duration;

use salvo::prelude::*;
use tracing::warn;

use crate::errors::ApiError;

/// Abort the rest of the chain once `limit` elapses and answer 503 in the
/// error envelope.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WriteDeadline {
    limit: Duration,
}

impl WriteDeadline {
    pub(crate) fn new(limit: Duration) -> Self {
        Self { limit }
    }
}

#[handler]
impl WriteDeadline {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if tokio::time::timeout(self.limit, ctrl.call_next(req, depot, res))
            .await
            .is_err()
        {
            warn!(limit_ms = self.limit.as_millis(), "request deadline elapsed");

            res.render(ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "request timed out",
            ));
            ctrl.skip_rest();
        }
    }
}
