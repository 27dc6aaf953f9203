//! Delete Subscription Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::{ApiError, into_api_error},
    extensions::*,
    state::State,
    subscriptions::params::subscription_id,
};

/// Delete Subscription Handler
#[endpoint(
    tags("subscriptions"),
    summary = "Delete Subscription",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Subscription deleted"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let subscription = subscription_id(&id.into_inner())?;

    state
        .app
        .subscriptions
        .delete_subscription(subscription)
        .await
        .map_err(into_api_error)?;

    Ok(StatusCode::NO_CONTENT)
}
