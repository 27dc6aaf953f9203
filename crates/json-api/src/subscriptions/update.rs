//! Update Subscription Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::{ApiError, into_api_error},
    extensions::*,
    state::State,
    subscriptions::{
        params::subscription_id, requests::read_subscription_input,
        responses::SubscriptionResponse,
    },
};

/// Update Subscription Handler
///
/// Replaces every caller-supplied field of an existing subscription.
#[endpoint(tags("subscriptions"), summary = "Update Subscription")]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let subscription = subscription_id(&id.into_inner())?;
    let input = read_subscription_input(req, state.read_timeout).await?;

    let updated = state
        .app
        .subscriptions
        .update_subscription(subscription, input)
        .await
        .map_err(into_api_error)?;

    Ok(Json(updated.into()))
}
