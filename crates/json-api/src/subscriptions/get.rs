//! Get Subscription Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::{ApiError, into_api_error},
    extensions::*,
    state::State,
    subscriptions::{params::subscription_id, responses::SubscriptionResponse},
};

/// Get Subscription Handler
#[endpoint(tags("subscriptions"), summary = "Get Subscription")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let subscription = subscription_id(&id.into_inner())?;

    let record = state
        .app
        .subscriptions
        .get_subscription(subscription)
        .await
        .map_err(into_api_error)?;

    Ok(Json(record.into()))
}
