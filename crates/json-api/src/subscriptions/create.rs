//! Create Subscription Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    errors::{ApiError, into_api_error},
    extensions::*,
    state::State,
    subscriptions::{
        BASE_PATH, requests::read_subscription_input, responses::SubscriptionResponse,
    },
};

/// Create Subscription Handler
///
/// Stores a new subscription and answers with the stored record.
#[endpoint(
    tags("subscriptions"),
    summary = "Create Subscription",
    responses(
        (status_code = StatusCode::CREATED, description = "Subscription created"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let input = read_subscription_input(req, state.read_timeout).await?;

    let created = state
        .app
        .subscriptions
        .create_subscription(input)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("{BASE_PATH}/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}
