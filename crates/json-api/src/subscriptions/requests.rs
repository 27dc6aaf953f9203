//! Subscription request bodies.

use std::time::Duration;

use salvo::{http::StatusCode, oapi::ToSchema, prelude::Request};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use subs_app::domain::subscriptions::data::SubscriptionInput;

use crate::{errors::ApiError, extensions::*};

/// Create or Replace Subscription Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionRequest {
    /// Name of the subscribed service
    #[serde(default)]
    pub service_name: String,

    /// Monthly price in whole currency units
    #[serde(default)]
    pub price: i64,

    /// Owner of the subscription
    pub user_id: Uuid,

    /// First billed month, `MM-YYYY`
    #[serde(default)]
    pub start_date: String,

    /// Last billed month, `MM-YYYY`; omit for open-ended subscriptions
    #[serde(default)]
    pub end_date: Option<String>,
}

impl From<SubscriptionRequest> for SubscriptionInput {
    fn from(request: SubscriptionRequest) -> Self {
        SubscriptionInput {
            service_name: request.service_name,
            price: request.price,
            user_uuid: request.user_id.into(),
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

/// Read and decode the JSON body within `timeout`.
pub(crate) async fn read_subscription_input(
    req: &mut Request,
    timeout: Duration,
) -> Result<SubscriptionInput, ApiError> {
    let payload = tokio::time::timeout(timeout, req.payload())
        .await
        .map_err(|_elapsed| {
            ApiError::new(StatusCode::REQUEST_TIMEOUT, "request body read timed out")
        })?
        .or_400("invalid json")?;

    let request: SubscriptionRequest = serde_json::from_slice(payload).or_400("invalid json")?;

    Ok(request.into())
}
