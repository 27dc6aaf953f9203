//! Subscription response bodies.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use subs_app::domain::subscriptions::{data::SubscriptionsPage, records::SubscriptionRecord};

/// A subscription as exposed over HTTP.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionBody {
    /// The unique identifier of the subscription
    pub id: Uuid,

    /// Name of the subscribed service
    pub service_name: String,

    /// Monthly price in whole currency units
    pub price: u64,

    /// Owner of the subscription
    pub user_id: Uuid,

    /// First billed month (RFC 3339, first instant of the month in UTC)
    pub start_date: String,

    /// Last billed month, absent for open-ended subscriptions
    pub end_date: Option<String>,

    /// The date and time the subscription was created
    pub created_at: String,

    /// The date and time the subscription was last updated
    pub updated_at: String,
}

impl From<SubscriptionRecord> for SubscriptionBody {
    fn from(record: SubscriptionRecord) -> Self {
        SubscriptionBody {
            id: record.uuid.into(),
            service_name: record.service_name,
            price: record.price,
            user_id: record.user_uuid.into(),
            start_date: record.start_date.first_instant().to_string(),
            end_date: record
                .end_date
                .map(|end| end.first_instant())
                .as_ref()
                .map(ToString::to_string),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Single Subscription Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionResponse {
    pub subscription: SubscriptionBody,
}

impl From<SubscriptionRecord> for SubscriptionResponse {
    fn from(record: SubscriptionRecord) -> Self {
        Self {
            subscription: record.into(),
        }
    }
}

/// Subscription List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ListResponse {
    /// The requested page, newest first
    pub subscriptions: Vec<SubscriptionBody>,

    /// Number of subscriptions matching the filters across all pages
    pub total: u64,
}

impl From<SubscriptionsPage> for ListResponse {
    fn from(page: SubscriptionsPage) -> Self {
        Self {
            subscriptions: page.subscriptions.into_iter().map(Into::into).collect(),
            total: page.total,
        }
    }
}

/// Total Cost Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalResponse {
    /// Sum of monthly prices over the requested window
    pub amount: u64,
}
