//! Path and query parameter parsing.

use salvo::oapi::extract::QueryParam;

use subs_app::domain::subscriptions::records::{SubscriptionUuid, UserUuid};

use crate::{errors::ApiError, extensions::*};

/// Default page size for listings.
pub(crate) const DEFAULT_LIMIT: u64 = 50;

pub(crate) fn subscription_id(raw: &str) -> Result<SubscriptionUuid, ApiError> {
    raw.parse().or_400("invalid id")
}

/// The query value, treating an empty string as absent.
pub(crate) fn present(param: QueryParam<String, false>) -> Option<String> {
    param.into_inner().filter(|value| !value.is_empty())
}

pub(crate) fn user_id(value: Option<String>) -> Result<Option<UserUuid>, ApiError> {
    value
        .map(|value| value.parse::<UserUuid>())
        .transpose()
        .or_400("invalid user_id")
}

/// A non-negative integer, or `default` when absent.
pub(crate) fn count(value: Option<String>, default: u64, message: &str) -> Result<u64, ApiError> {
    value
        .map(|value| value.parse::<u64>())
        .transpose()
        .or_400(message)
        .map(|count| count.unwrap_or(default))
}

pub(crate) fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value.ok_or_else(|| ApiError::bad_request(message))
}
