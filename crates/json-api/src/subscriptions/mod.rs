//! Subscription Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod total;
pub(crate) mod update;

mod params;
mod requests;
mod responses;

/// Mount point of the subscriptions resource.
pub(crate) const BASE_PATH: &str = "/api/v1/subscriptions";
