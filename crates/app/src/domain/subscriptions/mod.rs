//! Subscriptions

pub mod data;
pub mod errors;
pub mod months;
pub mod records;
mod repository;
pub mod service;
pub mod totals;

pub use errors::SubscriptionsServiceError;
pub use service::*;
