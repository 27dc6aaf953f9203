//! Domain Concerns

pub mod subscriptions;
