//! Subscription Records

use jiff::Timestamp;

use crate::{domain::subscriptions::months::Month, uuids::TypedUuid};

/// Subscription UUID
pub type SubscriptionUuid = TypedUuid<SubscriptionRecord>;

/// Marker for identifiers of the users that own subscriptions.
#[derive(Debug)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Subscription Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub uuid: SubscriptionUuid,
    pub service_name: String,
    pub price: u64,
    pub user_uuid: UserUuid,
    pub start_date: Month,
    pub end_date: Option<Month>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
