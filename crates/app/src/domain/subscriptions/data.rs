//! Subscriptions Data

use crate::domain::subscriptions::{
    errors::SubscriptionsServiceError,
    months::Month,
    records::{SubscriptionRecord, UserUuid},
};

/// Caller-supplied fields for creating or replacing a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionInput {
    pub service_name: String,
    pub price: i64,
    pub user_uuid: UserUuid,
    pub start_date: String,
    pub end_date: Option<String>,
}

/// Validated subscription fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionFields {
    pub service_name: String,
    pub price: u64,
    pub user_uuid: UserUuid,
    pub start_date: Month,
    pub end_date: Option<Month>,
}

impl SubscriptionInput {
    /// Check the service name and price and parse the `MM-YYYY` dates.
    ///
    /// # Errors
    ///
    /// Returns an error when the service name is empty, the price is negative
    /// or either date is not a valid month-year.
    pub fn validate(self) -> Result<SubscriptionFields, SubscriptionsServiceError> {
        if self.service_name.is_empty() {
            return Err(SubscriptionsServiceError::InvalidInput(
                "service_name required",
            ));
        }

        let price = u64::try_from(self.price)?;
        let start_date = self.start_date.parse::<Month>()?;
        let end_date = self
            .end_date
            .as_deref()
            .map(str::parse::<Month>)
            .transpose()?;

        Ok(SubscriptionFields {
            service_name: self.service_name,
            price,
            user_uuid: self.user_uuid,
            start_date,
            end_date,
        })
    }
}

/// Raw list parameters as received from callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub user_uuid: Option<UserUuid>,
    pub service_name: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

/// Raw total-cost parameters as received from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalQuery {
    pub user_uuid: Option<UserUuid>,
    pub service_name: Option<String>,
    pub from: String,
    pub to: String,
}

/// Parsed filters shared by the page and count queries.
///
/// `limit: None` means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    pub user_uuid: Option<UserUuid>,
    pub service_name: Option<String>,
    pub from: Option<Month>,
    pub to: Option<Month>,
    pub limit: Option<u64>,
    pub offset: u64,
}

/// One page of subscriptions plus the number of rows matching the filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionsPage {
    pub subscriptions: Vec<SubscriptionRecord>,
    pub total: u64,
}
