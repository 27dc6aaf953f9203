//! Test Helpers

use crate::domain::subscriptions::{data::SubscriptionInput, records::UserUuid};

pub(crate) fn subscription_input(
    user: UserUuid,
    service_name: &str,
    price: i64,
    start_date: &str,
    end_date: Option<&str>,
) -> SubscriptionInput {
    SubscriptionInput {
        service_name: service_name.to_string(),
        price,
        user_uuid: user,
        start_date: start_date.to_string(),
        end_date: end_date.map(str::to_string),
    }
}
