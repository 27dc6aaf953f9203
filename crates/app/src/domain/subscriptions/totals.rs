//! Total cost over a month window.

use crate::domain::subscriptions::{
    errors::SubscriptionsServiceError, months::Month, records::SubscriptionRecord,
};

/// Inclusive `[from, to]` window of a total-cost query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: Month,
    pub to: Month,
}

/// Months of `subscription` that fall inside `window`.
///
/// Open-ended subscriptions run to the end of the window. Intervals that miss
/// the window, or end before they start, bill nothing.
pub fn billable_months(subscription: &SubscriptionRecord, window: Window) -> u64 {
    if subscription.start_date > window.to {
        return 0;
    }

    let end = subscription.end_date.unwrap_or(window.to).min(window.to);
    let start = subscription.start_date.max(window.from);

    if end < window.from {
        return 0;
    }

    u64::try_from(start.months_through(end)).unwrap_or(0)
}

/// Sum of `price * billable months` across `subscriptions`.
///
/// # Errors
///
/// Returns an error when the sum does not fit in a `u64`.
pub fn total_amount(
    subscriptions: &[SubscriptionRecord],
    window: Window,
) -> Result<u64, SubscriptionsServiceError> {
    subscriptions.iter().try_fold(0_u64, |sum, subscription| {
        subscription
            .price
            .checked_mul(billable_months(subscription, window))
            .and_then(|amount| sum.checked_add(amount))
            .ok_or(SubscriptionsServiceError::InvalidInput(
                "total amount out of range",
            ))
    })
}
