//! Test helpers.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use subs_app::{
    context::AppContext,
    domain::subscriptions::{
        MockSubscriptionsService,
        months::Month,
        records::{SubscriptionRecord, SubscriptionUuid, UserUuid},
    },
};

use crate::state::State;

pub(crate) fn state_with_subscriptions(subscriptions: MockSubscriptionsService) -> Arc<State> {
    State::shared(
        AppContext::new(Arc::new(subscriptions)),
        Duration::from_secs(10),
    )
}

/// Serve `route` with `subscriptions` injected as application state.
pub(crate) fn subscriptions_service(
    subscriptions: MockSubscriptionsService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_subscriptions(subscriptions)))
            .push(route),
    )
}

pub(crate) fn make_subscription(uuid: SubscriptionUuid, user: UserUuid) -> SubscriptionRecord {
    SubscriptionRecord {
        uuid,
        service_name: "netflix".to_string(),
        price: 499,
        user_uuid: user,
        start_date: Month::from_timestamp(Timestamp::UNIX_EPOCH)
            .unwrap_or_else(|error| panic!("epoch month: {error}")),
        end_date: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
