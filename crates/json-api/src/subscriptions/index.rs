//! List Subscriptions Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use subs_app::domain::subscriptions::data::ListQuery;

use crate::{
    errors::{ApiError, into_api_error},
    extensions::*,
    state::State,
    subscriptions::{
        params::{DEFAULT_LIMIT, count, present, user_id as parse_user},
        responses::ListResponse,
    },
};

/// List Subscriptions Handler
///
/// Returns one page of subscriptions, newest first, with the number of
/// matches across all pages.
#[endpoint(tags("subscriptions"), summary = "List Subscriptions")]
pub(crate) async fn handler(
    user_id: QueryParam<String, false>,
    service_name: QueryParam<String, false>,
    from: QueryParam<String, false>,
    to: QueryParam<String, false>,
    limit: QueryParam<String, false>,
    offset: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ListResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = ListQuery {
        user_uuid: parse_user(present(user_id))?,
        service_name: present(service_name),
        from: present(from),
        to: present(to),
        limit: count(present(limit), DEFAULT_LIMIT, "invalid limit")?,
        offset: count(present(offset), 0, "invalid offset")?,
    };

    let page = state
        .app
        .subscriptions
        .list_subscriptions(query)
        .await
        .map_err(into_api_error)?;

    Ok(Json(page.into()))
}
