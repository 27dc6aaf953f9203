//! Total Cost Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use subs_app::domain::subscriptions::data::TotalQuery;

use crate::{
    errors::{ApiError, into_api_error},
    extensions::*,
    state::State,
    subscriptions::{
        params::{present, required, user_id as parse_user},
        responses::TotalResponse,
    },
};

/// Total Cost Handler
///
/// Sums the monthly prices of matching subscriptions over the inclusive
/// `from..=to` window.
#[endpoint(tags("subscriptions"), summary = "Total Subscription Cost")]
pub(crate) async fn handler(
    from: QueryParam<String, false>,
    to: QueryParam<String, false>,
    user_id: QueryParam<String, false>,
    service_name: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TotalResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = TotalQuery {
        from: required(present(from), "from required")?,
        to: required(present(to), "to required")?,
        user_uuid: parse_user(present(user_id))?,
        service_name: present(service_name),
    };

    let amount = state
        .app
        .subscriptions
        .total_cost(query)
        .await
        .map_err(into_api_error)?;

    Ok(Json(TotalResponse { amount }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use subs_app::domain::subscriptions::{
        MockSubscriptionsService, SubscriptionsServiceError, records::UserUuid,
    };

    use crate::{errors::ErrorEnvelope, test_helpers::subscriptions_service};

    use super::*;

    fn make_service(subscriptions: MockSubscriptionsService) -> Service {
        subscriptions_service(
            subscriptions,
            Router::with_path("api/v1/subscriptions/total").get(handler),
        )
    }

    #[tokio::test]
    async fn test_total_returns_amount() -> TestResult {
        let user = UserUuid::new();

        let mut subscriptions = MockSubscriptionsService::new();

        subscriptions
            .expect_total_cost()
            .once()
            .withf(move |query| {
                *query
                    == TotalQuery {
                        user_uuid: Some(user),
                        service_name: None,
                        from: "01-2024".to_string(),
                        to: "12-2024".to_string(),
                    }
            })
            .return_once(|_| Ok(500));

        let mut res = TestClient::get(format!(
            "http://example.com/api/v1/subscriptions/total?from=01-2024&to=12-2024&user_id={user}"
        ))
        .send(&make_service(subscriptions))
        .await;

        let body: TotalResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.amount, 500);

        Ok(())
    }

    #[tokio::test]
    async fn test_total_without_from_returns_400() -> TestResult {
        let mut subscriptions = MockSubscriptionsService::new();

        subscriptions.expect_total_cost().never();

        let mut res = TestClient::get("http://example.com/api/v1/subscriptions/total?to=12-2024")
            .send(&make_service(subscriptions))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.errors.code, 400);
        assert_eq!(body.errors.message, "from required");

        Ok(())
    }

    #[tokio::test]
    async fn test_total_without_to_returns_400() -> TestResult {
        let mut subscriptions = MockSubscriptionsService::new();

        subscriptions.expect_total_cost().never();

        let mut res = TestClient::get("http://example.com/api/v1/subscriptions/total?from=01-2024")
            .send(&make_service(subscriptions))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(body.errors.message, "to required");

        Ok(())
    }

    #[tokio::test]
    async fn test_total_overflow_returns_400() -> TestResult {
        let mut subscriptions = MockSubscriptionsService::new();

        subscriptions
            .expect_total_cost()
            .once()
            .return_once(|_| {
                Err(SubscriptionsServiceError::InvalidInput(
                    "total amount out of range",
                ))
            });

        let mut res = TestClient::get(
            "http://example.com/api/v1/subscriptions/total?from=01-2024&to=12-2024",
        )
        .send(&make_service(subscriptions))
        .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.errors.message, "total amount out of range");

        Ok(())
    }
}
