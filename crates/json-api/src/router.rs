//! App Router

use std::{sync::Arc, time::Duration};

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{
    deadline::WriteDeadline,
    healthcheck,
    observability::{metrics_handler, request_logging},
    state::State,
    subscriptions,
};

/// Subscription routes; `total` precedes `{id}` so the literal segment wins.
fn subscriptions_router() -> Router {
    Router::with_path(subscriptions::BASE_PATH.trim_start_matches('/'))
        .get(subscriptions::index::handler)
        .post(subscriptions::create::handler)
        .push(Router::with_path("total").get(subscriptions::total::handler))
        .push(
            Router::with_path("{id}")
                .get(subscriptions::get::handler)
                .put(subscriptions::update::handler)
                .delete(subscriptions::delete::handler),
        )
}

/// Build the full service router, including the OpenAPI document and
/// Swagger UI.
pub(crate) fn app_router(state: Arc<State>, write_timeout: Duration) -> Router {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(WriteDeadline::new(write_timeout))
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(subscriptions_router());

    let doc = OpenApi::new("Subscriptions API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use subs_app::domain::subscriptions::{
        MockSubscriptionsService, SubscriptionsServiceError,
        records::{SubscriptionUuid, UserUuid},
    };

    use crate::{
        errors::ErrorEnvelope,
        test_helpers::{make_subscription, state_with_subscriptions},
    };

    use super::*;

    fn make_service(subscriptions: MockSubscriptionsService) -> Service {
        Service::new(app_router(
            state_with_subscriptions(subscriptions),
            Duration::from_secs(10),
        ))
    }

    #[tokio::test]
    async fn test_total_is_not_treated_as_an_id() -> TestResult {
        let mut subscriptions = MockSubscriptionsService::new();

        subscriptions.expect_get_subscription().never();
        subscriptions.expect_total_cost().never();

        let mut res = TestClient::get("http://example.com/api/v1/subscriptions/total")
            .send(&make_service(subscriptions))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.errors.message, "from required");

        Ok(())
    }

    #[tokio::test]
    async fn test_trailing_slash_is_removed() -> TestResult {
        let uuid = SubscriptionUuid::new();
        let record = make_subscription(uuid, UserUuid::new());

        let mut subscriptions = MockSubscriptionsService::new();

        subscriptions
            .expect_get_subscription()
            .once()
            .return_once(move |_| Ok(record));

        let res = TestClient::get(format!("http://example.com/api/v1/subscriptions/{uuid}/"))
            .send(&make_service(subscriptions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_routes_to_service() -> TestResult {
        let uuid = SubscriptionUuid::new();

        let mut subscriptions = MockSubscriptionsService::new();

        subscriptions
            .expect_delete_subscription()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Err(SubscriptionsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/api/v1/subscriptions/{uuid}"))
            .send(&make_service(subscriptions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_healthcheck_is_mounted() -> TestResult {
        let res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(MockSubscriptionsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_openapi_document_lists_subscription_paths() -> TestResult {
        let mut res = TestClient::get("http://example.com/api-doc/openapi.json")
            .send(&make_service(MockSubscriptionsService::new()))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            body.contains("/api/v1/subscriptions/total"),
            "openapi document should describe the total endpoint"
        );

        Ok(())
    }
}
