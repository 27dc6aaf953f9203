//! JSON error envelope.

use salvo::{
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use subs_app::domain::subscriptions::SubscriptionsServiceError;

/// Error body: `code` mirrors the HTTP status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// Error Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorEnvelope {
    pub errors: ErrorBody,
}

/// An HTTP failure rendered as an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub(crate) struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorEnvelope {
            errors: ErrorBody {
                code: self.status.as_u16(),
                message: self.message,
            },
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description)
                    .add_content(
                        "application/json",
                        oapi::Content::new(ErrorEnvelope::to_schema(components)),
                    ),
            );
        }
    }
}

/// Map a subscriptions service failure onto its HTTP status.
///
/// Storage failures are logged here and hidden from the caller.
pub(crate) fn into_api_error(error: SubscriptionsServiceError) -> ApiError {
    match error {
        SubscriptionsServiceError::NotFound => ApiError::not_found(error.to_string()),
        SubscriptionsServiceError::Sql(source) => {
            error!("subscriptions storage failure: {source}");

            ApiError::internal()
        }
        SubscriptionsServiceError::InvalidMonth(_)
        | SubscriptionsServiceError::InvalidInput(_)
        | SubscriptionsServiceError::InvalidPrice(_)
        | SubscriptionsServiceError::InvalidData
        | SubscriptionsServiceError::AlreadyExists => ApiError::bad_request(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use subs_app::domain::subscriptions::months::MonthParseError;

    use super::*;

    #[handler]
    async fn failing() -> Result<&'static str, ApiError> {
        Err(ApiError::bad_request("from required"))
    }

    #[tokio::test]
    async fn renders_envelope_with_status_code() -> TestResult {
        let mut res = TestClient::get("http://example.com/fail")
            .send(&Service::new(Router::with_path("fail").get(failing)))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.errors.code, 400);
        assert_eq!(body.errors.message, "from required");

        Ok(())
    }

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (SubscriptionsServiceError::NotFound, StatusCode::NOT_FOUND),
            (SubscriptionsServiceError::AlreadyExists, StatusCode::BAD_REQUEST),
            (SubscriptionsServiceError::InvalidData, StatusCode::BAD_REQUEST),
            (
                SubscriptionsServiceError::InvalidInput("service_name required"),
                StatusCode::BAD_REQUEST,
            ),
            (
                SubscriptionsServiceError::InvalidMonth(MonthParseError::MonthOutOfRange(13)),
                StatusCode::BAD_REQUEST,
            ),
            (
                SubscriptionsServiceError::Sql(sqlx_error()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(into_api_error(error).status, status);
        }
    }

    #[test]
    fn storage_errors_hide_details() {
        let error = into_api_error(SubscriptionsServiceError::Sql(sqlx_error()));

        assert_eq!(error.message, "internal server error");
    }

    #[test]
    fn validation_errors_keep_message() {
        let error = into_api_error(SubscriptionsServiceError::InvalidMonth(
            MonthParseError::Malformed("2024-01".to_string()),
        ));

        assert_eq!(error.message, "invalid month-year: 2024-01");
    }

    fn sqlx_error() -> sqlx::Error {
        sqlx::Error::PoolTimedOut
    }
}
