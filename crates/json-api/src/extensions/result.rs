//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use tracing::error;

use crate::errors::ApiError;

/// Map any error to an HTTP error envelope.
pub(crate) trait ResultExt<T> {
    /// Log the error and answer with a 500.
    fn or_500(self, context: &str) -> Result<T, ApiError>;

    /// Answer with a 400 carrying `message`.
    fn or_400(self, message: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            ApiError::internal()
        })
    }

    fn or_400(self, message: &str) -> Result<T, ApiError> {
        self.map_err(|_source| ApiError::bad_request(message))
    }
}
