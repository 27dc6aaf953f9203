//! Subscriptions service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::subscriptions::months::MonthParseError;

#[derive(Debug, Error)]
pub enum SubscriptionsServiceError {
    #[error(transparent)]
    InvalidMonth(#[from] MonthParseError),

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("invalid price value")]
    InvalidPrice(#[from] TryFromIntError),

    #[error("invalid data")]
    InvalidData,

    #[error("subscription already exists")]
    AlreadyExists,

    #[error("subscription not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SubscriptionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
