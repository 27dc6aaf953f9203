//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database::{self, Db, PoolSettings},
    domain::subscriptions::{PgSubscriptionsService, SubscriptionsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub subscriptions: Arc<dyn SubscriptionsService>,
    db: Option<Db>,
}

impl AppContext {
    /// Build a context around an existing service, e.g. a mock.
    #[must_use]
    pub fn new(subscriptions: Arc<dyn SubscriptionsService>) -> Self {
        Self {
            subscriptions,
            db: None,
        }
    }

    /// Build application context backed by `PostgreSQL`.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            subscriptions: Arc::new(PgSubscriptionsService::new(db.clone())),
            db: Some(db),
        }
    }

    /// Connect the pool, apply migrations and build the context.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn connect(settings: &PoolSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(settings)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    /// Release database connections, if any.
    pub async fn close(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}
