//! Subscriptions service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::subscriptions::{
        data::{ListFilters, ListQuery, SubscriptionInput, SubscriptionsPage, TotalQuery},
        errors::SubscriptionsServiceError,
        months::Month,
        records::{SubscriptionRecord, SubscriptionUuid},
        repository::PgSubscriptionsRepository,
        totals::{Window, total_amount},
    },
};

#[derive(Debug, Clone)]
pub struct PgSubscriptionsService {
    db: Db,
    repository: PgSubscriptionsRepository,
}

impl PgSubscriptionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSubscriptionsRepository::new(),
        }
    }

    /// Run the page and count queries against one snapshot.
    async fn list(
        &self,
        filters: &ListFilters,
    ) -> Result<SubscriptionsPage, SubscriptionsServiceError> {
        let mut tx = self.db.begin_snapshot().await?;

        let subscriptions = self.repository.list_subscriptions(&mut tx, filters).await?;
        let total = self
            .repository
            .count_subscriptions(&mut tx, filters)
            .await?;

        tx.commit().await?;

        Ok(SubscriptionsPage {
            subscriptions,
            total,
        })
    }
}

fn parse_optional_month(value: Option<&str>) -> Result<Option<Month>, SubscriptionsServiceError> {
    Ok(value.map(str::parse::<Month>).transpose()?)
}

#[async_trait]
impl SubscriptionsService for PgSubscriptionsService {
    async fn create_subscription(
        &self,
        input: SubscriptionInput,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError> {
        let fields = input.validate()?;
        let uuid = SubscriptionUuid::new();

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_subscription(&mut tx, uuid, &fields)
            .await?;

        tx.commit().await?;

        debug!(subscription = %created.uuid, "created subscription");

        Ok(created)
    }

    async fn get_subscription(
        &self,
        subscription: SubscriptionUuid,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .get_subscription(&mut tx, subscription)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn update_subscription(
        &self,
        subscription: SubscriptionUuid,
        input: SubscriptionInput,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError> {
        let fields = input.validate()?;

        let mut tx = self.db.begin().await?;

        let existing = self
            .repository
            .get_subscription(&mut tx, subscription)
            .await?;

        let updated = self
            .repository
            .update_subscription(&mut tx, existing.uuid, &fields)
            .await?;

        tx.commit().await?;

        debug!(subscription = %updated.uuid, "updated subscription");

        Ok(updated)
    }

    async fn delete_subscription(
        &self,
        subscription: SubscriptionUuid,
    ) -> Result<(), SubscriptionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_subscription(&mut tx, subscription)
            .await?;

        if rows_affected == 0 {
            return Err(SubscriptionsServiceError::NotFound);
        }

        tx.commit().await?;

        debug!(%subscription, "deleted subscription");

        Ok(())
    }

    async fn list_subscriptions(
        &self,
        query: ListQuery,
    ) -> Result<SubscriptionsPage, SubscriptionsServiceError> {
        let filters = ListFilters {
            from: parse_optional_month(query.from.as_deref())?,
            to: parse_optional_month(query.to.as_deref())?,
            user_uuid: query.user_uuid,
            service_name: query.service_name,
            limit: Some(query.limit),
            offset: query.offset,
        };

        self.list(&filters).await
    }

    async fn total_cost(&self, query: TotalQuery) -> Result<u64, SubscriptionsServiceError> {
        let window = Window {
            from: query.from.parse()?,
            to: query.to.parse()?,
        };

        let filters = ListFilters {
            user_uuid: query.user_uuid,
            service_name: query.service_name,
            from: Some(window.from),
            to: Some(window.to),
            limit: None,
            offset: 0,
        };

        let page = self.list(&filters).await?;

        total_amount(&page.subscriptions, window)
    }
}

#[automock]
#[async_trait]
pub trait SubscriptionsService: Send + Sync {
    /// Validate `input` and store it under a freshly assigned id.
    async fn create_subscription(
        &self,
        input: SubscriptionInput,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError>;

    /// Retrieve a single subscription.
    async fn get_subscription(
        &self,
        subscription: SubscriptionUuid,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError>;

    /// Replace every caller-supplied field of an existing subscription.
    async fn update_subscription(
        &self,
        subscription: SubscriptionUuid,
        input: SubscriptionInput,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError>;

    /// Deletes a subscription with the given UUID.
    async fn delete_subscription(
        &self,
        subscription: SubscriptionUuid,
    ) -> Result<(), SubscriptionsServiceError>;

    /// One page of subscriptions matching `query`, newest first, plus the
    /// number of matches across all pages.
    async fn list_subscriptions(
        &self,
        query: ListQuery,
    ) -> Result<SubscriptionsPage, SubscriptionsServiceError>;

    /// Total cost of the matching subscriptions across the `from..=to` months.
    async fn total_cost(&self, query: TotalQuery) -> Result<u64, SubscriptionsServiceError>;
}
