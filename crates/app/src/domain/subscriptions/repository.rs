//! Subscriptions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as,
};
use uuid::Uuid;

use crate::domain::subscriptions::{
    data::{ListFilters, SubscriptionFields},
    months::Month,
    records::{SubscriptionRecord, SubscriptionUuid, UserUuid},
};

const GET_SUBSCRIPTION_SQL: &str = include_str!("sql/get_subscription.sql");
const CREATE_SUBSCRIPTION_SQL: &str = include_str!("sql/create_subscription.sql");
const UPDATE_SUBSCRIPTION_SQL: &str = include_str!("sql/update_subscription.sql");
const DELETE_SUBSCRIPTION_SQL: &str = include_str!("sql/delete_subscription.sql");
const LIST_SUBSCRIPTIONS_SQL: &str = include_str!("sql/list_subscriptions.sql");
const COUNT_SUBSCRIPTIONS_SQL: &str = include_str!("sql/count_subscriptions.sql");

/// Bind value carried by a filter predicate.
#[derive(Debug, Clone, PartialEq)]
enum FilterValue {
    Uuid(Uuid),
    Text(String),
    Timestamp(jiff::Timestamp),
}

/// One `AND`-ed condition; `?` in `fragment` marks where the value binds.
#[derive(Debug, Clone, PartialEq)]
struct Predicate {
    fragment: &'static str,
    value: FilterValue,
}

/// Ordered predicates for `filters`, shared by the page and count queries.
fn predicates(filters: &ListFilters) -> Vec<Predicate> {
    let mut predicates = Vec::with_capacity(4);

    if let Some(user) = filters.user_uuid {
        predicates.push(Predicate {
            fragment: "user_id = ?",
            value: FilterValue::Uuid(user.into_uuid()),
        });
    }

    if let Some(service_name) = &filters.service_name {
        predicates.push(Predicate {
            fragment: "service_name = ?",
            value: FilterValue::Text(service_name.clone()),
        });
    }

    if let Some(from) = filters.from {
        predicates.push(Predicate {
            fragment: "(end_date IS NULL OR end_date >= ?)",
            value: FilterValue::Timestamp(from.first_instant()),
        });
    }

    if let Some(to) = filters.to {
        predicates.push(Predicate {
            fragment: "start_date <= ?",
            value: FilterValue::Timestamp(to.first_instant()),
        });
    }

    predicates
}

fn push_predicates(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for predicate in predicates {
        let (before, after) = predicate
            .fragment
            .split_once('?')
            .unwrap_or((predicate.fragment, ""));

        builder.push(" AND ").push(before);

        match &predicate.value {
            FilterValue::Uuid(value) => builder.push_bind(*value),
            FilterValue::Text(value) => builder.push_bind(value.clone()),
            FilterValue::Timestamp(value) => builder.push_bind(SqlxTimestamp::from(*value)),
        };

        builder.push(after);
    }
}

fn encode_error(error: std::num::TryFromIntError) -> sqlx::Error {
    sqlx::Error::Encode(Box::new(error))
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSubscriptionsRepository;

impl PgSubscriptionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscription: SubscriptionUuid,
    ) -> Result<SubscriptionRecord, sqlx::Error> {
        query_as::<Postgres, SubscriptionRecord>(GET_SUBSCRIPTION_SQL)
            .bind(subscription.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscription: SubscriptionUuid,
        fields: &SubscriptionFields,
    ) -> Result<SubscriptionRecord, sqlx::Error> {
        let price = i64::try_from(fields.price).map_err(encode_error)?;

        query_as::<Postgres, SubscriptionRecord>(CREATE_SUBSCRIPTION_SQL)
            .bind(subscription.into_uuid())
            .bind(&fields.service_name)
            .bind(price)
            .bind(fields.user_uuid.into_uuid())
            .bind(SqlxTimestamp::from(fields.start_date.first_instant()))
            .bind(fields.end_date.map(|end| SqlxTimestamp::from(end.first_instant())))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscription: SubscriptionUuid,
        fields: &SubscriptionFields,
    ) -> Result<SubscriptionRecord, sqlx::Error> {
        let price = i64::try_from(fields.price).map_err(encode_error)?;

        query_as::<Postgres, SubscriptionRecord>(UPDATE_SUBSCRIPTION_SQL)
            .bind(subscription.into_uuid())
            .bind(&fields.service_name)
            .bind(price)
            .bind(fields.user_uuid.into_uuid())
            .bind(SqlxTimestamp::from(fields.start_date.first_instant()))
            .bind(fields.end_date.map(|end| SqlxTimestamp::from(end.first_instant())))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscription: SubscriptionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SUBSCRIPTION_SQL)
            .bind(subscription.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Fetch one page of matching subscriptions, newest first.
    pub(crate) async fn list_subscriptions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filters: &ListFilters,
    ) -> Result<Vec<SubscriptionRecord>, sqlx::Error> {
        let limit = filters
            .limit
            .map(i64::try_from)
            .transpose()
            .map_err(encode_error)?;
        let offset = i64::try_from(filters.offset).map_err(encode_error)?;

        let mut builder = QueryBuilder::<Postgres>::new(LIST_SUBSCRIPTIONS_SQL);

        push_predicates(&mut builder, &predicates(filters));

        builder
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        builder
            .build_query_as::<SubscriptionRecord>()
            .fetch_all(&mut **tx)
            .await
    }

    /// Count subscriptions matching `filters`, ignoring limit and offset.
    pub(crate) async fn count_subscriptions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filters: &ListFilters,
    ) -> Result<u64, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(COUNT_SUBSCRIPTIONS_SQL);

        push_predicates(&mut builder, &predicates(filters));

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }
}

fn month_column(row: &PgRow, column: &str) -> sqlx::Result<Option<Month>> {
    row.try_get::<Option<SqlxTimestamp>, _>(column)?
        .map(|timestamp| Month::from_timestamp(timestamp.to_jiff()))
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for SubscriptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        let start_date = month_column(row, "start_date")?.ok_or_else(|| {
            sqlx::Error::ColumnDecode {
                index: "start_date".to_string(),
                source: "unexpected NULL".into(),
            }
        })?;

        Ok(Self {
            uuid: SubscriptionUuid::from_uuid(row.try_get("id")?),
            service_name: row.try_get("service_name")?,
            price,
            user_uuid: UserUuid::from_uuid(row.try_get("user_id")?),
            start_date,
            end_date: month_column(row, "end_date")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
