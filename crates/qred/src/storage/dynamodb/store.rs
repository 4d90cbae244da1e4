//! DynamoDB item store.
//!
//! Implements [`ItemStore`] from `qred_core::storage` against a single table
//! keyed by `PK` and `SK`.

use async_trait::async_trait;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::types::{AttributeValue, Select};
use aws_sdk_dynamodb::Client;
use chrono::Utc;

use qred_core::storage::{
    CountQuery, Item, ItemStore, PointGet, PrefixQuery, Result, PARTITION_KEY_ATTRIBUTE,
    SORT_KEY_ATTRIBUTE,
};

use super::conversions::item_to_json;
use super::error::{map_get_item_error, map_query_error};
use crate::config::Config;

/// DynamoDB-backed item store.
///
/// Cheap to clone; the SDK client shares its connection pool.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a store from application configuration.
    ///
    /// Uses the AWS SDK default credential chain with the configured region
    /// and, when set, the endpoint override (e.g. DynamoDB Local).
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.dynamodb_endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(Client::from_conf(builder.build()), config.table_name.clone())
    }

    async fn point_get(&self, get: PointGet) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY_ATTRIBUTE, AttributeValue::S(get.pk))
            .key(SORT_KEY_ATTRIBUTE, AttributeValue::S(get.sk))
            .send()
            .await
            .map_err(map_get_item_error)?;

        result.item.as_ref().map(item_to_json).transpose()
    }

    async fn prefix_query(&self, query: PrefixQuery) -> Result<Vec<Item>> {
        // DynamoDB rejects a Limit below 1.
        if query.limit == 0 {
            return Ok(Vec::new());
        }

        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(PrefixQuery::KEY_CONDITION)
            .expression_attribute_values(":pk", AttributeValue::S(query.pk))
            .expression_attribute_values(":skPrefix", AttributeValue::S(query.sk_prefix))
            .limit(i32::try_from(query.limit).unwrap_or(i32::MAX))
            .scan_index_forward(false)
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_json).collect()
    }

    /// Runs a count query, following pagination so that partitions larger
    /// than one query page are counted completely.
    async fn count_query(&self, query: CountQuery) -> Result<u64> {
        let mut total: u64 = 0;
        let mut start_key = None;

        loop {
            let result = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression(CountQuery::KEY_CONDITION)
                .expression_attribute_values(":pk", AttributeValue::S(query.pk.clone()))
                .expression_attribute_values(
                    ":dateLimit",
                    AttributeValue::S(query.threshold.clone()),
                )
                .select(Select::Count)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            total += u64::try_from(result.count).unwrap_or(0);

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => return Ok(total),
            }
        }
    }
}

#[async_trait]
impl ItemStore for DynamoDbStore {
    async fn get_item(&self, pk: &str, sk: &str) -> Result<Option<Item>> {
        self.point_get(PointGet::new(pk, sk))
            .await
            .inspect_err(|err| tracing::error!(pk, sk, error = %err, "Error fetching item"))
    }

    async fn query_by_prefix(&self, pk: &str, sk_prefix: &str, limit: usize) -> Result<Vec<Item>> {
        self.prefix_query(PrefixQuery::new(pk, sk_prefix, limit))
            .await
            .inspect_err(|err| {
                tracing::error!(pk, sk_prefix, limit, error = %err, "Error querying items")
            })
    }

    async fn count_after(&self, pk: &str, sk_prefix: &str) -> Result<u64> {
        let query = CountQuery::recent(pk, sk_prefix, Utc::now());
        tracing::debug!(pk, threshold = %query.threshold, "Counting recent items");

        self.count_query(query).await.inspect_err(|err| {
            tracing::error!(pk, sk_prefix, error = %err, "Error fetching recent item count")
        })
    }
}
