//! DynamoDB keyed store
//!
//! The production backend. One table, partitioned on the key attribute with
//! no sort key. Each trait call is exactly one DynamoDB request, except
//! [`KeyedStore::scan`] which keeps issuing `Scan` until the table has been
//! read to the end.

pub mod codec;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use roster_core::{Item, KeyedStore, StoreError, StoreResult};
use std::fmt::Debug;

/// Keyed store backed by a DynamoDB table
pub struct DynamoStore {
    client: Client,
    table_name: String,
    key_attribute: String,
}

impl DynamoStore {
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        key_attribute: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            key_attribute: key_attribute.into(),
        }
    }

    /// Build a client from the ambient AWS configuration (environment,
    /// profile, or the Lambda execution role)
    pub async fn from_env(table_name: impl Into<String>, key_attribute: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name, key_attribute)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key_value(key: &str) -> AttributeValue {
        AttributeValue::S(key.to_owned())
    }
}

fn store_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => StoreError::Connection(message),
        _ => StoreError::Backend(message),
    }
}

#[async_trait]
impl KeyedStore for DynamoStore {
    async fn get_by_key(&self, key: &str) -> StoreResult<Option<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(&self.key_attribute, Self::key_value(key))
            .send()
            .await
            .map_err(store_error)?;

        output.item().cloned().map(codec::from_attributes).transpose()
    }

    async fn put_item(&self, item: Item) -> StoreResult<()> {
        if !matches!(item.get(&self.key_attribute), Some(serde_json::Value::String(_))) {
            return Err(StoreError::MissingKey(self.key_attribute.clone()));
        }

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(codec::to_attributes(item)))
            .send()
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(store_error)?;

            for attributes in output.items() {
                items.push(codec::from_attributes(attributes.clone())?);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        tracing::debug!(table = %self.table_name, count = items.len(), "scan complete");
        Ok(items)
    }

    async fn delete_by_key(&self, key: &str) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(&self.key_attribute, Self::key_value(key))
            .send()
            .await
            .map_err(store_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::retry::RetryConfig;
    use aws_sdk_dynamodb::config::timeout::TimeoutConfig;
    use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
    use aws_sdk_dynamodb::operation::get_item::{GetItemError, GetItemOutput};
    use aws_sdk_dynamodb::operation::put_item::PutItemOutput;
    use aws_sdk_dynamodb::operation::scan::ScanOutput;
    use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use codec::Attributes;
    use serde_json::json;
    use std::time::Duration;

    const TABLE: &str = "LambdaInGoUser";

    fn store(client: Client) -> DynamoStore {
        DynamoStore::new(client, TABLE, "email")
    }

    fn s(value: &str) -> AttributeValue {
        AttributeValue::S(value.to_owned())
    }

    fn user(email: &str) -> Attributes {
        Attributes::from([("email".to_string(), s(email))])
    }

    /// Client with real HTTP transport pointed at `endpoint`
    fn client_for(endpoint: String) -> Client {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .endpoint_url(endpoint)
            .retry_config(RetryConfig::disabled())
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_millis(500))
                    .build(),
            )
            .build();
        Client::from_conf(config)
    }

    #[tokio::test]
    async fn scan_follows_last_evaluated_key() {
        let first_page = mock!(Client::scan)
            .match_requests(|req| req.table_name() == Some(TABLE) && req.exclusive_start_key().is_none())
            .then_output(|| {
                ScanOutput::builder()
                    .items(user("a@b.com"))
                    .last_evaluated_key("email", s("a@b.com"))
                    .build()
            });
        let second_page = mock!(Client::scan)
            .match_requests(|req| {
                req.exclusive_start_key().and_then(|key| key.get("email"))
                    == Some(&s("a@b.com"))
            })
            .then_output(|| ScanOutput::builder().items(user("b@b.com")).build());
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&first_page, &second_page]);

        let items = store(client).scan().await.unwrap();

        let emails: Vec<_> = items.iter().map(|item| item["email"].clone()).collect();
        assert_eq!(emails, [json!("a@b.com"), json!("b@b.com")]);
        assert_eq!(first_page.num_calls(), 1);
        assert_eq!(second_page.num_calls(), 1);
    }

    #[tokio::test]
    async fn get_item_miss_is_none() {
        let miss = mock!(Client::get_item)
            .match_requests(|req| {
                req.table_name() == Some(TABLE)
                    && req.key().and_then(|key| key.get("email"))
                        == Some(&s("ghost@b.com"))
            })
            .then_output(|| GetItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&miss]);

        assert_eq!(store(client).get_by_key("ghost@b.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn get_item_hit_decodes_attributes() {
        let hit = mock!(Client::get_item).then_output(|| {
            GetItemOutput::builder()
                .item("email", s("a@b.com"))
                .item("age", AttributeValue::N("36".to_string()))
                .build()
        });
        let client = mock_client!(aws_sdk_dynamodb, [&hit]);

        let item = store(client).get_by_key("a@b.com").await.unwrap().unwrap();
        assert_eq!(item["email"], json!("a@b.com"));
        assert_eq!(item["age"], json!(36));
    }

    #[tokio::test]
    async fn service_error_is_backend() {
        let missing_table = mock!(Client::get_item).then_error(|| {
            GetItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        });
        let client = mock_client!(aws_sdk_dynamodb, [&missing_table]);

        let err = store(client).get_by_key("a@b.com").await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn put_writes_native_attributes() {
        let put = mock!(Client::put_item)
            .match_requests(|req| {
                let item = req.item();
                req.table_name() == Some(TABLE)
                    && item.and_then(|item| item.get("email"))
                        == Some(&s("a@b.com"))
                    && item.and_then(|item| item.get("active")) == Some(&AttributeValue::Bool(true))
            })
            .then_output(|| PutItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&put]);

        let item = json!({ "email": "a@b.com", "active": true });
        store(client)
            .put_item(item.as_object().cloned().unwrap())
            .await
            .unwrap();
        assert_eq!(put.num_calls(), 1);
    }

    #[tokio::test]
    async fn put_without_string_key_is_never_sent() {
        let put = mock!(Client::put_item).then_output(|| PutItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&put]);
        let store = store(client);

        for item in [json!({ "name": "Al" }), json!({ "email": 7 })] {
            let err = store
                .put_item(item.as_object().cloned().unwrap())
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::MissingKey(ref key) if key == "email"));
        }
        assert_eq!(put.num_calls(), 0);
    }

    #[tokio::test]
    async fn refused_connection_is_connection_error() {
        // Bind then drop so nothing listens on the port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = store(client_for(format!("http://{addr}")))
            .get_by_key("a@b.com")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn timeout_is_connection_error() {
        // Accepts at the TCP level but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let err = store(client_for(format!("http://{addr}")))
            .scan()
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)), "got {err:?}");
        drop(listener);
    }
}
