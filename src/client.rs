//! Defines the outbound AWS calls behind a small capability trait, so
//! the handler can be exercised with test doubles, plus the global
//! client instance shared across invocations.

use crate::conf::Settings;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_config::from_env;
use aws_sdk_s3::config::Region;
use once_cell::sync::OnceCell;
use std::env;

/// The two outbound calls the handler makes per record.
#[async_trait]
pub trait UploadServices: Send + Sync {
    /// Reads the content type of a stored object, `None` when the
    /// object carries no content type.
    async fn content_type(&self, bucket: &str, key: &str) -> Result<Option<String>>;

    /// Publishes one message to the given topic, returning the
    /// message id assigned by the service.
    async fn publish(&self, topic_arn: &str, subject: &str, body: &str) -> Result<String>;
}

/// The real thing: an S3 client for metadata reads and an SNS client
/// for publishing.
pub struct Aws {
    s3: aws_sdk_s3::Client,
    sns: aws_sdk_sns::Client,
}

#[async_trait]
impl UploadServices for Aws {
    async fn content_type(&self, bucket: &str, key: &str) -> Result<Option<String>> {
        let response = self
            .s3
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to read metadata of object {:?} in bucket {:?}",
                    key, bucket
                )
            })?;
        Ok(response.content_type().map(String::from))
    }

    async fn publish(&self, topic_arn: &str, subject: &str, body: &str) -> Result<String> {
        let response = self
            .sns
            .publish()
            .topic_arn(topic_arn)
            .subject(subject)
            .message(body)
            .send()
            .await
            .with_context(|| format!("Failed to publish to topic {:?}", topic_arn))?;
        Ok(String::from(response.message_id().unwrap_or("unknown")))
    }
}

/// Global client instance.
static CURRENT: OnceCell<Aws> = OnceCell::new();

/// Initialize the global client instance.
pub async fn init(settings: &Settings) -> Result<()> {
    let mut loader = from_env();
    if let Some(region) = &settings.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Ok(endpoint_url) = env::var("AWS_ENDPOINT_URL") {
        loader = loader.endpoint_url(
            if endpoint_url.starts_with("http://") || endpoint_url.starts_with("https://") {
                endpoint_url
            } else {
                format!("https://{}", endpoint_url)
            },
        );
    }
    let config = loader.load().await;
    let clients = Aws {
        s3: aws_sdk_s3::Client::new(&config),
        sns: aws_sdk_sns::Client::new(&config),
    };
    CURRENT
        .set(clients)
        .map_err(|_| anyhow!("client::CURRENT was already initialized"))
}

/// Get the current client instance, or panic if it hasn't been
/// initialized.
pub fn current() -> &'static Aws {
    CURRENT.get().expect("client is not initialized")
}
