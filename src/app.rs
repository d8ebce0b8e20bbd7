//! Defines the read-only application state and the per-invocation
//! event handling.
//!
//! Failure policy: record failures are isolated. A record that can't
//! be decoded, enriched, or published is logged (with its bucket and
//! key) and the remaining records are still processed. The handler
//! only reports the invocation as failed when every record in a
//! non-empty batch failed, so the platform's own redelivery can take
//! over for a wholly-failed batch.

use crate::client::UploadServices;
use crate::conf::Settings;
use crate::error::NotifyError;
use crate::message;
use crate::record::Upload;
use anyhow::{anyhow, Context, Result};
use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use envy::from_env;
use once_cell::sync::OnceCell;
use tracing::{info, instrument, warn};

/// An App is an initialized application state, derived from settings.
pub struct App {
    /// The original settings.
    pub settings: Settings,
}

impl App {
    /// Initialize an App instance given a settings struct. Consumes
    /// the settings struct.
    pub fn new(settings: Settings) -> Self {
        App { settings }
    }

    /// Handle one batch of S3 upload records, publishing one
    /// notification per record.
    #[instrument(skip(self, event, services))]
    pub async fn handle(
        &self,
        event: &S3Event,
        services: &(impl UploadServices + ?Sized),
    ) -> Result<String> {
        let total = event.records.len();
        let Some(topic_arn) = &self.settings.sns_topic_arn else {
            warn!(
                "SNS_TOPIC_ARN is not set; skipping {} upload record(s)",
                total
            );
            return Ok(String::from("No SNS topic configured; nothing published"));
        };
        info!("Received S3 event with {} record(s)", total);

        let mut failed = 0;
        for record in &event.records {
            if let Err(e) = self.notify(record, topic_arn, services).await {
                warn!("{}", e);
                failed += 1;
            }
        }
        if failed == total && total > 0 {
            return Err(anyhow!("All {} record(s) in the batch failed", total));
        }
        Ok(format!(
            "Published {} of {} upload notification(s)",
            total - failed,
            total
        ))
    }

    /// Process a single record: decode, enrich with the content type,
    /// format, and publish.
    async fn notify(
        &self,
        record: &S3EventRecord,
        topic_arn: &str,
        services: &(impl UploadServices + ?Sized),
    ) -> Result<(), NotifyError> {
        let upload = Upload::from_record(record)?;
        info!(
            "Processing file {:?} from bucket {:?}",
            upload.key, upload.bucket
        );
        let content_type = services
            .content_type(&upload.bucket, &upload.key)
            .await
            .map_err(|e| NotifyError::MetadataFetch {
                bucket: upload.bucket.clone(),
                key: upload.key.clone(),
                reason: format!("{:?}", e),
            })?;
        let notification = message::compose(
            &upload,
            content_type.as_deref(),
            &self.settings.environment,
        );
        let message_id = services
            .publish(topic_arn, &notification.subject, &notification.body)
            .await
            .map_err(|e| NotifyError::Publish {
                bucket: upload.bucket.clone(),
                key: upload.key.clone(),
                reason: format!("{:?}", e),
            })?;
        info!("Message published to SNS: {}", message_id);
        Ok(())
    }
}

/// Global App instance.
static CURRENT: OnceCell<App> = OnceCell::new();

/// Initialize the global App instance.
pub fn init() -> Result<()> {
    let settings = from_env().context("Failed to read settings from the environment")?;
    CURRENT
        .set(App::new(settings))
        .map_err(|_| anyhow!("app::CURRENT was already initialized"))
}

/// Get the current App instance, or panic if it hasn't been
/// initialized.
pub fn current() -> &'static App {
    CURRENT.get().expect("app is not initialized")
}
