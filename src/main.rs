use anyhow::{anyhow, Result};
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{run, service_fn, LambdaEvent};
use upload_notifier::{app, client};

/// Handle one S3 event batch, publishing a notification per record
async fn function_handler(event: LambdaEvent<S3Event>) -> Result<String> {
    app::current().handle(&event.payload, client::current()).await
}

/// Run an AWS Lambda function that listens to S3 upload events and
/// publishes a notification message to an SNS topic for each uploaded
/// object.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    app::init()?;
    client::init(&app::current().settings).await?;

    run(service_fn(function_handler))
        .await
        .map_err(|e| anyhow!("{:?}", e))
}
