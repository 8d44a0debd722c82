use anyhow::{anyhow, Result};
use dynamodb_sns_forwarder::record::ChangeEvent;
use dynamodb_sns_forwarder::{app, client};
use lambda_runtime::{run, service_fn, LambdaEvent};

/// Forward the inserted items of a stream batch to the target topic
async fn function_handler(event: LambdaEvent<ChangeEvent>) -> Result<()> {
    app::current()
        .handle(&event.payload, client::current())
        .await?;
    Ok(())
}

/// Run an AWS Lambda function that listens to DynamoDB stream events
/// and publishes every inserted item to an SNS topic.
#[tokio::main]
async fn main() -> Result<()> {
    dynamodb_sns_forwarder::init().await?;

    run(service_fn(function_handler))
        .await
        .map_err(|e| anyhow!("{:?}", e))
}
