use anyhow::{Context, Result};
use dynamodb_sns_forwarder::record::ChangeEvent;
use dynamodb_sns_forwarder::{app, client};
use tokio::io::{stdin, AsyncReadExt};
use tracing::info;

/// Forward the inserted items of a single stream event, read as JSON
/// from stdin, the same way the Lambda function would.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dynamodb_sns_forwarder::init().await?;

    let mut raw = String::new();
    stdin()
        .read_to_string(&mut raw)
        .await
        .context("Failed to read the stream event from stdin")?;
    let event: ChangeEvent =
        serde_json::from_str(&raw).context("Failed to parse the stream event")?;

    let published = app::current()
        .handle(&event, client::current())
        .await
        .context("Failed to forward the stream event")?;
    info!("Done; {} message(s) published", published);
    Ok(())
}
