//! Forwards items inserted into a DynamoDB table, as seen through its
//! stream, to an SNS topic.

pub mod app;
pub mod client;
pub mod conf;
pub mod message;
pub mod record;

use anyhow::Result;

/// Set up logging, the global App instance and the global SNS
/// client. Every entrypoint calls this once before handling events.
pub async fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    app::init()?;
    client::init(&app::current().settings).await
}
