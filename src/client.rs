//! Defines the global SNS client and the publishing seam used by the
//! forwarder.

use crate::conf::Settings;
use crate::message::MESSAGE_STRUCTURE;
use anyhow::{anyhow, Context, Result};
use aws_config::from_env;
use aws_sdk_sns::Client;
use once_cell::sync::OnceCell;
use std::future::Future;

/// Something that can deliver a JSON-structured message to a topic.
pub trait Publisher {
    /// Publish a message body to the given target, returning the
    /// message id assigned by the transport, if any.
    fn publish_json(
        &self,
        target: &str,
        message: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}

impl Publisher for Client {
    async fn publish_json(&self, target: &str, message: &str) -> Result<Option<String>> {
        let response = self
            .publish()
            .target_arn(target)
            .message(message)
            .message_structure(MESSAGE_STRUCTURE)
            .send()
            .await
            .with_context(|| format!("Failed to publish message to {:?}", target))?;
        Ok(response.message_id().map(String::from))
    }
}

/// Normalize an endpoint override so it always carries a scheme.
fn endpoint_with_scheme(endpoint_url: &str) -> String {
    if endpoint_url.starts_with("http://") || endpoint_url.starts_with("https://") {
        String::from(endpoint_url)
    } else {
        format!("https://{}", endpoint_url)
    }
}

/// Global SNS client instance.
static CURRENT: OnceCell<Client> = OnceCell::new();

/// Initialize the global SNS client.
pub async fn init(settings: &Settings) -> Result<()> {
    let sns_config = if let Some(endpoint_url) = &settings.aws_endpoint_url {
        from_env()
            .endpoint_url(endpoint_with_scheme(endpoint_url))
            .region("us-east-1") // should be OK since the endpoint was overridden
            .load()
    } else {
        from_env().load()
    }
    .await;
    let client = Client::new(&sns_config);
    CURRENT
        .set(client)
        .map_err(|_| anyhow!("client::CURRENT was already initialized"))
}

/// Get the current SNS client instance, or panic if it hasn't been initialized.
pub fn current() -> &'static Client {
    CURRENT.get().expect("client is not initialized")
}
