//! Defines the read-only application state and the change forwarder
//! itself.

use crate::client::Publisher;
use crate::conf::Settings;
use crate::message;
use crate::record::ChangeEvent;
use anyhow::{anyhow, Context, Result};
use envy::from_env;
use once_cell::sync::OnceCell;
use tracing::{debug, info, instrument};

/// An App is an initialized application state, derived from
/// settings.
#[derive(Debug)]
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

    /// Forward every inserted item in the batch to the target topic,
    /// in batch order. Stops at the first record that can't be
    /// forwarded; records before it stay published. Returns the
    /// amount of messages published.
    #[instrument(skip_all, fields(records = event.records.len()))]
    pub async fn handle<P: Publisher>(&self, event: &ChangeEvent, publisher: &P) -> Result<usize> {
        let mut published = 0;
        for (position, record) in event.records.iter().enumerate() {
            let is_insert = record.is_insert().with_context(|| {
                format!(
                    "Failed to read the kind of record {} ({:?})",
                    position,
                    record.event_id()
                )
            })?;
            if !is_insert {
                debug!(
                    "Skipping record {} ({:?}) of kind {:?}",
                    position,
                    record.event_id(),
                    record.event_name().ok()
                );
                continue;
            }
            let image = record.new_image().with_context(|| {
                format!(
                    "Failed to read the new image of record {} ({:?})",
                    position,
                    record.event_id()
                )
            })?;
            let body = message::encode(image).with_context(|| {
                format!(
                    "Failed to encode the new image of record {} ({:?})",
                    position,
                    record.event_id()
                )
            })?;
            let message_id = publisher
                .publish_json(&self.settings.target_arn, &body)
                .await
                .with_context(|| {
                    format!(
                        "Failed to forward record {} ({:?})",
                        position,
                        record.event_id()
                    )
                })?;
            info!(
                "Forwarded record {} ({:?}) as message {:?}",
                position,
                record.event_id(),
                message_id
            );
            published += 1;
        }
        info!(
            "Forwarded {} inserted item(s) to {:?}",
            published, self.settings.target_arn
        );
        Ok(published)
    }
}

/// Global App instance.
static CURRENT: OnceCell<App> = OnceCell::new();

/// Initialize the global App instance.
pub fn init() -> Result<()> {
    let settings = from_env()?;
    let app = App::new(settings);
    CURRENT
        .set(app)
        .map_err(|_| anyhow!("app::CURRENT was already initialized"))
}

/// Get the current App instance, or panic if it hasn't been
/// initialized.
pub fn current() -> &'static App {
    CURRENT.get().expect("app is not initialized")
}
