use async_trait::async_trait;
use crate::error::Error;

/// Host-side delivery of a rendered notification.
///
/// Implementations own the message-construction details of their platform
/// (at-mentions, message chains, channel routing). The store and command
/// service only ever hand over plain ids and text.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Sends `body` to the conversation, mentioning every id in `recipients`.
    async fn send(&self, recipients: &[String], body: &str) -> Result<(), Error>;
}
