use async_trait::async_trait;
use thiserror::Error;

/// Outbound notification failure.
#[derive(Debug, Error)]
#[error("notification channel failed: {0}")]
pub struct NotifyError(pub String);

/// Fire-and-forget outbound message port.
///
/// Delivery is at-most-once and best-effort: the storefront logs failures and
/// never lets them affect the operation that triggered the message.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

/// Notifier that writes the message to the log.
///
/// The default wiring when no external channel is configured.
#[derive(Debug, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        tracing::info!(message = %text, "order notification");
        Ok(())
    }
}
