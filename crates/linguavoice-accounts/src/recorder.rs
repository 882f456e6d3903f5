use tokio::sync::mpsc;

use crate::client::RecordStoreClient;

/// Usage increment to persist after a successful generation
#[derive(Debug, Clone)]
pub struct UsageDelta {
    /// User the characters are charged to
    pub user_id: String,
    /// Character count of the admitted request
    pub characters: u64,
}

/// Async usage recorder that persists increments off the response path
///
/// Records are sent via an unbounded channel and written by a background
/// task. Persistence failure is logged and never overturns the response
/// that already succeeded; undercounting is the accepted failure mode.
#[derive(Clone)]
pub struct UsageRecorder {
    tx: mpsc::UnboundedSender<UsageDelta>,
}

impl UsageRecorder {
    /// Create a recorder and spawn its background task
    ///
    /// The task runs until the last sender is dropped.
    #[must_use]
    pub fn new(client: RecordStoreClient) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(process_deltas(rx, client));

        Self { tx }
    }

    /// Enqueue a usage increment, fire-and-forget
    pub fn record(&self, delta: UsageDelta) {
        if let Err(e) = self.tx.send(delta) {
            tracing::warn!(error = %e, "failed to enqueue usage delta, channel closed");
        }
    }
}

impl std::fmt::Debug for UsageRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageRecorder").finish_non_exhaustive()
    }
}

async fn process_deltas(mut rx: mpsc::UnboundedReceiver<UsageDelta>, client: RecordStoreClient) {
    while let Some(delta) = rx.recv().await {
        if let Err(e) = client.add_usage(&delta.user_id, delta.characters).await {
            tracing::warn!(
                error = %e,
                user_id = %delta.user_id,
                characters = delta.characters,
                "failed to persist usage increment"
            );
        }
    }

    tracing::debug!("usage recorder shutting down");
}
